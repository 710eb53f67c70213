use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a logging session.
///
/// A peer closing the connection is *not* an error; see
/// [`crate::session::run_session`]. The messages name the failed operation
/// only; the underlying I/O error is reachable through `source()`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("socket I/O error")]
    Io(#[from] io::Error),
    #[error("error opening {} for writing", path.display())]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("error writing to {}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl SessionError {
    /// `true` when the failure is the peer refusing the TCP connection.
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::ConnectionRefused)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}
