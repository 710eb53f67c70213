//! Logger configuration.
//!
//! A [`Config`] is built once at startup (see `main.rs`) and handed to the
//! [`crate::supervisor::Supervisor`] by value. Nothing reads configuration
//! from global state, so tests can shrink every interval freely.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default NMEA source host (a local multiplexer such as kplex).
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default NMEA-over-TCP port.
pub const DEFAULT_PORT: u16 = 10110;
/// Default directory for log files.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Adjustable logger parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host name or address of the NMEA source.
    pub host: String,
    /// TCP port of the NMEA source.
    pub port: u16,
    /// Directory receiving the rotated log files. Must already exist.
    pub output_dir: PathBuf,
    /// Pause between connection attempts. Constant, never grows.
    pub retry_interval: Duration,
    /// How often accepted/rejected counts are reported.
    pub report_interval: Duration,
    /// How long one log file stays open before rotation.
    pub rotation_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            retry_interval: Duration::from_secs(1),
            report_interval: Duration::from_secs(60),
            rotation_interval: Duration::from_secs(3600),
        }
    }
}

impl Config {
    /// `host:port`, suitable for `TcpStream::connect`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject configurations the logger cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        for (name, value) in [
            ("retry interval", self.retry_interval),
            ("report interval", self.report_interval),
            ("rotation interval", self.rotation_interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        Ok(())
    }
}
