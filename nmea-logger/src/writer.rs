//! Rotating, append-only log files.
//!
//! [`LogWriter`] owns exactly one open file. Each accepted sentence becomes
//! one line:
//!
//! ```text
//! 2024-05-01T12:00:00.123456+00:00<TAB>$IIMWV,127,R,21.8,N,A*1C<LF>
//! ```
//!
//! and is pushed to durable storage before [`LogWriter::write`] returns, so
//! a crash never loses a line that was reported as written.
//!
//! # File names
//!
//! `nmea-<YYYY-MM-DDTHHMMSS>.log`, using the UTC creation time. Files are
//! created with `create_new`; if the name is taken (two rotations inside one
//! second, or a restart) a sequence suffix is added: `nmea-<ts>-1.log`,
//! `nmea-<ts>-2.log`, ... An existing file is never reopened.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::error::SessionError;

const FILE_PREFIX: &str = "nmea-";
const FILE_EXTENSION: &str = ".log";
const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M%S";

/// Render a capture timestamp the way it appears at the start of each line.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Name of a log file created at `created`; `seq` 0 carries no suffix.
pub fn file_name(created: DateTime<Utc>, seq: u32) -> String {
    let stamp = created.format(FILE_TIMESTAMP_FORMAT);
    if seq == 0 {
        format!("{FILE_PREFIX}{stamp}{FILE_EXTENSION}")
    } else {
        format!("{FILE_PREFIX}{stamp}-{seq}{FILE_EXTENSION}")
    }
}

// ---------------------------------------------------------------------------
// LogWriter
// ---------------------------------------------------------------------------

/// The currently open output file.
#[derive(Debug)]
pub struct LogWriter {
    path: PathBuf,
    file: File,
    opened_at: Instant,
    rotation_interval: Duration,
    lines: u64,
}

impl LogWriter {
    /// Create a fresh file in `dir`.
    ///
    /// `created` names the file; `opened_at` starts the rotation timer.
    pub async fn open(
        dir: &Path,
        created: DateTime<Utc>,
        opened_at: Instant,
        rotation_interval: Duration,
    ) -> Result<Self, SessionError> {
        let mut seq = 0u32;
        let (path, file) = loop {
            let path = dir.join(file_name(created, seq));
            match OpenOptions::new()
                .append(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && seq < u32::MAX => {
                    seq += 1;
                }
                Err(source) => return Err(SessionError::OpenFile { path, source }),
            }
        };

        log::info!("Writing to {}", path.display());
        Ok(Self {
            path,
            file,
            opened_at,
            rotation_interval,
            lines: 0,
        })
    }

    /// Append one `timestamp<TAB>sentence` line and sync it to disk.
    pub async fn write(&mut self, timestamp: &str, sentence: &str) -> Result<(), SessionError> {
        let entry = format!("{timestamp}\t{sentence}\n");
        self.append(entry.as_bytes())
            .await
            .map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.lines += 1;
        Ok(())
    }

    async fn append(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.write_all(bytes).await?;
        self.file.flush().await?;
        self.file.sync_data().await
    }

    /// `true` once the file has been open longer than the rotation interval.
    pub fn should_rotate(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.opened_at) > self.rotation_interval
    }

    /// Sync and release the file. It is never opened again.
    pub async fn close(self) -> Result<(), SessionError> {
        self.file
            .sync_all()
            .await
            .map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;
        log::debug!("Closed {} after {} line(s)", self.path.display(), self.lines);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines written to this file.
    pub fn lines(&self) -> u64 {
        self.lines
    }
}
