//! One connection's lifetime: receive, validate, write, report, rotate.
//!
//! A [`Session`] runs two nested loops over a single stream:
//!
//! ```text
//!  ┌─ per file ──────────────────────────────────────────────┐
//!  │  open LogWriter (rotation timer starts)                 │
//!  │  ┌─ per read ────────────────────────────────────────┐  │
//!  │  │  read ≤ 4096 bytes ── 0 bytes ──▶ return (closed) │  │
//!  │  │  stamp chunk, extract, validate, write / reject   │  │
//!  │  │  StatsReporter::maybe_report                      │  │
//!  │  │  LogWriter::should_rotate ── yes ──▶ break        │  │
//!  │  └───────────────────────────────────────────────────┘  │
//!  │  close LogWriter                                        │
//!  └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Rotation never touches the stream, and the stats window is independent
//! of rotation. The session ends only when the peer closes the stream
//! (`Ok`) or an I/O operation fails (`Err`).

use std::path::PathBuf;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::checksum;
use crate::clock::Clock;
use crate::config::Config;
use crate::error::SessionError;
use crate::extract::Chunk;
use crate::stats::StatsReporter;
use crate::writer::{format_timestamp, LogWriter};

/// Upper bound on a single socket read.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Totals over a whole session, independent of the reporting window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Every file opened during the session, in order.
    pub files: Vec<PathBuf>,
    pub accepted: u64,
    pub rejected: u64,
}

/// State for one connection. Dropped (and with it the counters) when the
/// connection ends.
pub struct Session<'a, C> {
    config: &'a Config,
    clock: &'a C,
    stats: StatsReporter,
    summary: SessionSummary,
}

impl<'a, C: Clock> Session<'a, C> {
    pub fn new(config: &'a Config, clock: &'a C) -> Self {
        Self {
            config,
            clock,
            stats: StatsReporter::new(config.report_interval, clock.now()),
            summary: SessionSummary::default(),
        }
    }

    /// Drive `stream` until the peer closes it or an error occurs.
    pub async fn run<S>(&mut self, stream: &mut S) -> Result<(), SessionError>
    where
        S: AsyncRead + Unpin,
    {
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        loop {
            let mut writer = LogWriter::open(
                &self.config.output_dir,
                self.clock.utc_now(),
                self.clock.now(),
                self.config.rotation_interval,
            )
            .await?;
            self.summary.files.push(writer.path().to_path_buf());

            loop {
                let n = stream.read(&mut buf).await?;
                if n == 0 {
                    log::info!("Connection closed.");
                    writer.close().await?;
                    return Ok(());
                }

                self.process_chunk(&mut writer, &buf[..n]).await?;

                let now = self.clock.now();
                self.stats.maybe_report(now);
                if writer.should_rotate(now) {
                    log::info!("File rotation interval elapsed.");
                    break;
                }
            }

            writer.close().await?;
        }
    }

    async fn process_chunk(
        &mut self,
        writer: &mut LogWriter,
        data: &[u8],
    ) -> Result<(), SessionError> {
        // All sentences of one chunk share a capture timestamp.
        let timestamp = format_timestamp(self.clock.utc_now());

        let chunk = Chunk::extract(data);
        if !chunk.terminated {
            log::warn!("Data does not end in newline: {}", Chunk::raw_text(data));
        }

        for sentence in &chunk.sentences {
            if checksum::is_valid(sentence) {
                writer.write(&timestamp, sentence).await?;
                self.stats.record_ok();
                self.summary.accepted += 1;
            } else {
                log::warn!("Skipping sentence with invalid checksum: {sentence}");
                self.stats.record_rejected();
                self.summary.rejected += 1;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> &StatsReporter {
        &self.stats
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn into_summary(self) -> SessionSummary {
        self.summary
    }
}

/// Run a fresh [`Session`] over `stream`; `Ok` means the peer closed it.
pub async fn run_session<S, C>(
    stream: &mut S,
    config: &Config,
    clock: &C,
) -> Result<SessionSummary, SessionError>
where
    S: AsyncRead + Unpin,
    C: Clock,
{
    let mut session = Session::new(config, clock);
    session.run(stream).await?;
    Ok(session.into_summary())
}
