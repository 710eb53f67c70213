//! Replaying recorded log files as a live NMEA stream.
//!
//! Each line of a log file written by [`crate::writer::LogWriter`] is
//! `timestamp<TAB>sentence`. [`replay`] sends the sentences back out in
//! order, sleeping the recorded gap between consecutive timestamps, so a
//! logger pointed at the replay server sees roughly the original pacing.

use chrono::{DateTime, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::clock::Clock;

/// One parsed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Capture time, or `None` if the timestamp did not parse.
    pub timestamp: Option<DateTime<Utc>>,
    pub sentence: String,
}

/// Parse one `timestamp<TAB>sentence` line.
///
/// Lines without a tab yield `None`. A line whose timestamp is not RFC 3339
/// is kept with `timestamp: None` and logged.
pub fn parse_log_line(line: &str) -> Option<LogRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (stamp, sentence) = line.split_once('\t')?;

    let timestamp = match DateTime::parse_from_rfc3339(stamp) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Error parsing timestamp {stamp:?}: {e}");
            None
        }
    };

    Some(LogRecord {
        timestamp,
        sentence: sentence.to_owned(),
    })
}

/// Parse a whole log file, skipping lines without a tab.
pub fn parse_log(contents: &str) -> Vec<LogRecord> {
    contents.lines().filter_map(parse_log_line).collect()
}

/// Write `records` to `out`, one sentence per line, paced by their
/// timestamps.
///
/// With `start` set, records captured before it are skipped, and so are
/// records without a timestamp. Without `start`, untimed records are sent
/// immediately and do not affect pacing. Returns the number of bytes sent.
pub async fn replay<W, C>(
    out: &mut W,
    records: &[LogRecord],
    start: Option<DateTime<Utc>>,
    clock: &C,
) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
    C: Clock,
{
    let mut total = 0;
    let mut previous: Option<DateTime<Utc>> = None;

    for record in records {
        if let Some(start) = start {
            match record.timestamp {
                Some(ts) if ts >= start => {}
                _ => continue,
            }
        }

        if let (Some(prev), Some(current)) = (previous, record.timestamp) {
            // Negative gaps (clock steps in the recording) send immediately.
            if let Ok(gap) = (current - prev).to_std() {
                clock.sleep(gap).await;
            }
        }

        let line = format!("{}\n", record.sentence);
        out.write_all(line.as_bytes()).await?;
        log::debug!("sent [{}]", record.sentence);

        total += line.len();
        if record.timestamp.is_some() {
            previous = record.timestamp;
        }
    }

    out.flush().await?;
    Ok(total)
}
