//! Shared fixtures: scripted streams and connectors driven by a
//! [`ManualClock`], plus a logger that captures records per test thread.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Mutex, OnceLock};
use std::task::{Context, Poll};
use std::thread::{self, ThreadId};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use log::{Level, LevelFilter, Metadata, Record};
use nmea_logger::{Config, Connector, ManualClock};
use tokio::io::{AsyncRead, ReadBuf};

/// A valid sentence (checksum 47).
pub const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
/// A valid sentence (checksum 6A).
pub const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
/// Well-formed but with a wrong checksum (actual: 51).
pub const INVALID: &str = "$INVALID*00";

pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Configuration writing into `dir` with test-scaled intervals.
pub fn test_config(dir: &Path) -> Config {
    Config {
        output_dir: dir.to_path_buf(),
        retry_interval: Duration::from_secs(1),
        report_interval: Duration::from_secs(60),
        rotation_interval: Duration::from_secs(3600),
        ..Config::default()
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// All files in `dir`, sorted by name.
pub fn log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

// ---------------------------------------------------------------------------
// ScriptedStream
// ---------------------------------------------------------------------------

/// One read's worth of scripted behaviour.
#[derive(Debug, Clone)]
pub enum Step {
    Data(Vec<u8>),
    Fail(io::ErrorKind),
}

/// An in-memory stream that returns one scripted chunk per read.
///
/// Before each chunk is handed out the shared clock is advanced by `tick`,
/// so chunk *k* (1-based) is observed at `k × tick`. Once the script is
/// exhausted every read returns 0 bytes (peer closed).
pub struct ScriptedStream {
    steps: VecDeque<Step>,
    clock: ManualClock,
    tick: Duration,
}

impl ScriptedStream {
    pub fn new(clock: &ManualClock, tick: Duration) -> Self {
        Self {
            steps: VecDeque::new(),
            clock: clock.clone(),
            tick,
        }
    }

    pub fn chunk(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.steps.push_back(Step::Data(bytes.as_ref().to_vec()));
        self
    }

    /// A chunk containing each sentence followed by `\r\n`.
    pub fn sentences(self, sentences: &[&str]) -> Self {
        let text: String = sentences.iter().map(|s| format!("{s}\r\n")).collect();
        self.chunk(text)
    }

    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }
}

impl AsyncRead for ScriptedStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = &mut *self;
        match this.steps.pop_front() {
            None => Poll::Ready(Ok(())),
            Some(Step::Fail(kind)) => Poll::Ready(Err(io::Error::from(kind))),
            Some(Step::Data(bytes)) => {
                this.clock.advance(this.tick);
                let n = bytes.len().min(buf.remaining());
                buf.put_slice(&bytes[..n]);
                if n < bytes.len() {
                    this.steps.push_front(Step::Data(bytes[n..].to_vec()));
                }
                Poll::Ready(Ok(()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedConnector
// ---------------------------------------------------------------------------

/// Hands out one scripted result per `connect` call.
pub struct ScriptedConnector {
    attempts: Mutex<VecDeque<io::Result<ScriptedStream>>>,
}

impl ScriptedConnector {
    pub fn new(attempts: Vec<io::Result<ScriptedStream>>) -> Self {
        Self {
            attempts: Mutex::new(attempts.into()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

impl Connector for ScriptedConnector {
    type Stream = ScriptedStream;

    async fn connect(&self) -> io::Result<ScriptedStream> {
        self.attempts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::from(io::ErrorKind::ConnectionRefused)))
    }

    fn peer(&self) -> String {
        "scripted".to_owned()
    }
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// One captured log record.
#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub message: String,
}

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Captured)>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let captured = Captured {
            level: record.level(),
            message: record.args().to_string(),
        };
        self.records
            .lock()
            .unwrap()
            .push((thread::current().id(), captured));
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<CaptureLogger> = OnceLock::new();

/// Records logged on the thread that created it.
///
/// `#[tokio::test]` runs on a current-thread runtime, so everything a test
/// drives (spawned tasks included) logs from the test's own thread and
/// tests running in parallel do not see each other's records.
pub struct LogCapture {
    thread: ThreadId,
}

/// Install the capturing logger (once per test binary) and start a fresh
/// capture for the calling thread.
pub fn capture_logs() -> LogCapture {
    let logger = LOGGER.get_or_init(|| CaptureLogger {
        records: Mutex::new(Vec::new()),
    });
    // Only the first call installs it; later calls reuse the same logger.
    let _ = log::set_logger(logger);
    log::set_max_level(LevelFilter::Trace);

    let thread = thread::current().id();
    logger.records.lock().unwrap().retain(|(id, _)| *id != thread);
    LogCapture { thread }
}

impl LogCapture {
    pub fn records(&self) -> Vec<Captured> {
        LOGGER
            .get()
            .map(|logger| {
                logger
                    .records
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|(id, _)| *id == self.thread)
                    .map(|(_, captured)| captured.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Messages logged at exactly `level`.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    /// `true` if a message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|m| m.contains(needle))
    }
}
