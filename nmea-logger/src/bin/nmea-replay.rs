//! `nmea-replay`: serve a recorded log file as a live NMEA TCP stream.
//!
//! Every accepted client gets its own replay of the whole file, paced by the
//! recorded timestamps.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Parser;
use tokio::net::TcpListener;

use nmea_logger::replay::{parse_log, replay, LogRecord};
use nmea_logger::SystemClock;

const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Replay an NMEA log file to TCP clients.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log file written by nmea-logger.
    #[arg(short, long)]
    input_file: PathBuf,

    /// Skip records before this UTC time (format 2006-01-02T15:04:05).
    #[arg(short, long, value_parser = parse_start_time)]
    start_time: Option<DateTime<Utc>>,

    /// Local address to listen on.
    #[arg(short, long, default_value = "0.0.0.0:10110")]
    listen: String,
}

fn parse_start_time(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, START_TIME_FORMAT).map(|naive| naive.and_utc())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let contents = tokio::fs::read_to_string(&cli.input_file)
        .await
        .with_context(|| format!("error reading input file {}", cli.input_file.display()))?;
    let records: Arc<[LogRecord]> = parse_log(&contents).into();
    log::info!(
        "Loaded {} record(s) from {}",
        records.len(),
        cli.input_file.display()
    );

    let listener = TcpListener::bind(&cli.listen)
        .await
        .with_context(|| format!("error listening on {}", cli.listen))?;
    log::info!("Listening on {}", cli.listen);

    loop {
        let (mut stream, peer) = listener
            .accept()
            .await
            .context("error accepting connection")?;
        log::info!("Connection accepted from {peer}");

        let records = Arc::clone(&records);
        let start = cli.start_time;
        tokio::spawn(async move {
            match replay(&mut stream, &records, start, &SystemClock).await {
                Ok(total) => log::info!("{peer} finished, sent {total} total bytes."),
                Err(e) => log::warn!("Error writing to {peer}: {e}"),
            }
        });
    }
}
