//! Entry point for `nmea-logger`.
//!
//! Parses CLI arguments (each also readable from the environment), makes
//! sure the output directory exists, and hands control to the
//! [`Supervisor`], which never returns. `main.rs` owns only process setup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use nmea_logger::config::{DEFAULT_HOST, DEFAULT_OUTPUT_DIR, DEFAULT_PORT};
use nmea_logger::{Config, Supervisor, SystemClock, TcpConnector};

/// Log NMEA 0183 sentences from a TCP source into rotating files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// NMEA source host (e.g. kplex or gpsd).
    #[arg(long, env = "NMEA_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// NMEA source TCP port.
    #[arg(long, env = "NMEA_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory where log files are stored. Created if missing.
    #[arg(long, env = "NMEA_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Seconds to wait between connection attempts.
    #[arg(long, env = "NMEA_RETRY_SECS", default_value_t = 1)]
    retry_secs: u64,

    /// Seconds between accepted/skipped summaries.
    #[arg(long, env = "NMEA_REPORT_SECS", default_value_t = 60)]
    report_secs: u64,

    /// Seconds a log file stays open before rotation.
    #[arg(long, env = "NMEA_ROTATION_SECS", default_value_t = 3600)]
    rotation_secs: u64,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            output_dir: self.output_dir,
            retry_interval: Duration::from_secs(self.retry_secs),
            report_interval: Duration::from_secs(self.report_secs),
            rotation_interval: Duration::from_secs(self.rotation_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise env_logger; set RUST_LOG to control verbosity.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    config.validate().context("invalid configuration")?;

    log::info!(
        "Starting NMEA logger: output directory = {}, source = {}",
        config.output_dir.display(),
        config.address()
    );

    if !config.output_dir.exists() {
        log::info!(
            "Output directory does not exist, creating {}",
            config.output_dir.display()
        );
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                config.output_dir.display()
            )
        })?;
    }

    let connector = TcpConnector::new(config.address());
    Supervisor::new(config, connector, SystemClock).run().await;
    Ok(())
}
