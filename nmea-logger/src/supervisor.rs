//! Retry-forever connection supervisor.
//!
//! The [`Supervisor`] owns the configuration, a [`Connector`] and a
//! [`Clock`]. Each attempt connects, runs one [`Session`] to completion and
//! classifies how it ended:
//!
//! | Outcome                              | Log level | Next step           |
//! |--------------------------------------|-----------|---------------------|
//! | [`SessionOutcome::PeerClosed`]       | info      | retry after backoff |
//! | [`SessionOutcome::ConnectionRefused`]| error     | retry after backoff |
//! | [`SessionOutcome::Failed`]           | error     | retry after backoff |
//!
//! The backoff is the fixed `retry_interval`; there is no attempt limit and
//! no growth. The stream is owned by [`Supervisor::attempt`] and dropped
//! (closed) before the backoff starts, whatever the outcome.

use std::error::Error as _;

use crate::clock::Clock;
use crate::config::Config;
use crate::connector::Connector;
use crate::error::SessionError;
use crate::session::{Session, SessionSummary};

/// How one connection attempt ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The peer closed the stream (zero-length read). Not an error.
    PeerClosed(SessionSummary),
    /// Nobody is listening at the configured address.
    ConnectionRefused,
    /// Any other failure while connecting or during the session.
    Failed(SessionError),
}

impl SessionOutcome {
    fn from_result(result: Result<SessionSummary, SessionError>) -> Self {
        match result {
            Ok(summary) => Self::PeerClosed(summary),
            Err(e) if e.is_connection_refused() => Self::ConnectionRefused,
            Err(e) => Self::Failed(e),
        }
    }
}

pub struct Supervisor<K, C> {
    config: Config,
    connector: K,
    clock: C,
    attempts: u64,
}

impl<K: Connector, C: Clock> Supervisor<K, C> {
    pub fn new(config: Config, connector: K, clock: C) -> Self {
        Self {
            config,
            connector,
            clock,
            attempts: 0,
        }
    }

    /// Connect once and run a session until it ends.
    pub async fn attempt(&self) -> SessionOutcome {
        log::info!("Connecting to {}", self.connector.peer());
        let result = async {
            let mut stream = self.connector.connect().await?;
            log::info!("Connected to {}, start processing messages", self.connector.peer());

            let mut session = Session::new(&self.config, &self.clock);
            session.run(&mut stream).await?;
            Ok::<_, SessionError>(session.into_summary())
        }
        .await;

        SessionOutcome::from_result(result)
    }

    /// One supervisor iteration: attempt, log the outcome, back off.
    pub async fn step(&mut self) -> SessionOutcome {
        self.attempts += 1;
        let outcome = self.attempt().await;

        match &outcome {
            SessionOutcome::PeerClosed(summary) => log::info!(
                "Session ended: {} sentence(s) logged, {} skipped, {} file(s)",
                summary.accepted,
                summary.rejected,
                summary.files.len()
            ),
            SessionOutcome::ConnectionRefused => log::error!("Connection refused"),
            SessionOutcome::Failed(e) => log::error!("Session failed: {}", describe(e)),
        }

        log::info!("Retrying ...");
        self.clock.sleep(self.config.retry_interval).await;
        outcome
    }

    /// Retry forever. Only returns if the surrounding task is cancelled.
    pub async fn run(mut self) {
        loop {
            self.step().await;
        }
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Render an error with its whole `source()` chain.
fn describe(err: &SessionError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
