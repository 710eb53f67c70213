//! `nmea-logger`: collects NMEA 0183 sentences from a TCP source into
//! rotating, checksum-filtered log files.
//!
//! # Architecture
//!
//! ```text
//!  ┌────────────┐  connect / retry forever
//!  │ Supervisor │──────────────────────────────▶ Connector (TCP)
//!  └─────┬──────┘
//!        │ one per connection
//!  ┌─────▼──────┐  bytes   ┌─────────┐  candidates  ┌──────────┐
//!  │  Session   │─────────▶│ extract │─────────────▶│ checksum │
//!  └─────┬──────┘          └─────────┘              └────┬─────┘
//!        │ samples                             valid     │
//!  ┌─────▼──────┐                               ┌────────▼───┐
//!  │   stats    │                               │ LogWriter  │ rotating file
//!  └────────────┘                               └────────────┘
//! ```
//!
//! Each module has a single responsibility:
//! - [`checksum`]: NMEA XOR checksum validation
//! - [`extract`]: raw chunk → candidate sentences
//! - [`writer`]: the one open log file, line format and rotation
//! - [`stats`]: periodic accepted/rejected summaries
//! - [`session`]: one connection's receive/validate/write loop
//! - [`supervisor`]: connect, run, classify, back off, repeat
//! - [`connector`]: stream establishment (TCP in production)
//! - [`clock`]: real and simulated time
//! - [`config`]: immutable runtime parameters
//! - [`replay`]: serving recorded log files back as a stream

pub mod checksum;
pub mod clock;
pub mod config;
pub mod connector;
pub mod error;
pub mod extract;
pub mod replay;
pub mod session;
pub mod stats;
pub mod supervisor;
pub mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use connector::{Connector, TcpConnector};
pub use error::{ConfigError, SessionError};
pub use session::{run_session, Session, SessionSummary};
pub use supervisor::{SessionOutcome, Supervisor};
