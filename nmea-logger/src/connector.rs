//! Establishing the byte stream a session reads from.
//!
//! [`Connector`] is the seam between the supervisor and the network. The
//! production [`TcpConnector`] dials the configured `host:port`; tests plug
//! in scripted connectors that refuse, fail, or hand out in-memory streams.

use std::future::Future;
use std::io;

use tokio::io::AsyncRead;
use tokio::net::TcpStream;

/// Produces one stream per connection attempt.
pub trait Connector {
    type Stream: AsyncRead + Unpin;

    /// Open a new stream. Dropping the stream closes it.
    fn connect(&self) -> impl Future<Output = io::Result<Self::Stream>>;

    /// Human-readable peer description for log lines.
    fn peer(&self) -> String;
}

/// Outbound TCP client.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    address: String,
}

impl TcpConnector {
    /// `address` is anything `TcpStream::connect` resolves, e.g. `127.0.0.1:10110`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self) -> impl Future<Output = io::Result<TcpStream>> {
        TcpStream::connect(self.address.clone())
    }

    fn peer(&self) -> String {
        self.address.clone()
    }
}
