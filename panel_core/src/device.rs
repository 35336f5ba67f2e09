//! Device command dispatch.
//!
//! The pump understands exactly two unauthenticated HTTP GET requests
//! on its fixed local-network host: `/on` and `/off`. There is no
//! handshake, no state query, and no expected response schema; any
//! response and any connection failure are treated identically.
//!
//! The pump session is generic over [`DeviceLink`], so tests can swap
//! the real transport for a recording stub without touching the
//! session logic.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Command sent to the pump device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpCommand {
    On,
    Off,
}

impl PumpCommand {
    /// Request path on the device endpoint.
    pub fn path(self) -> &'static str {
        match self {
            PumpCommand::On => "/on",
            PumpCommand::Off => "/off",
        }
    }
}

/// Errors a device link can report.
///
/// Callers treat every variant the same way: log and move on. The
/// session never retries and never surfaces a link failure to the user.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// IO error (timeout, refused connection, reset, ...)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Host did not resolve to any address
    #[error("device host unresolvable: {0}")]
    Unresolvable(String),
}

/// A channel that accepts pump commands.
pub trait DeviceLink {
    /// Deliver `command` on a best-effort basis.
    fn send(&mut self, command: PumpCommand) -> Result<(), DeviceError>;
}

/// HTTP link to the pump's fixed endpoint.
///
/// Issues a plain `GET /on` or `GET /off` and drains whatever comes
/// back. Connect, read, and write all share one short timeout so a
/// dead device cannot stall the shell's loop.
pub struct HttpDeviceLink {
    host: String,
    timeout: Duration,
}

impl HttpDeviceLink {
    /// Create a link to `host` (optionally `host:port`; port 80 assumed).
    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }
}

impl DeviceLink for HttpDeviceLink {
    fn send(&mut self, command: PumpCommand) -> Result<(), DeviceError> {
        let authority = if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:80", self.host)
        };

        let addr = authority
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| DeviceError::Unresolvable(self.host.clone()))?;

        let mut stream = TcpStream::connect_timeout(&addr, self.timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            command.path(),
            self.host
        );
        stream.write_all(request.as_bytes())?;

        // The response carries no information we act on; drain it so
        // the device sees a clean close.
        let mut sink = [0u8; 256];
        while stream.read(&mut sink)? > 0 {}

        tracing::debug!("sent {:?} to device at {}", command, self.host);
        Ok(())
    }
}

/// A link that discards every command.
///
/// Used when no device is configured, and as a quiet default in tests.
pub struct NullDeviceLink;

impl DeviceLink for NullDeviceLink {
    fn send(&mut self, command: PumpCommand) -> Result<(), DeviceError> {
        tracing::debug!("no device configured, dropping {:?}", command);
        Ok(())
    }
}
