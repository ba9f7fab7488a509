//! Operator transport setup: bind, listen, accept one client.
//!
//! The bridge serves exactly one operator per process run, so this module
//! deliberately has no accept loop and no connection registry; it binds a
//! listener, takes the first connection, and hands the stream to the
//! session layer.
//!
//! Transport selection is a capability question, not a strategy pattern:
//! TCP is the only transport with behavior.  UDP and the short-range
//! wireless link on the rover's carrier board are acknowledged in
//! [`TransportKind`] so configuration can name them, and they fail fast at
//! bind time instead of silently doing nothing.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

/// Wire transports the bridge can be asked to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Plain TCP.  The only implemented transport.
    Tcp,
    /// Datagram transport placeholder.  Fails fast at bind time.
    Udp,
    /// Short-range wireless placeholder.  Fails fast at bind time.
    Bluetooth,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::Tcp => "tcp",
            TransportKind::Udp => "udp",
            TransportKind::Bluetooth => "bluetooth",
        };
        f.write_str(name)
    }
}

/// Error returned when a transport name cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transport {0:?}: expected tcp, udp, or bluetooth")]
pub struct ParseTransportKindError(String);

impl FromStr for TransportKind {
    type Err = ParseTransportKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(TransportKind::Tcp),
            "udp" => Ok(TransportKind::Udp),
            "bluetooth" => Ok(TransportKind::Bluetooth),
            other => Err(ParseTransportKindError(other.to_string())),
        }
    }
}

/// Error type for transport setup and accept.
#[derive(Debug, Error)]
pub enum AcceptError {
    /// The configured transport has no implementation.
    #[error("transport {0} is not supported")]
    Unsupported(TransportKind),

    /// Binding the listening socket failed.
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accepting the operator connection failed.
    #[error("failed to accept operator connection: {source}")]
    AcceptFailed {
        #[source]
        source: std::io::Error,
    },
}

/// Binds the listening socket for the operator connection.
///
/// # Errors
///
/// Returns [`AcceptError::Unsupported`] for any transport other than TCP,
/// and [`AcceptError::BindFailed`] if the socket cannot be bound.
pub async fn bind_operator_listener(
    kind: TransportKind,
    bind_address: &str,
    port: u16,
) -> Result<TcpListener, AcceptError> {
    match kind {
        TransportKind::Tcp => {}
        other => return Err(AcceptError::Unsupported(other)),
    }

    let addr = format!("{bind_address}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| AcceptError::BindFailed { addr: addr.clone(), source })?;

    info!(%addr, "listening for operator");
    Ok(listener)
}

/// Accepts the single operator connection for this process run.
///
/// # Errors
///
/// Returns [`AcceptError::AcceptFailed`] if the accept call fails.
pub async fn accept_operator(
    listener: &TcpListener,
) -> Result<(TcpStream, SocketAddr), AcceptError> {
    let (stream, peer) = listener
        .accept()
        .await
        .map_err(|source| AcceptError::AcceptFailed { source })?;

    info!(%peer, "operator connected");
    Ok((stream, peer))
}
