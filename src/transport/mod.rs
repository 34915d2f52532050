//! Moving text frames between a player and the coordinator.
//!
//! [`Transport`] is the seam: the game only needs "send a frame", "wait for a frame" and
//! "close". [`ChannelTransport`] implements it in memory for the loopback coordinator;
//! a WebSocket or TCP transport would implement the same three methods.

pub mod channel;
pub mod connection;

pub use channel::ChannelTransport;
pub use connection::connect;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport closed")]
    Closed,
}

/// A bidirectional, ordered stream of text frames.
#[async_trait]
pub trait Transport: Send + 'static {
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Next frame, or `None` once the other side has closed.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    async fn close(&mut self) -> Result<(), TransportError>;
}
