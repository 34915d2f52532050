use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// One end of an in-memory duplex link.
pub struct ChannelTransport {
    outgoing: Option<mpsc::UnboundedSender<String>>,
    incoming: mpsc::UnboundedReceiver<String>,
}

impl ChannelTransport {
    /// Two connected ends. Closing or dropping one ends the other's stream.
    pub fn pair() -> (Self, Self) {
        let (left_tx, right_rx) = mpsc::unbounded_channel();
        let (right_tx, left_rx) = mpsc::unbounded_channel();
        (
            Self {
                outgoing: Some(left_tx),
                incoming: left_rx,
            },
            Self {
                outgoing: Some(right_tx),
                incoming: right_rx,
            },
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        let outgoing = self.outgoing.as_ref().ok_or(TransportError::Closed)?;
        outgoing.send(frame).map_err(|_| TransportError::Closed)
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.incoming.recv().await.map(Ok)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.outgoing = None;
        Ok(())
    }
}
