//! JSON text framing.

use crate::model::OrderError;
use crate::protocol::Frame;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Invalid order in {event}: {source}")]
    InvalidOrder {
        event: &'static str,
        #[source]
        source: OrderError,
    },

    #[error("Failed to encode {event}: {source}")]
    Encode {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Serializes one frame.
pub fn encode<F: Frame>(frame: &F) -> Result<String, ProtocolError> {
    serde_json::to_string(frame).map_err(|source| ProtocolError::Encode {
        event: frame.event(),
        source,
    })
}

/// Parses one frame and checks every order it carries against the catalogue.
pub fn decode<F: Frame>(text: &str) -> Result<F, ProtocolError> {
    let frame: F = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
    frame
        .validate()
        .map_err(|source| ProtocolError::InvalidOrder {
            event: frame.event(),
            source,
        })?;
    Ok(frame)
}
