//! Error types for the room actor.

use crate::framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("Room {0} is full")]
    Full(String),

    #[error("Malformed invite code: {0}")]
    BadInviteCode(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for RoomError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => RoomError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<RoomError>() {
                Ok(room_error) => *room_error,
                Err(other) => RoomError::ActorCommunicationError(other.to_string()),
            },
            other => RoomError::ActorCommunicationError(other.to_string()),
        }
    }
}
