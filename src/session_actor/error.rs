//! Error types for the session actor.

use crate::framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The session id is unknown to the actor.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// The connection that carries this session's frames is gone.
    #[error("Session outbox closed")]
    OutboxClosed,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for SessionError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => SessionError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<SessionError>() {
                Ok(session_error) => *session_error,
                Err(other) => SessionError::ActorCommunicationError(other.to_string()),
            },
            other => SessionError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_errors_keep_their_kind() {
        let wrapped = FrameworkError::EntityError(Box::new(SessionError::OutboxClosed));
        assert!(matches!(
            SessionError::from(wrapped),
            SessionError::OutboxClosed
        ));
        assert!(matches!(
            SessionError::from(FrameworkError::NotFound("session_9".into())),
            SessionError::NotFound(id) if id == "session_9"
        ));
        assert!(matches!(
            SessionError::from(FrameworkError::ActorClosed),
            SessionError::ActorCommunicationError(_)
        ));
    }
}
