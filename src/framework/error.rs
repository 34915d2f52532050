//! # Framework Errors
//!
//! Failures that belong to the actor plumbing rather than to a hosted entity. Entity
//! errors are boxed into [`FrameworkError::EntityError`] so that one response type can
//! carry any entity's error back to its client.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
