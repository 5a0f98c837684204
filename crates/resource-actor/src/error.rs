//! # Framework Errors
//!
//! Errors shared by every actor and client. Entity-specific failures travel
//! boxed inside [`FrameworkError::EntityError`] and can be recovered with
//! `downcast`.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflicts with existing item: {0}")]
    Conflict(String),
    #[error("No ids left to assign")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
