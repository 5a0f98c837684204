//! Error types for user stores.

use crate::model::ValidationErrors;
use thiserror::Error;

/// Errors that can occur during user store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No user has the requested id.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user with the same name (ignoring case) already exists.
    #[error("User already exists: {0}")]
    DuplicateName(String),

    /// The stored representation would break the user field rules.
    #[error("User validation error: {0}")]
    Invalid(#[from] ValidationErrors),

    /// An underlying database error occurred.
    #[error("User database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The in-memory actor is gone or failed to answer.
    #[error("Actor communication error: {0}")]
    Unavailable(String),
}
