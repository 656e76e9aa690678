//! Domain error type shared by the stores, the service, and the HTTP layer.
//!
//! Stores and the service raise these untranslated; only [`crate::server`]
//! maps them to status codes.

/// Errors surfaced by part operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No part exists with the given id.
    #[error("Part with ID={0} not found.")]
    NotFound(i64),

    /// A field constraint was violated (negative weight, duplicate SKU, ...).
    #[error("{0}")]
    Validation(String),

    /// Store or connectivity failure.
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
