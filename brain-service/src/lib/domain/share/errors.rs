use thiserror::Error;

/// Top-level error type for share link operations
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("Share link not found")]
    NotFound,

    // Infrastructure errors
    #[error("Share token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
