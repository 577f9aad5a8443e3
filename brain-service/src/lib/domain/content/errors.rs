use thiserror::Error;

use crate::domain::content::models::ContentId;

/// Error type for ContentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for Link validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Error type for ContentKind parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentKindError {
    #[error("Unknown content type '{0}' (expected image, video, article or audio)")]
    Unknown(String),
}

/// Error type for Tag validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag is empty")]
    Empty,

    #[error("Tag too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all content-related operations
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Invalid content ID: {0}")]
    InvalidContentId(#[from] ContentIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid link: {0}")]
    InvalidLink(#[from] LinkError),

    #[error("Invalid content type: {0}")]
    InvalidKind(#[from] ContentKindError),

    #[error("Invalid tag: {0}")]
    InvalidTag(#[from] TagError),

    /// Content is absent or belongs to someone else; the two are not distinguished.
    #[error("You don't have access to content {0}")]
    Forbidden(ContentId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
