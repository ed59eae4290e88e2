//! Error definitions
//!
//! All fallible operations in this crate fail with [`Error`]. Variants are
//! grouped into three classes (validation, provider, export); callers that
//! only need to pick a user-facing message can match on [`Error::kind`]
//! instead of individual variants.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Validation errors (rejected before any request is issued)
    // ========================================================================
    #[error("search term is empty")]
    EmptyQuery,

    // ========================================================================
    // Provider errors (network / catalog failures)
    // ========================================================================
    #[error("image catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image catalog returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    // ========================================================================
    // Export errors (flattening / encoding failures)
    // ========================================================================
    #[error("scene has no background image yet")]
    SceneNotReady,

    #[error("no font available to render text annotations")]
    FontUnavailable,

    #[error("failed to encode exported image: {0}")]
    Encode(String),
}

/// Error class, matching the taxonomy callers report to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Provider,
    Export,
}

impl Error {
    /// The class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyQuery => ErrorKind::Validation,
            Error::Request(_) | Error::Status(_) | Error::Decode(_) | Error::Image(_) => {
                ErrorKind::Provider
            }
            Error::SceneNotReady | Error::FontUnavailable | Error::Encode(_) => ErrorKind::Export,
        }
    }
}
