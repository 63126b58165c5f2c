//! Errors surfaced by the scoring API client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::core::GridError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("not found")]
    NotFound,

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("could not parse response")]
    Decode(#[from] serde_json::Error),

    #[error("server sent a malformed grid")]
    MalformedGrid(#[from] GridError),
}

impl ApiError {
    /// True for HTTP 401 responses
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
