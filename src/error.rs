//! Error types for spotify-dl.
//!
//! Two families exist:
//! - [`Error`] is fatal for a run. It covers bad input, authentication and
//!   resource listing failures, and I/O on the destination directory.
//! - [`TrackError`] belongs to a single track. It is retried by the pipeline
//!   and, once attempts are exhausted, only shows up in the final summary.

use thiserror::Error;

use crate::types::ResourceKind;

/// Result type alias for fatal spotify-dl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The given URL is not a Spotify album or playlist link.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The anonymous access token could not be obtained.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Listing the tracks of a resource failed.
    #[error("cannot resolve {kind} {id}: {reason}")]
    Resolution {
        kind: ResourceKind,
        id: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single download attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackError {
    /// Lookup, audio or cover request failed, or the file could not be written.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The audio file exists but its tags could not be written.
    #[error("tagging failed: {0}")]
    Tag(String),
}

impl From<reqwest::Error> for TrackError {
    fn from(err: reqwest::Error) -> Self {
        TrackError::Fetch(err.to_string())
    }
}

impl From<id3::Error> for TrackError {
    fn from(err: id3::Error) -> Self {
        TrackError::Tag(err.to_string())
    }
}
