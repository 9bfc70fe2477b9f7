//! Typed error taxonomy for the splitting pipeline.
//!
//! Only two error kinds abort a whole run: a rejected credential and an
//! observed cancellation. Everything else is caught at the narrowest component
//! boundary and turned into the affected genre's terminal
//! [`crate::types::SplitResult`] instead of being thrown upward.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    /// Spotify rejected the bearer token. Fatal for the whole run: no further
    /// calls are made with a dead credential.
    #[error("Spotify rejected the access token: {0}")]
    Auth(String),

    /// A single artist lookup failed after retries. Non-fatal: the affected
    /// tracks degrade to the unclassified bucket.
    #[error("genre lookup failed for artist {artist_id}: {reason}")]
    Resolution { artist_id: String, reason: String },

    /// Creating the destination playlist for one genre failed. Non-fatal for
    /// the other genres.
    #[error("failed to create playlist for genre '{genre}': {reason}")]
    Create { genre: String, reason: String },

    /// Adding tracks to a destination playlist stopped partway. `added` counts
    /// the tracks confirmed before the failing batch.
    #[error("added {added} of {total} tracks before a batch failed: {reason}")]
    Populate {
        added: usize,
        total: usize,
        reason: String,
    },

    /// Retries with backoff were exhausted while Spotify kept answering 429.
    #[error("rate limited by Spotify, giving up after retry-after of {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// The run was cancelled; no further calls are issued. Side effects of
    /// calls that already completed are kept.
    #[error("the run was cancelled")]
    Cancelled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SplitError {
    /// Whether this error aborts the whole run rather than a single genre or
    /// track.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SplitError::Auth(_) | SplitError::Cancelled)
    }

    /// Whether an HTTP status means the credential itself is unusable.
    pub fn auth_rejected(status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
    }
}
