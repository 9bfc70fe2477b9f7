//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API operations the
//! splitter needs. It handles all HTTP communication, bearer authentication,
//! error classification and rate limiting, and exposes a clean async Rust
//! interface to the pipeline layer.
//!
//! ## Core Modules
//!
//! - [`tracks`] - Enumerates a playlist's tracks, following the paginated
//!   `next` hrefs until the playlist is exhausted
//! - [`artists`] - Single artist lookup, the genre signal for the splitter
//! - [`playlist`] - Playlist creation, cover image upload, adding tracks in
//!   batches and listing the user's playlists
//! - [`users`] - The current-user lookup that supplies the owner account id
//!   for playlist creation
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - List tracks of the source playlist
//! - `GET /artists/{id}` - Fetch an artist with its reported genres
//! - `POST /users/{user_id}/playlists` - Create a destination playlist
//! - `PUT /playlists/{id}/images` - Upload the generated cover image
//! - `POST /playlists/{id}/tracks` - Add tracks by URI (max 100 per call)
//! - `GET /me/playlists` - The user's playlists
//! - `GET /me` - The owner account id
//!
//! ## Error Handling
//!
//! Every endpoint goes through [`send_with_retry`]:
//!
//! - 401/403 map to [`SplitError::Auth`] immediately. The credential is dead
//!   and retrying would only burn the rate limit.
//! - 429 honors the `Retry-After` header for a bounded number of attempts
//!   before escalating to [`SplitError::RateLimit`].
//! - 5xx responses are retried with exponential backoff.
//! - Remaining HTTP errors propagate as [`SplitError::Http`] and are mapped
//!   to their per-genre or per-track kinds by the caller.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::error::{Result, SplitError};

pub mod artists;
pub mod playlist;
pub mod tracks;
pub mod users;

/// Upper bound on attempts per call, the first one included.
const MAX_ATTEMPTS: u32 = 4;

/// A `Retry-After` beyond this is not worth sleeping on.
const MAX_RETRY_AFTER_SECS: u64 = 120;

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(6))
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1)
}

/// Sends a request with bounded retries and classifies auth and rate-limit
/// responses. `build` is invoked once per attempt since a `RequestBuilder`
/// is consumed on send. Endpoint-specific statuses (like 404 on an artist
/// lookup) are left for the caller to interpret.
pub(crate) async fn send_with_retry<F>(build: F, what: &str) -> Result<Response>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt: u32 = 0;

    loop {
        let response = build().send().await?;
        let status = response.status();

        if SplitError::auth_rejected(status) {
            return Err(SplitError::Auth(format!("{what} returned {status}")));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_secs(&response);
            attempt += 1;
            if attempt >= MAX_ATTEMPTS || retry_after > MAX_RETRY_AFTER_SECS {
                return Err(SplitError::RateLimit { retry_after });
            }
            sleep(Duration::from_secs(retry_after.max(1))).await;
            continue;
        }

        if status.is_server_error() && attempt + 1 < MAX_ATTEMPTS {
            attempt += 1;
            sleep(backoff_delay(attempt)).await;
            continue;
        }

        return Ok(response);
    }
}
