use reqwest::Client;

use crate::{
    error::{Result, SplitError},
    split::CancelFlag,
    spotify,
    types::{SplitResult, SplitStatus},
};

/// URI scheme prefix Spotify expects when adding tracks by id.
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

/// Maximum number of URIs the add-tracks endpoint accepts per call.
pub const ADD_TRACKS_BATCH_SIZE: usize = 100;

pub fn track_uri(track_id: &str) -> String {
    format!("{TRACK_URI_PREFIX}{track_id}")
}

pub fn track_uris(track_ids: &[String]) -> Vec<String> {
    track_ids.iter().map(|id| track_uri(id)).collect()
}

/// Splits URIs into the sequential batches sent to Spotify. Batches keep the
/// overall track order: batch boundaries never reorder anything.
pub fn batches(uris: &[String]) -> impl Iterator<Item = &[String]> {
    uris.chunks(ADD_TRACKS_BATCH_SIZE)
}

/// Derives a genre's terminal status from how many of its tracks made it into
/// the destination playlist.
pub fn status_for(added: usize, total: usize) -> SplitStatus {
    if added == total {
        SplitStatus::Success
    } else if added > 0 {
        SplitStatus::PartialFailure
    } else {
        SplitStatus::Failure
    }
}

/// Result of populating one destination playlist. Distinguishes "0 added"
/// (failure) from "some added" (partial failure) from "all added" (success).
#[derive(Debug)]
pub struct PopulateOutcome {
    pub added: usize,
    pub total: usize,
    pub error: Option<SplitError>,
}

impl PopulateOutcome {
    pub fn status(&self) -> SplitStatus {
        status_for(self.added, self.total)
    }

    /// Converts the outcome into the genre's terminal record.
    pub fn into_result(self, genre: &str, playlist_id: String) -> SplitResult {
        SplitResult {
            genre: genre.to_string(),
            destination_playlist_id: Some(playlist_id),
            track_count: self.added,
            status: self.status(),
        }
    }
}

/// Appends the given track URIs to a destination playlist, batching across
/// Spotify's per-call cap.
///
/// Batches are sent sequentially; on the first failed batch no further
/// batches are attempted, otherwise later tracks would land ahead of earlier
/// ones. The failure is captured in the outcome together with the number of
/// tracks already confirmed. Only a dead credential or cancellation
/// propagates as `Err`.
pub async fn add_tracks(
    client: &Client,
    token: &str,
    playlist_id: &str,
    uris: &[String],
    cancel: &CancelFlag,
) -> Result<PopulateOutcome> {
    let total = uris.len();
    let mut added = 0usize;

    for batch in batches(uris) {
        if cancel.is_cancelled() {
            return Err(SplitError::Cancelled);
        }

        match spotify::playlist::add_tracks(client, token, playlist_id, batch).await {
            Ok(_) => added += batch.len(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                return Ok(PopulateOutcome {
                    added,
                    total,
                    error: Some(SplitError::Populate {
                        added,
                        total,
                        reason: e.to_string(),
                    }),
                });
            }
        }
    }

    Ok(PopulateOutcome {
        added,
        total,
        error: None,
    })
}
