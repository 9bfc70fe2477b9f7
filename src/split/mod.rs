//! # Splitting Pipeline
//!
//! The core of sposplit: takes one source playlist and splits it into one
//! destination playlist per genre. The pipeline runs as a single logical
//! async flow:
//!
//! ```text
//! split_playlist (orchestrator)
//!     ├── spotify::tracks      - enumerate the source playlist
//!     ├── grouping             - genre per track via the resolver,
//!     │       └── resolver       one memoized lookup per unique artist
//!     └── per genre, in first-seen order:
//!         ├── provision        - create playlist + best-effort cover
//!         └── populate         - add tracks in ordered batches
//! ```
//!
//! Genres are processed independently: a creation or populate failure for one
//! genre marks only that genre's [`SplitResult`] and the remaining genres are
//! still processed. Only a rejected credential or an observed cancellation
//! aborts the run, and even then the outcome reports every genre that already
//! reached a terminal state.
//!
//! The source playlist is never mutated; tracks are only read from it. Runs
//! are deliberately not idempotent: splitting the same playlist twice creates
//! a second set of destination playlists.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use reqwest::Client;

use crate::{
    error::{Result, SplitError},
    spotify,
    types::{Playlist, SplitResult, SplitStatus},
    warning,
};

pub mod grouping;
pub mod populate;
pub mod provision;
pub mod resolver;

/// Cooperative cancellation signal for a run.
///
/// Checked before every outbound call; once set, no further calls are issued.
/// Calls already in flight complete and their side effects (playlists already
/// created) are kept rather than rolled back.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Final report of one run: per-genre terminal results in genre first-seen
/// order, plus the error that aborted the run early, if any.
#[derive(Debug)]
pub struct SplitOutcome {
    pub results: Vec<SplitResult>,
    pub aborted: Option<SplitError>,
}

impl SplitOutcome {
    fn aborted_with(results: Vec<SplitResult>, error: SplitError) -> Self {
        SplitOutcome {
            results,
            aborted: Some(error),
        }
    }
}

/// Splits `playlist` into one destination playlist per genre under the given
/// user account.
///
/// The access token and owner account id are threaded explicitly through
/// every call; nothing is kept in ambient state. The returned outcome always
/// has a definite terminal status for every genre it lists.
pub async fn split_playlist(
    client: &Client,
    token: &str,
    user_id: &str,
    playlist: &Playlist,
    cancel: &CancelFlag,
) -> SplitOutcome {
    let tracks = match spotify::tracks::get_playlist_tracks(client, token, &playlist.id).await {
        Ok(tracks) => tracks,
        Err(e) => return SplitOutcome::aborted_with(Vec::new(), e),
    };

    let groups = match grouping::group_by_genre(client, token, &tracks, cancel).await {
        Ok(groups) => groups,
        Err(e) => return SplitOutcome::aborted_with(Vec::new(), e),
    };

    let mut results: Vec<SplitResult> = Vec::with_capacity(groups.len());

    for (genre, track_ids) in groups.iter() {
        if cancel.is_cancelled() {
            return SplitOutcome::aborted_with(results, SplitError::Cancelled);
        }

        match process_genre(
            client,
            token,
            user_id,
            genre,
            &playlist.name,
            track_ids,
            cancel,
        )
        .await
        {
            Ok(result) => results.push(result),
            Err(e) => return SplitOutcome::aborted_with(results, e),
        }
    }

    SplitOutcome {
        results,
        aborted: None,
    }
}

/// Drives one genre from creation to population and returns its terminal
/// result. Only fatal errors (dead credential, cancellation) propagate as
/// `Err`; per-genre failures are absorbed into the result's status.
async fn process_genre(
    client: &Client,
    token: &str,
    user_id: &str,
    genre: &str,
    source_name: &str,
    track_ids: &[String],
    cancel: &CancelFlag,
) -> Result<SplitResult> {
    if cancel.is_cancelled() {
        return Err(SplitError::Cancelled);
    }

    let created =
        match provision::create_genre_playlist(client, token, user_id, genre, source_name).await {
            Ok(created) => created,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warning!("{}", e);
                return Ok(SplitResult {
                    genre: genre.to_string(),
                    destination_playlist_id: None,
                    track_count: 0,
                    status: SplitStatus::Failure,
                });
            }
        };

    let uris = populate::track_uris(track_ids);
    let outcome = populate::add_tracks(client, token, &created.id, &uris, cancel).await?;

    if let Some(error) = &outcome.error {
        warning!("{}", error);
    }

    Ok(outcome.into_result(genre, created.id))
}
