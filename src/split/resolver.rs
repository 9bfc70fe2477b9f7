use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::{
    error::{Result, SplitError},
    split::CancelFlag,
    spotify,
    types::Artist,
    warning,
};

/// The genre bucket for tracks whose artist reports no genre, has no id or
/// could not be resolved.
pub const UNCLASSIFIED: &str = "unclassified";

/// How many artist lookups may be in flight at once. Kept low on purpose:
/// a burst of simultaneous lookups is the quickest way into Spotify's rate
/// limit.
pub const GENRE_LOOKUP_CONCURRENCY: usize = 5;

/// Per-run artist-to-genre map. Each unique artist id is looked up exactly
/// once per run; multiple tracks commonly share a lead artist, so this cuts
/// the remote call volume considerably.
#[derive(Debug, Default)]
pub struct ResolvedGenres {
    by_artist: HashMap<String, String>,
    degraded: Vec<String>,
}

impl ResolvedGenres {
    pub fn by_artist(&self) -> &HashMap<String, String> {
        &self.by_artist
    }

    /// Artist ids that fell back to [`UNCLASSIFIED`] because their lookup
    /// kept failing after retries.
    pub fn degraded(&self) -> &[String] {
        &self.degraded
    }
}

/// Picks the genre for an artist: the first reported genre wins, verbatim.
/// An empty or missing list maps to [`UNCLASSIFIED`].
pub fn first_genre(artist: &Artist) -> String {
    artist
        .genres
        .first()
        .filter(|genre| !genre.is_empty())
        .cloned()
        .unwrap_or_else(|| UNCLASSIFIED.to_string())
}

/// Resolves the genre of every given artist id, at most once per id.
///
/// Lookups run concurrently up to [`GENRE_LOOKUP_CONCURRENCY`]. An auth
/// rejection aborts immediately: nothing further is resolved with a dead
/// credential. Any other single-artist failure degrades that artist to
/// [`UNCLASSIFIED`] and is recorded as degraded rather than aborting the run.
pub async fn resolve_genres(
    client: &Client,
    token: &str,
    artist_ids: &[String],
    cancel: &CancelFlag,
) -> Result<ResolvedGenres> {
    let mut resolved = ResolvedGenres {
        by_artist: HashMap::with_capacity(artist_ids.len()),
        degraded: Vec::new(),
    };

    let mut lookups = stream::iter(artist_ids.iter().cloned())
        .map(|artist_id| {
            let cancel = cancel.clone();
            async move {
                if cancel.is_cancelled() {
                    return (artist_id, Err(SplitError::Cancelled));
                }
                let result = spotify::artists::get_artist(client, token, &artist_id).await;
                (artist_id, result)
            }
        })
        .buffer_unordered(GENRE_LOOKUP_CONCURRENCY);

    while let Some((artist_id, result)) = lookups.next().await {
        match result {
            Ok(artist) => {
                resolved.by_artist.insert(artist_id, first_genre(&artist));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warning!("Could not resolve a genre for artist {}: {}", artist_id, e);
                resolved
                    .by_artist
                    .insert(artist_id.clone(), UNCLASSIFIED.to_string());
                resolved.degraded.push(artist_id);
            }
        }
    }

    Ok(resolved)
}
