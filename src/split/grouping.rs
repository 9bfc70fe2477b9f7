use std::collections::{HashMap, HashSet};

use reqwest::Client;

use crate::{
    error::Result,
    split::{CancelFlag, resolver},
    types::Track,
    warning,
};

pub use crate::split::resolver::UNCLASSIFIED;

/// Insertion-ordered mapping from genre to the track ids assigned to it.
///
/// Bucket order is the order genres were first observed in the source track
/// list; within a bucket, tracks keep their source-playlist order. Neither is
/// ever re-sorted.
#[derive(Debug, Default)]
pub struct GenreGroup {
    order: Vec<String>,
    buckets: HashMap<String, Vec<String>>,
}

impl GenreGroup {
    pub fn insert(&mut self, genre: &str, track_id: String) {
        if !self.buckets.contains_key(genre) {
            self.order.push(genre.to_string());
        }
        self.buckets
            .entry(genre.to_string())
            .or_default()
            .push(track_id);
    }

    /// Iterates buckets in genre first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .filter_map(|genre| Some((genre.as_str(), self.buckets.get(genre)?.as_slice())))
    }

    pub fn tracks_for(&self, genre: &str) -> Option<&[String]> {
        self.buckets.get(genre).map(Vec::as_slice)
    }

    /// Number of genre buckets.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of tracks across all buckets.
    pub fn track_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Extracts lead-artist ids from the track list in first-seen order, without
/// duplicates. This is the exact set of remote lookups the resolver performs.
pub fn unique_artist_ids(tracks: &[Track]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tracks.len());
    let mut ids = Vec::new();

    for track in tracks {
        if let Some(artist_id) = &track.artist_id {
            if seen.insert(artist_id.as_str()) {
                ids.push(artist_id.clone());
            }
        }
    }

    ids
}

/// Partitions the tracks into genre buckets given an artist-to-genre map.
///
/// Every input track lands in exactly one bucket: tracks whose artist is
/// absent from the map (or who have no artist at all) go to
/// [`UNCLASSIFIED`]. No track is dropped or duplicated.
pub fn assemble_groups(tracks: &[Track], genres_by_artist: &HashMap<String, String>) -> GenreGroup {
    let mut groups = GenreGroup::default();

    for track in tracks {
        let genre = track
            .artist_id
            .as_ref()
            .and_then(|artist_id| genres_by_artist.get(artist_id))
            .map(String::as_str)
            .unwrap_or(UNCLASSIFIED);
        groups.insert(genre, track.id.clone());
    }

    groups
}

/// Groups every track of the source playlist by the genre of its lead artist.
///
/// Resolves each unique artist once (concurrently, bounded) and then
/// assembles the buckets in source order. An auth rejection from the resolver
/// aborts the stage; any other per-artist failure has already been degraded
/// to [`UNCLASSIFIED`] by the resolver.
pub async fn group_by_genre(
    client: &Client,
    token: &str,
    tracks: &[Track],
    cancel: &CancelFlag,
) -> Result<GenreGroup> {
    let artist_ids = unique_artist_ids(tracks);
    let resolved = resolver::resolve_genres(client, token, &artist_ids, cancel).await?;

    if !resolved.degraded().is_empty() {
        warning!(
            "{} of {} artists could not be resolved; their tracks go to '{}'",
            resolved.degraded().len(),
            artist_ids.len(),
            UNCLASSIFIED
        );
    }

    Ok(assemble_groups(tracks, resolved.by_artist()))
}
