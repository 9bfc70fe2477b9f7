use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::send_with_retry,
    types::{PlaylistTracksResponse, Track},
};

/// Page size for the playlist tracks endpoint (Spotify's maximum).
const PAGE_LIMIT: u32 = 100;

/// Enumerates every track of a playlist, following the paginated `next` hrefs
/// until the playlist is exhausted.
///
/// Items without a track id (local files, removed tracks) are skipped; they
/// cannot be re-added to a destination playlist by URI anyway. The lead
/// artist is the first listed artist of each track and may be absent, in
/// which case the track later lands in the unclassified bucket without an
/// artist lookup.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify ID of the source playlist
///
/// # Errors
///
/// - `SplitError::Auth` if the token was rejected (fatal upstream)
/// - `SplitError::RateLimit` / `SplitError::Http` after retries are exhausted
pub async fn get_playlist_tracks(
    client: &Client,
    token: &str,
    playlist_id: &str,
) -> Result<Vec<Track>> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut next_url = Some(format!(
        "{uri}/playlists/{id}/tracks?limit={limit}",
        uri = &config::spotify_apiurl(),
        id = playlist_id,
        limit = PAGE_LIMIT
    ));

    while let Some(api_url) = next_url {
        let response = send_with_retry(
            || client.get(&api_url).bearer_auth(token),
            "playlist tracks",
        )
        .await?;

        let response = response.error_for_status()?;
        let page = response.json::<PlaylistTracksResponse>().await?;

        for item in page.items {
            let Some(track) = item.track else { continue };
            let Some(id) = track.id else { continue };
            let artist_id = track.artists.first().and_then(|a| a.id.clone());
            tracks.push(Track { id, artist_id });
        }

        next_url = page.next;
    }

    Ok(tracks)
}
