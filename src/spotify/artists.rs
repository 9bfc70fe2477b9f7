use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::{Result, SplitError},
    spotify::send_with_retry,
    types::Artist,
};

/// Fetches a single artist from the Spotify Web API.
///
/// The returned [`Artist`] carries the list of genres Spotify reports for it;
/// the splitter only ever uses the first entry. An unknown artist id maps to
/// [`SplitError::Resolution`] so the caller can degrade the affected tracks
/// to the unclassified bucket instead of aborting the run.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `token` - Valid access token for Spotify API authentication
/// * `artist_id` - Spotify ID of the artist to look up
///
/// # Errors
///
/// - `SplitError::Auth` if the token was rejected (fatal upstream)
/// - `SplitError::Resolution` if the artist does not exist
/// - `SplitError::RateLimit` / `SplitError::Http` after retries are exhausted
pub async fn get_artist(client: &Client, token: &str, artist_id: &str) -> Result<Artist> {
    let api_url = format!(
        "{uri}/artists/{id}",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    let response = send_with_retry(
        || client.get(&api_url).bearer_auth(token),
        "artist lookup",
    )
    .await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(SplitError::Resolution {
            artist_id: artist_id.to_string(),
            reason: "artist not found".to_string(),
        });
    }

    let response = response.error_for_status()?;
    Ok(response.json::<Artist>().await?)
}
