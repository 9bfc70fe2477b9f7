use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::send_with_retry,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        GetUserPlaylistsResponse, Playlist,
    },
};

/// Page size for the user playlists endpoint (Spotify's maximum).
const PAGE_LIMIT: u32 = 50;

/// Creates a new private playlist under the given user account.
///
/// A rejected request body (for example a name Spotify considers too long)
/// propagates as an HTTP error; the provisioner converts it into a per-genre
/// create failure so the orchestrator keeps processing the remaining genres.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `token` - Valid access token for Spotify API authentication
/// * `user_id` - Owner account the playlist is created under
/// * `request` - Name, description and visibility of the new playlist
pub async fn create(
    client: &Client,
    token: &str,
    user_id: &str,
    request: &CreatePlaylistRequest,
) -> Result<CreatePlaylistResponse> {
    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = &config::spotify_apiurl(),
        user = user_id
    );

    let response = send_with_retry(
        || client.post(&api_url).bearer_auth(token).json(request),
        "playlist creation",
    )
    .await?;

    let response = response.error_for_status()?;
    Ok(response.json::<CreatePlaylistResponse>().await?)
}

/// Uploads a cover image for a playlist.
///
/// The body is a base64-encoded JPEG as required by the endpoint. Callers
/// treat a failure here as cosmetic: the playlist is already usable without
/// a custom cover.
pub async fn set_cover_image(
    client: &Client,
    token: &str,
    playlist_id: &str,
    image_b64: &str,
) -> Result<()> {
    let api_url = format!(
        "{uri}/playlists/{id}/images",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = image_b64.to_string();
    let response = send_with_retry(
        || {
            client
                .put(&api_url)
                .bearer_auth(token)
                .header("Content-Type", "image/jpeg")
                .body(body.clone())
        },
        "cover image upload",
    )
    .await?;

    response.error_for_status()?;
    Ok(())
}

/// Adds up to 100 track URIs to a playlist in a single call.
///
/// Batching across the 100-URI cap is the populator's job; anything larger
/// than one batch must never reach this function.
pub async fn add_tracks(
    client: &Client,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<AddTracksResponse> {
    debug_assert!(uris.len() <= 100);

    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let request = AddTracksRequest {
        uris: uris.to_vec(),
    };

    let response = send_with_retry(
        || client.post(&api_url).bearer_auth(token).json(&request),
        "adding tracks",
    )
    .await?;

    let response = response.error_for_status()?;
    Ok(response.json::<AddTracksResponse>().await?)
}

/// Retrieves all playlists of the authenticated user, following pagination.
///
/// Used by the `playlists` CLI command and to resolve a playlist given by
/// name instead of by id.
pub async fn get_user_playlists(client: &Client, token: &str) -> Result<Vec<Playlist>> {
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut next_url = Some(format!(
        "{uri}/me/playlists?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = PAGE_LIMIT
    ));

    while let Some(api_url) = next_url {
        let response = send_with_retry(
            || client.get(&api_url).bearer_auth(token),
            "user playlists",
        )
        .await?;

        let response = response.error_for_status()?;
        let page = response.json::<GetUserPlaylistsResponse>().await?;

        playlists.extend(page.items);
        next_url = page.next;
    }

    Ok(playlists)
}
