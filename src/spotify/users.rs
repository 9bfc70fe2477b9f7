use reqwest::Client;

use crate::{config, error::Result, spotify::send_with_retry, types::CurrentUser};

/// Fetches the authenticated user's profile.
///
/// The profile id is the owner account under which destination playlists are
/// created. It is resolved once per run and passed explicitly through the
/// pipeline rather than kept in any ambient state.
pub async fn get_current_user(client: &Client, token: &str) -> Result<CurrentUser> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let response =
        send_with_retry(|| client.get(&api_url).bearer_auth(token), "current user").await?;

    let response = response.error_for_status()?;
    Ok(response.json::<CurrentUser>().await?)
}
