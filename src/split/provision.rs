use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    error::{Result, SplitError},
    spotify,
    types::{CreatePlaylistRequest, CreatePlaylistResponse},
    warning,
};

/// Prefix used in generated playlist names.
pub const APP_NAME: &str = "sposplit";

/// Fixed description for every destination playlist.
pub const PLAYLIST_DESCRIPTION: &str = "A playlist generated by sposplit";

/// JPEG uploaded (base64-encoded) as the cover of every destination playlist.
const COVER_IMAGE: &[u8] = include_bytes!("../../assets/cover.jpg");

/// Deterministic name for a destination playlist.
pub fn playlist_name(genre: &str, source_name: &str) -> String {
    format!("{APP_NAME}: {genre} songs from {source_name}")
}

/// Builds the creation request for one genre's destination playlist.
/// Destination playlists are private and non-collaborative.
pub fn playlist_request(genre: &str, source_name: &str) -> CreatePlaylistRequest {
    CreatePlaylistRequest {
        name: playlist_name(genre, source_name),
        description: PLAYLIST_DESCRIPTION.to_string(),
        public: false,
        collaborative: false,
    }
}

/// Creates the destination playlist for one genre and uploads its cover.
///
/// A cover upload failure is logged and swallowed: the playlist exists and is
/// usable without a custom cover, and failing the whole genre over a missing
/// image would be out of proportion. A rejected credential is the exception;
/// it is fatal wherever it surfaces, so no further doomed calls go out. A
/// rejected creation request maps to [`SplitError::Create`] for this genre
/// only.
pub async fn create_genre_playlist(
    client: &Client,
    token: &str,
    user_id: &str,
    genre: &str,
    source_name: &str,
) -> Result<CreatePlaylistResponse> {
    let request = playlist_request(genre, source_name);

    let created = match spotify::playlist::create(client, token, user_id, &request).await {
        Ok(created) => created,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            return Err(SplitError::Create {
                genre: genre.to_string(),
                reason: e.to_string(),
            });
        }
    };

    let cover_b64 = STANDARD.encode(COVER_IMAGE);
    match spotify::playlist::set_cover_image(client, token, &created.id, &cover_b64).await {
        Ok(()) => {}
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            warning!(
                "Failed to set a cover image for playlist {}: {}",
                created.id,
                e
            );
        }
    }

    Ok(created)
}
