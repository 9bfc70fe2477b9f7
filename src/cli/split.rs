use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    error,
    error::SplitError,
    info,
    management::TokenManager,
    split::{self, CancelFlag},
    spotify, success,
    types::{Playlist, SplitResultRow, SplitStatus},
    warning,
};

/// Runs the splitting pipeline on one playlist, given by id or by name, and
/// prints a per-genre result table.
///
/// Ctrl-C cancels the run: no further remote calls are issued, playlists
/// already created stay, and the report covers every genre that reached a
/// terminal state before the cancellation.
pub async fn split(playlist_query: String) {
    let token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sposplit token <ACCESS_TOKEN>\n Error: {}",
                e
            );
        }
    };
    if token_mgr.looks_expired() {
        warning!("The stored token looks expired; Spotify may reject it.");
    }
    let token = token_mgr.access_token();

    let client = Client::new();

    let user = match spotify::users::get_current_user(&client, token).await {
        Ok(user) => user,
        Err(e) => error!("Failed to resolve the account: {}", e),
    };

    let playlist = match find_playlist(&client, token, &playlist_query).await {
        Some(playlist) => playlist,
        None => error!(
            "No playlist with id or name '{}'. Run sposplit playlists to see them.",
            playlist_query
        ),
    };

    info!(
        "Splitting '{}' ({} tracks) by genre...",
        playlist.name, playlist.tracks.total
    );

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Resolving genres and creating playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let outcome = split::split_playlist(&client, token, &user.id, &playlist, &cancel).await;
    pb.finish_and_clear();

    if !outcome.results.is_empty() {
        let rows: Vec<SplitResultRow> = outcome.results.iter().map(SplitResultRow::from).collect();
        let table = Table::new(rows);
        println!("{}", table);
    }

    match outcome.aborted {
        Some(SplitError::Cancelled) => {
            warning!("Run cancelled. Playlists already created were kept.");
        }
        Some(e) => error!("Run aborted: {}", e),
        None => {
            let successes = outcome
                .results
                .iter()
                .filter(|r| r.status == SplitStatus::Success)
                .count();
            success!(
                "Done. {} of {} genre playlists fully populated.",
                successes,
                outcome.results.len()
            );
        }
    }
}

/// Looks the playlist up among the user's playlists, first by exact id, then
/// by case-insensitive name.
async fn find_playlist(client: &Client, token: &str, query: &str) -> Option<Playlist> {
    let playlists = match spotify::playlist::get_user_playlists(client, token).await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    if let Some(playlist) = playlists.iter().find(|p| p.id == query) {
        return Some(playlist.clone());
    }

    let query = query.to_lowercase();
    playlists
        .into_iter()
        .find(|p| p.name.to_lowercase() == query)
}
