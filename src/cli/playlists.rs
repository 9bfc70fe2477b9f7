use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{error, management::TokenManager, spotify, types::PlaylistTableRow, warning};

/// Lists the authenticated user's playlists as a table, optionally filtered
/// by a case-insensitive name search. The printed ids are what `sposplit
/// split` accepts.
pub async fn playlists(search: Option<String>) {
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

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let client = Client::new();
    let playlists =
        match spotify::playlist::get_user_playlists(&client, token_mgr.access_token()).await {
            Ok(playlists) => {
                pb.finish_and_clear();
                playlists
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch playlists: {}", e);
            }
        };

    let mut rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            name: p.name,
            id: p.id,
            tracks: p.tracks.total,
        })
        .collect();

    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if let Some(search_term) = search {
        let search_term = search_term.to_lowercase();
        rows.retain(|row| row.name.to_lowercase().contains(&search_term));
    }

    let table = Table::new(rows);
    println!("{}", table);
}
