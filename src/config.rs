//! Configuration management for sposplit.
//!
//! Handles loading configuration values from environment variables and a
//! `.env` file in the platform-specific local data directory
//! (`sposplit/.env`). Environment variables that are already set take
//! precedence over the file.

use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and, if a
/// `.env` file is present under `sposplit/.env`, loads it. A missing file is
/// not an error: every variable has a default or can be set in the
/// environment directly.
///
/// # Errors
///
/// Returns an error string if the parent directory cannot be created or the
/// `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sposplit/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the Spotify Web API base URL.
///
/// Reads the `SPOTIFY_API_URL` environment variable and falls back to the
/// public `https://api.spotify.com/v1` endpoint when unset. Overriding it is
/// mainly useful for pointing the client at a mock server.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}
