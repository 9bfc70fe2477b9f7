use std::path::PathBuf;

use chrono::Utc;

use crate::types::Token;

/// Narrow read/write interface over the stored bearer token.
///
/// The token itself comes from an external authentication flow and is handed
/// to sposplit via `sposplit token <ACCESS_TOKEN>`. The manager never
/// refreshes it; once Spotify rejects the token the user has to supply a
/// fresh one.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(access_token: String, expires_in: u64) -> Self {
        TokenManager {
            token: Token {
                access_token,
                expires_in,
                obtained_at: Utc::now().timestamp() as u64,
            },
        }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(Self::token_path(), json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Whether the stored token has likely expired, with a small safety
    /// margin. Only used to warn before a run; Spotify has the final word.
    pub fn looks_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in.saturating_sub(240)
    }

    pub fn access_token(&self) -> &str {
        &self.token.access_token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sposplit/cache/token.json");
        path
    }
}
