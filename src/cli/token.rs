use crate::{error, management::TokenManager, success};

/// Stores an externally obtained bearer token for later runs.
///
/// The token is written to the local cache the other commands read from.
/// sposplit never refreshes it; once it expires, a fresh one has to be
/// stored the same way.
pub async fn store_token(access_token: String, expires_in: u64) {
    let token_mgr = TokenManager::new(access_token, expires_in);

    if let Err(e) = token_mgr.persist().await {
        error!("Failed to store the token: {}", e);
    }

    success!("Token stored. It is valid for roughly {} seconds.", expires_in);
}
