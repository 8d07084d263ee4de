//! Non-interactive credential acquisition.
//!
//! The token store and `OAuth2` client are explicit parameters; the
//! orchestrator never reaches for hidden credential-cache state. The
//! interactive consent step (browser URL, redirected code) belongs to the
//! caller; this module only covers what can happen without a user present.

use mailscoop_oauth::{OAuthClient, Token, TokenStore};
use tracing::{debug, info};

use crate::error::Result;

/// Produces a usable token from the store without user interaction.
///
/// A stored valid token is returned as-is. A stored expired token with a
/// refresh token is refreshed and re-saved. Returns `Ok(None)` when an
/// interactive authorization is required (no stored token, or an expired
/// one that cannot be refreshed).
///
/// # Errors
///
/// Returns a credential error if the store is unreadable or the refresh
/// call fails. Fatal for the run, before any fetch.
pub async fn load_or_refresh_token(
    client: &OAuthClient,
    store: &TokenStore,
) -> Result<Option<Token>> {
    let Some(token) = store.load()? else {
        debug!("no stored token");
        return Ok(None);
    };

    if token.is_valid() {
        debug!("stored token still valid");
        return Ok(Some(token));
    }

    if token.refresh_token.is_none() {
        debug!("stored token expired with no refresh token");
        return Ok(None);
    }

    info!("refreshing expired access token");
    let refreshed = client.refresh_token(&token).await?;
    store.save(&refreshed)?;
    Ok(Some(refreshed))
}
