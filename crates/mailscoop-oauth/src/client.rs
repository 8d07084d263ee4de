//! Authorization Code Flow client for Google's `OAuth2` endpoints.

use std::collections::HashMap;

use reqwest::Client;
use url::Url;

use crate::credentials::InstalledCredentials;
use crate::error::Result;
use crate::pkce::PkceChallenge;
use crate::token::{ErrorResponse, Token, TokenResponse};

/// Google authorization endpoint.
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google token endpoint.
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// `OAuth2` client for the installed-app authorization code flow.
///
/// Holds the credentials and an optional PKCE pair; the same client is used
/// to build the consent URL, exchange the redirected code, and refresh
/// expired tokens.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: InstalledCredentials,
    pkce: Option<PkceChallenge>,
    http_client: Client,
}

impl OAuthClient {
    /// Creates a new client from installed-app credentials.
    #[must_use]
    pub fn new(credentials: InstalledCredentials) -> Self {
        Self {
            credentials,
            pkce: None,
            http_client: Client::new(),
        }
    }

    /// Enables PKCE for the authorization flow (recommended for public
    /// clients).
    #[must_use]
    pub fn with_pkce(mut self) -> Self {
        self.pkce = Some(PkceChallenge::generate());
        self
    }

    /// Builds the authorization URL for user consent.
    ///
    /// The user should be sent to this URL in a browser; Google redirects
    /// back with a `code` query parameter. `access_type=offline` and
    /// `prompt=consent` are set so a refresh token is issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(AUTH_URL)?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.credentials.client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", self.credentials.redirect_uri())
                .append_pair("scope", crate::GMAIL_READONLY_SCOPE)
                .append_pair("access_type", "offline")
                .append_pair("prompt", "consent");

            if let Some(state_val) = state {
                pairs.append_pair("state", state_val);
            }

            if let Some(pkce) = &self.pkce {
                pairs
                    .append_pair("code_challenge", pkce.challenge())
                    .append_pair("code_challenge_method", pkce.method());
            }
        }

        Ok(url)
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the token exchange fails.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("client_id", &self.credentials.client_id);
        params.insert("client_secret", &self.credentials.client_secret);
        params.insert("redirect_uri", self.credentials.redirect_uri());

        if let Some(pkce) = &self.pkce {
            params.insert("code_verifier", pkce.verifier());
        }

        let response = self
            .http_client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: ErrorResponse = response.json().await?;
            return Err(error.into_error());
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(Token::from_response(token_response))
    }

    /// Refreshes an access token using a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh fails or if the token has no refresh
    /// token.
    pub async fn refresh_token(&self, token: &Token) -> Result<Token> {
        let refresh_token = token.refresh_token()?;

        let mut params = HashMap::new();
        params.insert("grant_type", "refresh_token");
        params.insert("refresh_token", refresh_token);
        params.insert("client_id", &self.credentials.client_id);
        params.insert("client_secret", &self.credentials.client_secret);

        let response = self
            .http_client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: ErrorResponse = response.json().await?;
            return Err(error.into_error());
        }

        let token_response: TokenResponse = response.json().await?;
        let mut new_token = Token::from_response(token_response);

        // Preserve refresh token if not returned
        if new_token.refresh_token.is_none() {
            new_token.refresh_token.clone_from(&token.refresh_token);
        }

        Ok(new_token)
    }
}
