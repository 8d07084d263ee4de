//! # mailscoop-oauth
//!
//! `OAuth2` authentication for the `MailScoop` Gmail attachment downloader.
//!
//! ## Features
//!
//! - **Authorization Code Flow** with PKCE against Google's `OAuth2` endpoints
//! - **Token management**: expiration checking, automatic refresh
//! - **Installed-app credentials**: loads Google's `credentials.json` shape
//! - **Token persistence**: file-backed JSON store, reloaded across runs
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailscoop_oauth::{InstalledCredentials, OAuthClient, TokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = InstalledCredentials::load("credentials.json")?;
//!     let client = OAuthClient::new(creds).with_pkce();
//!     let store = TokenStore::new("token.json");
//!
//!     // First run: send the user to the consent page.
//!     let auth_url = client.authorization_url(None)?;
//!     println!("Visit: {auth_url}");
//!
//!     // After the redirect, exchange the code and persist the token.
//!     let token = client.exchange_code("code_from_redirect").await?;
//!     store.save(&token)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Token Refresh
//!
//! ```ignore
//! if token.is_expired() {
//!     let token = client.refresh_token(&token).await?;
//!     store.save(&token)?;
//! }
//! ```
//!
//! The requested scope is read-only (`gmail.readonly`); this crate never asks
//! for more access than the downloader needs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod credentials;
mod error;
pub mod pkce;
pub mod store;
pub mod token;

pub use client::OAuthClient;
pub use credentials::InstalledCredentials;
pub use error::{Error, Result};
pub use pkce::PkceChallenge;
pub use store::TokenStore;
pub use token::Token;

/// Read-only Gmail scope requested during authorization.
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";
