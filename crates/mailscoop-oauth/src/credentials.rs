//! Installed-application client credentials.
//!
//! Google's developer console exports a `credentials.json` for installed
//! (desktop) applications; this module loads that shape.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Loopback redirect used by the out-of-browser authorization flow.
const LOOPBACK_REDIRECT: &str = "http://localhost";

/// Client credentials for an installed application.
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledCredentials {
    /// Client ID issued by the provider.
    pub client_id: String,
    /// Client secret. Installed-app secrets are not confidential, but the
    /// token endpoint still requires one.
    pub client_secret: String,
    /// Registered redirect URIs.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// On-disk wrapper: `{"installed": {...}}`.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<InstalledCredentials>,
}

impl InstalledCredentials {
    /// Loads credentials from a Google-format `credentials.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// does not contain an `installed` section.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let file: CredentialsFile = serde_json::from_str(&raw)?;
        file.installed.ok_or_else(|| {
            Error::InvalidCredentials("missing \"installed\" section".to_string())
        })
    }

    /// Returns the redirect URI to use for the authorization flow.
    ///
    /// Prefers the first registered URI, falling back to the loopback
    /// address Google assigns installed apps by default.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map_or(LOOPBACK_REDIRECT, String::as_str)
    }
}
