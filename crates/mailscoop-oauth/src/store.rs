//! File-backed token persistence.
//!
//! Stores the `OAuth2` token as JSON at a caller-supplied path so runs can
//! reuse and refresh the same grant. The store is an explicit dependency of
//! whoever drives authentication; nothing here touches global state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::token::Token;

/// Persists the `OAuth2` token between runs.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored token, if any.
    ///
    /// A missing file is not an error; it means no grant has been stored
    /// yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Token>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = serde_json::from_str(&raw)?;
                Ok(Some(token))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no stored token at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Saves the token, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, token: &Token) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, json)?;
        debug!("stored token at {}", self.path.display());
        Ok(())
    }
}
