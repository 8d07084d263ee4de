//! Append-only ledger of processed message slugs.
//!
//! Backed by a newline-delimited UTF-8 text file. There is no file locking:
//! the design assumes a single scheduled job per mailbox, and concurrent
//! runs may race on read-modify-append.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Default ledger file name, relative to the working directory.
pub const DEFAULT_LEDGER_FILE: &str = "visited.txt";

/// Append-only record of processed-message slugs.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }
}

impl Ledger {
    /// Creates a ledger backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the ordered sequence of slugs currently recorded.
    ///
    /// A missing file yields an empty sequence, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Appends each slug not already present, one per line.
    ///
    /// The on-disk contents are re-read first so repeated runs never write
    /// duplicate entries; the same check dedupes within the batch. Returns
    /// the number of slugs actually written.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read or written.
    pub fn append(&self, slugs: &[String]) -> io::Result<usize> {
        let mut seen: HashSet<String> = self.read()?.into_iter().collect();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut written = 0;
        for slug in slugs {
            if seen.insert(slug.clone()) {
                writeln!(file, "{slug}")?;
                written += 1;
            }
        }

        debug!(written, total = seen.len(), "ledger appended");
        Ok(written)
    }
}
