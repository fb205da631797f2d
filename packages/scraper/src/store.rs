//! On-disk result cache.
//!
//! The store directory holds two files:
//!
//! - `saved-results.json`: a JSON array of compact
//!   [`EncodedResult`](sbte_results_codec::EncodedResult) tuples, one per
//!   roll, in roll order.
//! - `invalid-rolls.txt`: newline-separated roll numbers the portal had no
//!   usable result for.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use sbte_results_codec::{EncodedResult, decode_dataset, encode_result};
use sbte_results_models::{CodeTables, ParsedResult};

use crate::ScrapeError;

/// File name of the result cache inside the store directory.
pub const SAVED_RESULTS_FILE: &str = "saved-results.json";

/// File name of the invalid-roll list inside the store directory.
pub const INVALID_ROLLS_FILE: &str = "invalid-rolls.txt";

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Reads and writes the cache files in one directory.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn saved_results_path(&self) -> PathBuf {
        self.dir.join(SAVED_RESULTS_FILE)
    }

    #[must_use]
    pub fn invalid_rolls_path(&self) -> PathBuf {
        self.dir.join(INVALID_ROLLS_FILE)
    }

    /// Loads every cached result keyed by roll.
    ///
    /// A missing file is an empty cache. A file that is not a valid
    /// dataset is logged and treated as empty; the next save replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Io`] if the file exists but cannot be read.
    pub fn load_results(
        &self,
        tables: &CodeTables,
    ) -> Result<BTreeMap<String, ParsedResult>, ScrapeError> {
        let path = self.saved_results_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let text = std::fs::read_to_string(&path)?;
        let encoded: Vec<EncodedResult> = match serde_json::from_str(&text) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("Ignoring corrupt result cache {}: {e}", path.display());
                return Ok(BTreeMap::new());
            }
        };

        let results = decode_dataset(encoded, tables)
            .into_iter()
            .map(|r| (r.student.roll.clone(), r))
            .collect::<BTreeMap<_, _>>();
        log::debug!("Loaded {} cached result(s) from {}", results.len(), path.display());

        Ok(results)
    }

    /// Replaces the result cache with `results`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn save_results(&self, results: &BTreeMap<String, ParsedResult>) -> Result<(), ScrapeError> {
        ensure_dir(&self.dir)?;
        let encoded = results.values().map(encode_result).collect::<Vec<_>>();
        let json = serde_json::to_string(&encoded)?;
        std::fs::write(self.saved_results_path(), json)?;
        log::debug!("Saved {} result(s) to {}", encoded.len(), self.dir.display());
        Ok(())
    }

    /// Loads the set of known-invalid rolls.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Io`] if the file exists but cannot be read.
    pub fn load_invalid_rolls(&self) -> Result<BTreeSet<String>, ScrapeError> {
        let path = self.invalid_rolls_path();
        if !path.exists() {
            return Ok(BTreeSet::new());
        }

        Ok(std::fs::read_to_string(&path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Appends rolls not already listed to the invalid-roll file.
    ///
    /// Returns how many rolls were newly recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Io`] if the file cannot be read or written.
    pub fn append_invalid_rolls<'a>(
        &self,
        rolls: impl IntoIterator<Item = &'a str>,
    ) -> Result<usize, ScrapeError> {
        let mut known = self.load_invalid_rolls()?;
        let fresh = rolls
            .into_iter()
            .filter(|roll| known.insert((*roll).to_string()))
            .collect::<Vec<_>>();

        if fresh.is_empty() {
            return Ok(0);
        }

        ensure_dir(&self.dir)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.invalid_rolls_path())?;
        for roll in &fresh {
            writeln!(file, "{roll}")?;
        }

        Ok(fresh.len())
    }
}
