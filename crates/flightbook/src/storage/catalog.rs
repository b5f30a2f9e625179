//! The read-only flight catalog.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{parse_array, read_text, Loaded};

/// Handle on the catalog file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    /// Point at a catalog file. Nothing is read until [`Catalog::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every raw flight record, in file order.
    ///
    /// Never fails: a missing, unreadable, malformed or non-list file gives
    /// an empty catalog with the reason attached as a warning. Individual
    /// records are not validated here.
    #[must_use]
    pub fn load(&self) -> Loaded<Vec<Value>> {
        debug!(
            "Attempting to load flights from {} (working directory: {})",
            self.path.display(),
            std::env::current_dir()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default()
        );

        match read_text(&self.path).and_then(|text| parse_array(&self.path, &text)) {
            Ok(records) => {
                info!("Loaded {} catalog records", records.len());
                Loaded::ok(records)
            }
            Err(err) => {
                warn!("Flight catalog unavailable: {err}");
                Loaded::empty_with(err)
            }
        }
    }
}
