//! Storage layer for flightbook.
//!
//! Both data files are JSON arrays read and written whole. Loading is
//! tolerant: a missing or corrupt file yields an empty list plus a warning
//! instead of an error, so the interactive session always has something to
//! work with.
//!
//! - [`Catalog`] is the read-only flight list.
//! - [`BookingStore`] is the append-only booking list.

pub mod bookings;
pub mod catalog;

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use bookings::BookingStore;
pub use catalog::Catalog;

/// Indentation used when writing data files.
const INDENT: &[u8] = b"    ";

/// Data loaded from disk, possibly degraded.
///
/// When `warning` is set, `data` is a fallback (usually empty) and the
/// warning says what went wrong.
#[derive(Debug)]
pub struct Loaded<T> {
    /// The loaded or fallback data.
    pub data: T,
    /// Why the data is a fallback, if it is.
    pub warning: Option<Error>,
}

impl<T> Loaded<T> {
    /// Data that loaded cleanly.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            data,
            warning: None,
        }
    }

    /// Transform the data, keeping the warning.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            data: f(self.data),
            warning: self.warning,
        }
    }
}

impl<T: Default> Loaded<T> {
    /// Empty fallback data with the reason it's empty.
    #[must_use]
    pub fn empty_with(warning: Error) -> Self {
        Self {
            data: T::default(),
            warning: Some(warning),
        }
    }
}

/// Read a data file into a string.
fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Parse file contents that must be a JSON array.
fn parse_array(path: &Path, text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => Err(Error::NotAnArray {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(Error::FileParse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overwrite a data file with `records`, pretty-printed.
///
/// The content goes to a temporary file next to the real file which is then
/// renamed over it, so a failed write leaves the old file intact. A symlinked
/// data file is written through to its target, and an existing file keeps its
/// permissions.
fn write_array(path: &Path, records: &[Value]) -> Result<()> {
    let write_err = |source: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;

    let (target, existing) = match std::fs::canonicalize(path) {
        Ok(resolved) => {
            let meta = std::fs::metadata(&resolved).map_err(write_err)?;
            (resolved, Some(meta.permissions()))
        }
        Err(_) => (path.to_path_buf(), None),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&buf).map_err(write_err)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Create `path` holding an empty list if it doesn't exist yet.
///
/// Parent directories are created as needed. Returns `true` if the file was
/// created.
///
/// # Errors
///
/// Returns an error if a directory or the file can't be created.
pub fn create_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    write_array(path, &[])?;
    info!("Created empty data file at {}", path.display());
    Ok(true)
}
