//! The booking store.
//!
//! Every booking rewrites the whole file: load the existing list, append,
//! write the full list back. Existing records are carried as raw JSON so a
//! rewrite never alters them.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{parse_array, read_text, write_array, Loaded};
use crate::booking::{belongs_to, Booking};
use crate::error::Result;

/// Handle on the booking store file.
#[derive(Debug, Clone)]
pub struct BookingStore {
    path: PathBuf,
}

impl BookingStore {
    /// Point at a booking store file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the booking store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all stored bookings, in file order.
    ///
    /// A missing or blank file is simply an empty store. An unreadable,
    /// malformed or non-list file also yields an empty store, with a warning.
    /// The file itself is never touched here.
    #[must_use]
    pub fn load(&self) -> Loaded<Vec<Value>> {
        let parsed = match read_text(&self.path) {
            Err(err) if err.is_not_found() => {
                debug!("No booking store at {} yet", self.path.display());
                return Loaded::ok(Vec::new());
            }
            Ok(text) if text.trim().is_empty() => return Loaded::ok(Vec::new()),
            Ok(text) => parse_array(&self.path, &text),
            Err(err) => Err(err),
        };

        match parsed {
            Ok(records) => Loaded::ok(records),
            Err(err) => {
                warn!("Booking store unusable, treating as empty: {err}");
                Loaded::empty_with(err)
            }
        }
    }

    /// Overwrite the store with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be written. The previous contents
    /// are left in place in that case.
    pub fn save(&self, records: &[Value]) -> Result<()> {
        write_array(&self.path, records)
    }

    /// Append `booking` to an already loaded list and persist it.
    ///
    /// Returns the number of records now in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking can't be serialized or the store
    /// can't be written.
    pub fn append_to(&self, mut records: Vec<Value>, booking: &Booking) -> Result<usize> {
        records.push(booking.to_value()?);
        self.save(&records)?;
        info!(
            user = %booking.user_name,
            flight = %booking.flight_text(),
            "Saved booking ({} in store)",
            records.len()
        );
        Ok(records.len())
    }

    /// Bookings made under `user_name`, ignoring case, in file order.
    #[must_use]
    pub fn find_by_user(&self, user_name: &str) -> Loaded<Vec<Value>> {
        self.load().map(|records| {
            records
                .into_iter()
                .filter(|record| belongs_to(record, user_name))
                .collect()
        })
    }
}
