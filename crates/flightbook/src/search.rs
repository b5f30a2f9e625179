//! Flight search over the raw catalog.
//!
//! Matching is a linear scan in catalog order: origin and destination compare
//! case-insensitively, and the departure's calendar date must equal the
//! requested date exactly.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::flight::{record_label, Flight, RecordError};

/// Format of the date the user searches for.
pub const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// What the user is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Origin to match, any case.
    pub origin: String,
    /// Destination to match, any case.
    pub destination: String,
    /// Departure date to match.
    pub date: NaiveDate,
}

impl SearchQuery {
    /// Build a query from raw terminal input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if `date` is not `YYYY-MM-DD`.
    pub fn parse(origin: &str, destination: &str, date: &str) -> Result<Self> {
        let date = date.trim();
        let parsed = NaiveDate::parse_from_str(date, SEARCH_DATE_FORMAT).map_err(|_| {
            Error::InvalidDate {
                input: date.to_string(),
            }
        })?;

        Ok(Self {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            date: parsed,
        })
    }

    /// Check whether a flight satisfies all three criteria.
    #[must_use]
    pub fn matches(&self, flight: &Flight) -> bool {
        flight.origin.to_lowercase() == self.origin.to_lowercase()
            && flight.destination.to_lowercase() == self.destination.to_lowercase()
            && flight.departure_date() == self.date
    }
}

/// A catalog record the search could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// The record's flight number, or `Unknown`.
    pub label: String,
    /// Why it was skipped.
    pub reason: RecordError,
}

impl SkippedRecord {
    /// The warning line shown to the user.
    #[must_use]
    pub fn warning(&self) -> String {
        format!("Warning: Skipping flight due to {}: {}", self.reason, self.label)
    }
}

/// Result of scanning the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Matching flights, in catalog order.
    pub matches: Vec<Flight>,
    /// Records that were skipped, in catalog order.
    pub skipped: Vec<SkippedRecord>,
}

/// Scan `records` for flights matching `query`.
///
/// Malformed records are collected in [`SearchOutcome::skipped`] and do not
/// stop the scan.
#[must_use]
pub fn search(records: &[Value], query: &SearchQuery) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    for record in records {
        match Flight::from_value(record) {
            Ok(flight) => {
                if query.matches(&flight) {
                    outcome.matches.push(flight);
                }
            }
            Err(reason) => {
                let label = record_label(record);
                warn!(flight = %label, %reason, "skipping catalog record");
                outcome.skipped.push(SkippedRecord { label, reason });
            }
        }
    }

    debug!(
        origin = %query.origin,
        destination = %query.destination,
        date = %query.date,
        matches = outcome.matches.len(),
        skipped = outcome.skipped.len(),
        "search finished"
    );
    outcome
}
