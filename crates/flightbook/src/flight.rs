//! Flight catalog records.
//!
//! The catalog file is plain JSON written by hand, so records are read as raw
//! [`serde_json::Value`]s and promoted to [`Flight`] one at a time. A record
//! that can't be promoted is skipped by the caller, never fatal.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

/// Fields every catalog record must carry.
///
/// Only `origin`, `destination` and `departure` are type-checked; the flight
/// number and price are carried as whatever JSON the catalog holds.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "origin",
    "destination",
    "departure",
    "flight_number",
    "price",
];

/// Format of the `departure` timestamp.
pub const DEPARTURE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Label used for records without a flight number.
const UNKNOWN_LABEL: &str = "Unknown";

/// Why a catalog record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// One or more required fields are absent.
    #[error("missing data")]
    MissingFields {
        /// The absent fields, in [`REQUIRED_FIELDS`] order.
        fields: Vec<&'static str>,
    },

    /// `departure` is not a `YYYY-MM-DDTHH:MM:SS` timestamp.
    #[error("invalid departure format")]
    InvalidDeparture {
        /// The rejected value.
        value: String,
    },

    /// A matched field is present but is not a string.
    #[error("unexpected error (field '{field}' should be {expected})")]
    InvalidField {
        /// Offending field.
        field: &'static str,
        /// What the field should hold.
        expected: &'static str,
    },

    /// The record itself is not a JSON object.
    #[error("unexpected error (record is not an object)")]
    NotAnObject,
}

/// A bookable flight from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// Flight identifier as stored, usually a string like `"AA1"`.
    pub flight_number: Value,
    /// Origin airport or city.
    pub origin: String,
    /// Destination airport or city.
    pub destination: String,
    /// Departure timestamp exactly as it appears in the catalog.
    pub departure: String,
    /// Ticket price as stored, so `200` stays `200`.
    pub price: Value,
    departs_at: NaiveDateTime,
}

impl Flight {
    /// Promote a raw catalog record to a flight.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] describing why the record can't be used.
    pub fn from_value(record: &Value) -> Result<Self, RecordError> {
        let Some(fields) = record.as_object() else {
            return Err(RecordError::NotAnObject);
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|key| !fields.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(RecordError::MissingFields { fields: missing });
        }

        let text = |field: &'static str| -> Result<String, RecordError> {
            fields[field]
                .as_str()
                .map(str::to_owned)
                .ok_or(RecordError::InvalidField {
                    field,
                    expected: "a string",
                })
        };

        let departure = text("departure")?;
        let departs_at = NaiveDateTime::parse_from_str(&departure, DEPARTURE_FORMAT).map_err(
            |_| RecordError::InvalidDeparture {
                value: departure.clone(),
            },
        )?;

        Ok(Self {
            flight_number: fields["flight_number"].clone(),
            origin: text("origin")?,
            destination: text("destination")?,
            departure,
            price: fields["price"].clone(),
            departs_at,
        })
    }

    /// Flight number as shown to the user.
    #[must_use]
    pub fn number_text(&self) -> String {
        value_text(&self.flight_number)
    }

    /// Calendar date of departure.
    #[must_use]
    pub fn departure_date(&self) -> NaiveDate {
        self.departs_at.date()
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flight {} from {} to {} on {} - Price: ${}",
            value_text(&self.flight_number),
            self.origin,
            self.destination,
            date_portion(&self.departure),
            value_text(&self.price)
        )
    }
}

/// Render a JSON value for the terminal: strings bare, anything else as JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Human label for a raw record, used in skip warnings.
#[must_use]
pub fn record_label(record: &Value) -> String {
    record
        .get("flight_number")
        .map_or_else(|| UNKNOWN_LABEL.to_string(), value_text)
}

/// The leading `YYYY-MM-DD` of an ISO timestamp.
///
/// Shorter strings are returned whole.
#[must_use]
pub fn date_portion(timestamp: &str) -> &str {
    timestamp
        .char_indices()
        .nth(10)
        .map_or(timestamp, |(end, _)| &timestamp[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aa1() -> Value {
        json!({
            "flight_number": "AA1",
            "origin": "NYC",
            "destination": "LAX",
            "departure": "2025-05-01T10:00:00",
            "price": 200
        })
    }

    #[test]
    fn test_from_value_valid() {
        let flight = Flight::from_value(&aa1()).unwrap();

        assert_eq!(flight.flight_number, json!("AA1"));
        assert_eq!(flight.number_text(), "AA1");
        assert_eq!(flight.origin, "NYC");
        assert_eq!(flight.destination, "LAX");
        assert_eq!(flight.departure, "2025-05-01T10:00:00");
        assert_eq!(flight.price, json!(200));
        assert_eq!(
            flight.departure_date(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_from_value_keeps_fractional_price() {
        let mut record = aa1();
        record["price"] = json!(199.99);

        let flight = Flight::from_value(&record).unwrap();
        assert_eq!(flight.price.to_string(), "199.99");
    }

    #[test]
    fn test_from_value_missing_fields() {
        let record = json!({"flight_number": "X9", "origin": "NYC"});

        let err = Flight::from_value(&record).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingFields {
                fields: vec!["destination", "departure", "price"]
            }
        );
        assert_eq!(err.to_string(), "missing data");
    }

    #[test]
    fn test_from_value_invalid_departure() {
        for bad in ["2025-05-01", "2025-05-01 10:00:00", "2025-13-01T10:00:00", "soon"] {
            let mut record = aa1();
            record["departure"] = json!(bad);

            let err = Flight::from_value(&record).unwrap_err();
            assert!(
                matches!(err, RecordError::InvalidDeparture { .. }),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_from_value_wrong_types() {
        let mut record = aa1();
        record["origin"] = json!(42);
        let err = Flight::from_value(&record).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidField {
                field: "origin",
                expected: "a string"
            }
        );

        let mut record = aa1();
        record["departure"] = json!(20_250_501);
        let err = Flight::from_value(&record).unwrap_err();
        assert!(err.to_string().contains("departure"));
    }

    #[test]
    fn test_from_value_accepts_any_number_and_price() {
        let mut record = aa1();
        record["flight_number"] = json!(7);
        record["price"] = json!("200");

        let flight = Flight::from_value(&record).unwrap();
        assert_eq!(flight.flight_number, json!(7));
        assert_eq!(flight.price, json!("200"));
        assert_eq!(
            flight.to_string(),
            "Flight 7 from NYC to LAX on 2025-05-01 - Price: $200"
        );
    }

    #[test]
    fn test_from_value_null_counts_as_present() {
        let mut record = aa1();
        record["destination"] = Value::Null;

        let err = Flight::from_value(&record).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidField {
                field: "destination",
                ..
            }
        ));
    }

    #[test]
    fn test_from_value_not_object() {
        assert_eq!(
            Flight::from_value(&json!(["AA1"])).unwrap_err(),
            RecordError::NotAnObject
        );
    }

    #[test]
    fn test_display() {
        let flight = Flight::from_value(&aa1()).unwrap();
        assert_eq!(
            flight.to_string(),
            "Flight AA1 from NYC to LAX on 2025-05-01 - Price: $200"
        );
    }

    #[test]
    fn test_record_label() {
        assert_eq!(record_label(&aa1()), "AA1");
        assert_eq!(record_label(&json!({"flight_number": 7})), "7");
        assert_eq!(record_label(&json!({"origin": "NYC"})), "Unknown");
        assert_eq!(record_label(&json!(3)), "Unknown");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("AA1")), "AA1");
        assert_eq!(value_text(&json!(199.5)), "199.5");
        assert_eq!(value_text(&Value::Null), "null");
    }

    #[test]
    fn test_date_portion() {
        assert_eq!(date_portion("2025-05-01T10:00:00"), "2025-05-01");
        assert_eq!(date_portion("2025-05-01"), "2025-05-01");
        assert_eq!(date_portion("N/A"), "N/A");
        assert_eq!(date_portion(""), "");
    }
}
