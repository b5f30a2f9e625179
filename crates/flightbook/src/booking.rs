//! Booking records.
//!
//! A [`Booking`] is a snapshot of a flight taken at booking time. Once written
//! to the store it is never modified, and it survives even if the flight later
//! disappears from the catalog.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::flight::{date_portion, value_text, Flight};

/// Placeholder for fields missing from a stored booking.
pub const MISSING_FIELD: &str = "N/A";

/// A confirmed booking.
///
/// Field order here is the key order written to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    /// Who booked.
    pub user_name: String,
    /// Copied from the flight, verbatim.
    pub flight_number: Value,
    /// Copied from the flight.
    pub origin: String,
    /// Copied from the flight.
    pub destination: String,
    /// Copied from the flight, verbatim.
    pub departure: String,
    /// Copied from the flight, verbatim.
    pub price: Value,
    /// When the booking was made, local time.
    pub booking_date: String,
}

impl Booking {
    /// Snapshot `flight` for `user_name` at `booked_at`.
    #[must_use]
    pub fn new(user_name: impl Into<String>, flight: &Flight, booked_at: NaiveDateTime) -> Self {
        Self {
            user_name: user_name.into(),
            flight_number: flight.flight_number.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure: flight.departure.clone(),
            price: flight.price.clone(),
            booking_date: format_booking_date(booked_at),
        }
    }

    /// Flight number as shown to the user.
    #[must_use]
    pub fn flight_text(&self) -> String {
        value_text(&self.flight_number)
    }

    /// Convert to the raw form kept in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// ISO-8601 local timestamp with microseconds, omitted when zero.
#[must_use]
pub fn format_booking_date(at: NaiveDateTime) -> String {
    let micros = at.nanosecond() / 1_000;
    if micros == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        format!("{}.{micros:06}", at.format("%Y-%m-%dT%H:%M:%S"))
    }
}

/// Check whether a stored record belongs to `user_name`, ignoring case.
///
/// Records without a string `user_name` never match.
#[must_use]
pub fn belongs_to(record: &Value, user_name: &str) -> bool {
    record
        .get("user_name")
        .and_then(Value::as_str)
        .is_some_and(|name| name.to_lowercase() == user_name.to_lowercase())
}

/// The user's answer to "which flight?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user typed `0`.
    Cancel,
    /// Zero-based index into the listed flights.
    Flight(usize),
}

impl Selection {
    /// Interpret terminal input against a listing of `count` flights.
    ///
    /// Only the literal `0` cancels. Numbers are 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelection`] for non-numeric input and
    /// [`Error::SelectionOutOfRange`] for numbers outside `1..=count`.
    pub fn parse(input: &str, count: usize) -> Result<Self> {
        let input = input.trim();
        if input == "0" {
            return Ok(Self::Cancel);
        }

        let choice: i64 = input.parse().map_err(|_| Error::InvalidSelection {
            input: input.to_string(),
        })?;

        usize::try_from(choice)
            .ok()
            .filter(|n| (1..=count).contains(n))
            .map(|n| Self::Flight(n - 1))
            .ok_or(Error::SelectionOutOfRange { choice, count })
    }
}

/// A stored booking prepared for display.
///
/// Built from a raw record so that missing or odd fields render instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingView {
    /// Flight number or `N/A`.
    pub flight_number: String,
    /// Origin or `N/A`.
    pub origin: String,
    /// Destination or `N/A`.
    pub destination: String,
    /// Departure date or `N/A`.
    pub departure_date: String,
    /// Price or `N/A`.
    pub price: String,
    /// Booking date or `N/A`.
    pub booked_on: String,
}

impl BookingView {
    /// Render a raw stored record.
    #[must_use]
    pub fn from_value(record: &Value) -> Self {
        Self {
            flight_number: field_text(record, "flight_number"),
            origin: field_text(record, "origin"),
            destination: field_text(record, "destination"),
            departure_date: date_portion(&field_text(record, "departure")).to_string(),
            price: field_text(record, "price"),
            booked_on: date_portion(&field_text(record, "booking_date")).to_string(),
        }
    }
}

impl fmt::Display for BookingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flight {} from {} to {} on {} - Price: ${}, Booked on: {}",
            self.flight_number,
            self.origin,
            self.destination,
            self.departure_date,
            self.price,
            self.booked_on
        )
    }
}

fn field_text(record: &Value, key: &str) -> String {
    record
        .get(key)
        .map_or_else(|| MISSING_FIELD.to_string(), value_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn aa1() -> Flight {
        Flight::from_value(&json!({
            "flight_number": "AA1",
            "origin": "NYC",
            "destination": "LAX",
            "departure": "2025-05-01T10:00:00",
            "price": 200
        }))
        .unwrap()
    }

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 20)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_new_copies_flight() {
        let booking = Booking::new("Bob", &aa1(), at(9, 30, 0, 123_456));

        assert_eq!(booking.user_name, "Bob");
        assert_eq!(booking.flight_number, json!("AA1"));
        assert_eq!(booking.flight_text(), "AA1");
        assert_eq!(booking.origin, "NYC");
        assert_eq!(booking.destination, "LAX");
        assert_eq!(booking.departure, "2025-05-01T10:00:00");
        assert_eq!(booking.price, json!(200));
        assert_eq!(booking.booking_date, "2025-04-20T09:30:00.123456");
    }

    #[test]
    fn test_new_copies_loosely_typed_fields() {
        let flight = Flight::from_value(&json!({
            "flight_number": 7,
            "origin": "NYC",
            "destination": "LAX",
            "departure": "2025-05-01T10:00:00",
            "price": "200"
        }))
        .unwrap();

        let value = Booking::new("Bob", &flight, at(9, 30, 0, 0)).to_value().unwrap();
        assert_eq!(value["flight_number"], json!(7));
        assert_eq!(value["price"], json!("200"));
        assert_eq!(
            BookingView::from_value(&value).to_string(),
            "Flight 7 from NYC to LAX on 2025-05-01 - Price: $200, Booked on: 2025-04-20"
        );
    }

    #[test]
    fn test_format_booking_date_without_micros() {
        assert_eq!(format_booking_date(at(23, 5, 9, 0)), "2025-04-20T23:05:09");
    }

    #[test]
    fn test_to_value_key_order() {
        let value = Booking::new("Bob", &aa1(), at(9, 30, 0, 0)).to_value().unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec![
                "user_name",
                "flight_number",
                "origin",
                "destination",
                "departure",
                "price",
                "booking_date"
            ]
        );
        assert_eq!(value["price"], json!(200));
    }

    #[test]
    fn test_belongs_to_ignores_case() {
        let record = json!({"user_name": "alice"});
        assert!(belongs_to(&record, "Alice"));
        assert!(belongs_to(&record, "ALICE"));
        assert!(!belongs_to(&record, "Alicia"));
        assert!(!belongs_to(&json!({"user_name": 5}), "5"));
        assert!(!belongs_to(&json!({}), ""));
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("0", 3).unwrap(), Selection::Cancel);
        assert_eq!(Selection::parse("1", 3).unwrap(), Selection::Flight(0));
        assert_eq!(Selection::parse(" 3 ", 3).unwrap(), Selection::Flight(2));
    }

    #[test]
    fn test_selection_out_of_range() {
        for input in ["4", "-1", "00"] {
            let err = Selection::parse(input, 3).unwrap_err();
            assert!(
                matches!(err, Error::SelectionOutOfRange { count: 3, .. }),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn test_selection_not_a_number() {
        for input in ["", "one", "1.5"] {
            let err = Selection::parse(input, 3).unwrap_err();
            assert!(matches!(err, Error::InvalidSelection { .. }), "accepted {input:?}");
        }
    }

    #[test]
    fn test_booking_view_full_record() {
        let record = Booking::new("Bob", &aa1(), at(9, 30, 0, 42))
            .to_value()
            .unwrap();

        let view = BookingView::from_value(&record);
        assert_eq!(
            view.to_string(),
            "Flight AA1 from NYC to LAX on 2025-05-01 - Price: $200, Booked on: 2025-04-20"
        );
    }

    #[test]
    fn test_booking_view_missing_fields() {
        let view = BookingView::from_value(&json!({"user_name": "Bob", "price": 99.5}));
        assert_eq!(
            view.to_string(),
            "Flight N/A from N/A to N/A on N/A - Price: $99.5, Booked on: N/A"
        );
    }
}
