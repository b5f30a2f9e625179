//! Error types for flightbook.
//!
//! This module defines all error types used throughout the flightbook crate.
//! Most of them never reach the top of the program: data file errors ride
//! along as warnings on [`Loaded`](crate::storage::Loaded) values, and input
//! validation errors abort a single menu operation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Data File Errors ===
    /// The data file does not exist.
    #[error("'{}' not found", .path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The data file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file does not contain valid JSON.
    #[error("error reading '{}': invalid JSON ({source})", .path.display())]
    FileParse {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The data file holds valid JSON that is not a list.
    #[error("'{}' does not contain a list", .path.display())]
    NotAnArray {
        /// Path to the data file.
        path: PathBuf,
    },

    /// The data file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    FileWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Errors ===
    /// A search date was not in `YYYY-MM-DD` form.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// What the user typed.
        input: String,
    },

    /// A flight selection was not a number.
    #[error("invalid selection '{input}': not a number")]
    InvalidSelection {
        /// What the user typed.
        input: String,
    },

    /// A flight selection was outside the listed range.
    #[error("selection {choice} is out of range (1-{count})")]
    SelectionOutOfRange {
        /// The number the user typed.
        choice: i64,
        /// How many flights were listed.
        count: usize,
    },

    /// A user name was required but empty.
    #[error("name cannot be empty")]
    EmptyName,

    // === I/O Errors ===
    /// Terminal or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error means the file simply isn't there.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Check if this error was caused by user input rather than the
    /// environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. }
                | Self::InvalidSelection { .. }
                | Self::SelectionOutOfRange { .. }
                | Self::EmptyName
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let err = Error::FileNotFound {
            path: PathBuf::from("flights.json"),
        };
        assert_eq!(err.to_string(), "'flights.json' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_an_array_display() {
        let err = Error::NotAnArray {
            path: PathBuf::from("bookings.json"),
        };
        assert!(err.to_string().contains("does not contain a list"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_file_parse_display() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::FileParse {
            path: PathBuf::from("/data/flights.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/flights.json"));
        assert!(msg.contains("invalid JSON"));
    }

    #[test]
    fn test_file_write_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::FileWrite {
            path: PathBuf::from("/readonly/bookings.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/readonly/bookings.json"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("catalog_path must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid configuration: catalog_path must not be empty"
        );
    }

    #[test]
    fn test_input_errors() {
        assert!(Error::EmptyName.is_input_error());
        assert!(Error::InvalidDate {
            input: "tomorrow".to_string()
        }
        .is_input_error());
        assert!(Error::InvalidSelection {
            input: "abc".to_string()
        }
        .is_input_error());
        assert!(Error::SelectionOutOfRange {
            choice: 9,
            count: 2
        }
        .is_input_error());
        assert!(!Error::FileNotFound {
            path: PathBuf::from("x")
        }
        .is_input_error());
    }

    #[test]
    fn test_selection_out_of_range_display() {
        let err = Error::SelectionOutOfRange {
            choice: 5,
            count: 3,
        };
        assert_eq!(err.to_string(), "selection 5 is out of range (1-3)");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
