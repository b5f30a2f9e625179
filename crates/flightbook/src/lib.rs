//! `flightbook` - A file-backed flight search and booking tool
//!
//! This library provides the catalog and booking store on top of two JSON
//! files, the search logic, and the interactive menu session that ties them
//! together.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod booking;
pub mod cli;
pub mod config;
pub mod error;
pub mod flight;
pub mod logging;
pub mod search;
pub mod session;
pub mod storage;

pub use booking::Booking;
pub use config::Config;
pub use error::{Error, Result};
pub use flight::Flight;
pub use logging::init_logging;
pub use search::{search, SearchOutcome, SearchQuery};
pub use session::Session;
pub use storage::{BookingStore, Catalog, Loaded};
