//! Command-line interface for flightbook.
//!
//! The program is a single interactive session; the flags only choose files
//! and log verbosity.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging::Verbosity;

/// flightbook - Search and book flights from a JSON catalog
///
/// Starts an interactive menu for searching the flight catalog, booking a
/// flight, and viewing bookings made under a name.
#[derive(Debug, Parser)]
#[command(name = "flightbook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Flight catalog to read (overrides configuration)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Booking store to read and write (overrides configuration)
    #[arg(long, value_name = "FILE")]
    pub bookings: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Apply file path flags on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(catalog) = &self.catalog {
            config.catalog_path.clone_from(catalog);
        }
        if let Some(bookings) = &self.bookings {
            config.booking_store_path.clone_from(bookings);
        }
    }
}
