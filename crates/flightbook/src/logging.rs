//! Diagnostic logging for flightbook.
//!
//! The menu, prompts and result listings are the session's own output on
//! stdout. Tracing events (skipped catalog records, unusable data files, saved
//! bookings) go to stderr, so `flightbook 2>/dev/null` leaves a clean
//! transcript.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic detail to print, set by `-q` / `-v` / `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only failed saves and operation errors.
    Quiet,
    /// Also unusable data files and skipped records.
    #[default]
    Normal,
    /// Also searches, loads and saves.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Most detailed level shown at this verbosity.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.to_level_filter())
    }
}

/// Install the stderr subscriber for a session.
///
/// `RUST_LOG`, when set, replaces the directive derived from `verbosity`.
/// Calling this again is harmless; the first subscriber stays.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    let _ = subscriber.try_init();
}

/// Route session logs into the test harness output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("flightbook=debug")
        .with_test_writer()
        .try_init();
}
