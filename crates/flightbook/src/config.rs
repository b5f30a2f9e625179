//! Configuration management for flightbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the user config dir holding `config.toml`.
const CONFIG_DIR_NAME: &str = "flightbook";

/// Default flight catalog file, relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "flights.json";

/// Default booking store file, relative to the working directory.
pub const DEFAULT_BOOKING_STORE_FILE: &str = "bookings.json";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLIGHTBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTBOOK_`)
/// 2. TOML config file at `~/.config/flightbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the read-only flight catalog.
    pub catalog_path: PathBuf,
    /// Path to the booking store.
    pub booking_store_path: PathBuf,
    /// Create missing data files as empty lists at startup.
    pub create_missing_files: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            booking_store_path: PathBuf::from(DEFAULT_BOOKING_STORE_FILE),
            create_missing_files: true,
        }
    }
}

impl Config {
    /// Build a configuration pointing at explicit data files.
    #[must_use]
    pub fn with_paths(
        catalog_path: impl Into<PathBuf>,
        booking_store_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            booking_store_path: booking_store_path.into(),
            ..Self::default()
        }
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A config file that doesn't exist is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is empty or both point at the same file.
    pub fn validate(&self) -> Result<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(Error::config_validation("catalog_path must not be empty"));
        }

        if self.booking_store_path.as_os_str().is_empty() {
            return Err(Error::config_validation(
                "booking_store_path must not be empty",
            ));
        }

        if self.catalog_path == self.booking_store_path {
            return Err(Error::config_validation(format!(
                "catalog_path and booking_store_path both point at {}",
                self.catalog_path.display()
            )));
        }

        Ok(())
    }

    /// Path to the flight catalog.
    #[must_use]
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Path to the booking store.
    #[must_use]
    pub fn booking_store_path(&self) -> &Path {
        &self.booking_store_path
    }
}
