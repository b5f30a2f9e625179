//! `flightbook` - interactive flight search and booking
//!
//! Loads configuration, makes sure the data files exist, then hands the
//! terminal to the menu session.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use flightbook::cli::Cli;
use flightbook::{init_logging, Config, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("checking data file paths")?;
    tracing::debug!(?config, "configuration loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(&config, stdin.lock(), stdout.lock());

    session.initialize_data_files().context("preparing data files")?;
    session.run().context("terminal session failed")?;
    Ok(())
}
