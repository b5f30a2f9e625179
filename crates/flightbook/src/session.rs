//! The interactive menu session.
//!
//! A [`Session`] owns a line-oriented input and an output and loops over the
//! menu until the user exits. Each operation reloads the data files from disk,
//! so nothing is cached between operations.
//!
//! Problems inside an operation (bad input, unreadable files, a failed save)
//! are reported to the user and the menu comes back. Only a broken terminal
//! ends the loop early.

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info};

use crate::booking::{Booking, BookingView, Selection};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::flight::Flight;
use crate::search::{search, SearchQuery};
use crate::storage::{self, BookingStore, Catalog, Loaded};

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`
    Search,
    /// `2`
    Book,
    /// `3`
    View,
    /// `4`
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Search),
            "2" => Ok(Self::Book),
            "3" => Ok(Self::View),
            "4" => Ok(Self::Exit),
            other => Err(other.to_string()),
        }
    }
}

/// Source of booking timestamps.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// An interactive flight booking session.
#[derive(Debug)]
pub struct Session<R, W> {
    catalog: Catalog,
    bookings: BookingStore,
    create_missing_files: bool,
    input: R,
    output: W,
    clock: Clock,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session over the files named in `config`.
    pub fn new(config: &Config, input: R, output: W) -> Self {
        Self {
            catalog: Catalog::new(config.catalog_path()),
            bookings: BookingStore::new(config.booking_store_path()),
            create_missing_files: config.create_missing_files,
            input,
            output,
            clock: local_now,
        }
    }

    /// Replace the clock used to stamp new bookings.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Create any missing data file as an empty list.
    ///
    /// Does nothing when `create_missing_files` is off.
    ///
    /// # Errors
    ///
    /// Returns an error if a file can't be created or the terminal can't be
    /// written.
    pub fn initialize_data_files(&mut self) -> Result<()> {
        if !self.create_missing_files {
            return Ok(());
        }

        if storage::create_if_missing(self.catalog.path())? {
            writeln!(
                self.output,
                "Creating empty '{}'. Please populate it with flight data.",
                self.catalog.path().display()
            )?;
        }
        if storage::create_if_missing(self.bookings.path())? {
            writeln!(
                self.output,
                "Creating empty '{}'.",
                self.bookings.path().display()
            )?;
        }
        Ok(())
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal itself fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                info!("Input closed, ending session");
                writeln!(self.output)?;
                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Thank you for using the Flight Booking System!")?;
                    return Ok(());
                }
                Ok(choice) => choice,
                Err(other) => {
                    debug!("Unrecognized menu choice {other:?}");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            if let Err(err) = self.dispatch(choice) {
                error!("{choice:?} failed: {err}");
                writeln!(self.output, "An unexpected error occurred: {err}")?;
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Search => self.search_flights().map(|_| ()),
            MenuChoice::Book => self.book_flight(),
            MenuChoice::View => self.view_bookings(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Flight Booking System Menu ---")?;
        writeln!(self.output, "1. Search Flights")?;
        writeln!(self.output, "2. Book Flight")?;
        writeln!(self.output, "3. View My Bookings")?;
        writeln!(self.output, "4. Exit")?;
        Ok(())
    }

    /// Show `label` and read one trimmed line. `None` at end of input.
    ///
    /// Bytes that aren't UTF-8 are replaced, so a garbled line is just an
    /// answer nobody will recognize.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Like [`Session::prompt`], treating end of input as an empty answer.
    fn ask(&mut self, label: &str) -> Result<String> {
        Ok(self.prompt(label)?.unwrap_or_default())
    }

    /// Search the catalog interactively and list the matches.
    ///
    /// Returns the listed flights so the caller can pick one by its 1-based
    /// position.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal fails.
    pub fn search_flights(&mut self) -> Result<Vec<Flight>> {
        let Loaded {
            data: records,
            warning,
        } = self.catalog.load();
        if let Some(problem) = warning {
            self.report_catalog_problem(&problem)?;
        }
        if records.is_empty() {
            writeln!(
                self.output,
                "Cannot search flights as flight data failed to load or is empty."
            )?;
            return Ok(Vec::new());
        }

        let origin = self.ask("Enter origin: ")?;
        let destination = self.ask("Enter destination: ")?;
        let date = self.ask("Enter date (YYYY-MM-DD): ")?;

        let query = match SearchQuery::parse(&origin, &destination, &date) {
            Ok(query) => query,
            Err(err) => {
                debug!("Rejected search: {err}");
                writeln!(self.output, "Invalid date format. Please use YYYY-MM-DD.")?;
                return Ok(Vec::new());
            }
        };

        let outcome = search(&records, &query);
        for skipped in &outcome.skipped {
            writeln!(self.output, "{}", skipped.warning())?;
        }

        if outcome.matches.is_empty() {
            writeln!(self.output, "No flights found for the given criteria.")?;
            return Ok(Vec::new());
        }

        writeln!(self.output)?;
        writeln!(self.output, "Available Flights:")?;
        for (idx, flight) in outcome.matches.iter().enumerate() {
            writeln!(self.output, "{}. {flight}", idx + 1)?;
        }
        Ok(outcome.matches)
    }

    fn report_catalog_problem(&mut self, problem: &Error) -> Result<()> {
        writeln!(self.output, "Error: {problem}")?;
        if problem.is_not_found() {
            writeln!(
                self.output,
                "Please make sure '{}' exists in the working directory.",
                self.catalog.path().display()
            )?;
        }
        Ok(())
    }

    /// Search, let the user pick a flight, and record the booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails or the booking can't be
    /// serialized. A failed save is reported to the user, not returned.
    pub fn book_flight(&mut self) -> Result<()> {
        let flights = self.search_flights()?;
        if flights.is_empty() {
            writeln!(
                self.output,
                "No flights available to book based on your search."
            )?;
            return Ok(());
        }

        let answer =
            self.ask("Enter the number of the flight you want to book (or '0' to cancel): ")?;
        let flight = match Selection::parse(&answer, flights.len()) {
            Ok(Selection::Cancel) => {
                writeln!(self.output, "Booking cancelled.")?;
                return Ok(());
            }
            Ok(Selection::Flight(index)) => &flights[index],
            Err(Error::InvalidSelection { .. }) => {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                return Ok(());
            }
            Err(err) => {
                debug!("Rejected selection: {err}");
                writeln!(self.output, "Invalid flight number.")?;
                return Ok(());
            }
        };

        let user_name = self.ask("Enter your name: ")?;
        if user_name.is_empty() {
            writeln!(self.output, "Name cannot be empty.")?;
            return Ok(());
        }

        let booking = Booking::new(user_name, flight, (self.clock)());

        let Loaded {
            data: existing,
            warning,
        } = self.bookings.load();
        if let Some(problem) = warning {
            writeln!(
                self.output,
                "Warning: {problem}. Starting with empty bookings."
            )?;
        }

        match self.bookings.append_to(existing, &booking) {
            Ok(_) => writeln!(
                self.output,
                "Booking successful for {} on flight {}!",
                booking.user_name,
                booking.flight_text()
            )?,
            Err(err) => {
                error!("Failed to save booking: {err}");
                writeln!(self.output, "Error saving bookings: {err}")?;
            }
        }
        Ok(())
    }

    /// Ask for a name and list the bookings made under it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal fails.
    pub fn view_bookings(&mut self) -> Result<()> {
        let user_name = self.ask("Enter your name: ")?;
        if user_name.is_empty() {
            writeln!(self.output, "Name cannot be empty.")?;
            return Ok(());
        }

        let Loaded {
            data: found,
            warning,
        } = self.bookings.find_by_user(&user_name);
        if let Some(problem) = warning {
            writeln!(self.output, "Warning: {problem}. Cannot view bookings.")?;
        }

        if found.is_empty() {
            writeln!(self.output, "No bookings found for this user.")?;
            return Ok(());
        }

        writeln!(self.output)?;
        writeln!(self.output, "Bookings for {user_name}:")?;
        for (idx, record) in found.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, BookingView::from_value(record))?;
        }
        Ok(())
    }
}
