//! Interactive planning session
//!
//! One session owns one [`TripState`]. Each input line is parsed into a
//! [`SessionCommand`] and applied; failures are reported and the session
//! carries on.

use std::fs::File;
use std::path::{Path, PathBuf};

use application::{
    ApplicationError, IngestionReport, NavigationLinkBuilder, TripPlannerService,
    ingest_recognized_text, ingest_spreadsheet,
};
use domain::TripState;
use domain::value_objects::CURRENT_LOCATION_SENTINEL;
use thiserror::Error;
use tracing::{debug, warn};

use crate::render;

/// Shorthand accepted for the current-location sentinel
const ME: &str = "me";

pub const HELP: &str = "\
Commands:
  start <address|me>   set the start point (me = current location)
  end <address|me>     set the destination
  add <address>        geocode and append a stop
  search <query>       look up an address without changing the trip
  done <address|#>     mark a stop completed
  undo <address|#>     mark a stop not completed
  remove <address|#>   delete a stop
  text <raw text>      add recognized text as a single stop
  import <file.csv>    add stops from the 'Address' column of a CSV file
  clean                drop blank and 'nan' stops
  sort                 sort stops alphabetically (removes duplicates)
  reset                clear the whole trip
  show                 print the plan
  progress             print completion counters
  go                   print the navigation link for the remaining route
  help                 print this help
  quit                 leave the session";

/// Errors from parsing a session input line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// First word is not a known command
    #[error("Unknown command '{0}'. Type 'help' for a list.")]
    Unknown(String),

    /// Command needs an argument that was not given
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start(String),
    End(String),
    Add(String),
    Search(String),
    Done(String),
    Undo(String),
    Remove(String),
    Text(String),
    Import(PathBuf),
    Clean,
    Sort,
    Reset,
    Show,
    Progress,
    Go,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands or missing arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandParseError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "start" => Self::Start(arg("start")?),
            "end" => Self::End(arg("end")?),
            "add" => Self::Add(arg("add")?),
            "search" => Self::Search(arg("search")?),
            "done" => Self::Done(arg("done")?),
            "undo" => Self::Undo(arg("undo")?),
            "remove" | "rm" => Self::Remove(arg("remove")?),
            "text" => Self::Text(arg("text")?),
            "import" | "load" => Self::Import(PathBuf::from(arg("import")?)),
            "clean" => Self::Clean,
            "sort" => Self::Sort,
            "reset" => Self::Reset,
            "show" | "list" => Self::Show,
            "progress" => Self::Progress,
            "go" | "navigate" => Self::Go,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// What the caller should do after a line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep reading
    Message(String),
    /// Nothing to print
    Silent,
    /// End the session
    Quit,
}

/// Interactive planning session over a single trip
#[derive(Debug)]
pub struct Session {
    trip: TripState,
    planner: TripPlannerService,
    links: NavigationLinkBuilder,
}

impl Session {
    /// Start a session, optionally with a pre-filled trip
    pub const fn new(
        trip: TripState,
        planner: TripPlannerService,
        links: NavigationLinkBuilder,
    ) -> Self {
        Self {
            trip,
            planner,
            links,
        }
    }

    /// The trip as it currently stands
    pub const fn trip(&self) -> &TripState {
        &self.trip
    }

    /// Parse and apply one input line
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        match SessionCommand::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Reply::Silent,
            Err(e) => Reply::Message(format!("❌ {e}")),
        }
    }

    /// Apply a command, reporting errors as messages
    pub async fn execute(&mut self, command: SessionCommand) -> Reply {
        debug!(?command, "Executing session command");
        match self.apply(command).await {
            Ok(reply) => reply,
            Err(e) => Reply::Message(format!("❌ {e}")),
        }
    }

    async fn apply(&mut self, command: SessionCommand) -> Result<Reply, ApplicationError> {
        let message = match command {
            SessionCommand::Start(query) => {
                let waypoint = self
                    .planner
                    .set_start_from_query(&mut self.trip, &endpoint_query(&query))
                    .await?;
                format!("📍 Start: {waypoint}")
            },
            SessionCommand::End(query) => {
                let waypoint = self
                    .planner
                    .set_end_from_query(&mut self.trip, &endpoint_query(&query))
                    .await?;
                format!("🏁 End: {waypoint}")
            },
            SessionCommand::Add(query) => {
                let waypoint = self
                    .planner
                    .add_stop_from_query(&mut self.trip, &query)
                    .await?;
                format!("➕ Added: {waypoint}")
            },
            SessionCommand::Search(query) => {
                let place = self.planner.search(&query).await?;
                format!("🔎 {} ({})", place.address, place.location)
            },
            SessionCommand::Done(target) => {
                let address = self.resolve_stop(&target)?;
                self.trip.toggle_complete(&address, true);
                format!("✅ {address}\n📊 {}", render::progress(&self.trip))
            },
            SessionCommand::Undo(target) => {
                let address = self.resolve_stop(&target)?;
                self.trip.toggle_complete(&address, false);
                format!("⬜ {address}\n📊 {}", render::progress(&self.trip))
            },
            SessionCommand::Remove(target) => {
                let address = self.resolve_stop(&target)?;
                self.trip.remove_stop(&address);
                format!("🗑️ Removed: {address}")
            },
            SessionCommand::Text(text) => {
                let waypoint = ingest_recognized_text(&text, &mut self.trip)?;
                format!("➕ Added from text: {waypoint}")
            },
            SessionCommand::Import(path) => {
                let report = import_file(&path, &mut self.trip)?;
                render::ingestion(&report)
            },
            SessionCommand::Clean => {
                let before = self.trip.stops().len();
                self.trip.remove_blank();
                let removed = before - self.trip.stops().len();
                format!("🧹 Removed {removed} blank stop(s)")
            },
            SessionCommand::Sort => {
                self.trip.sort_stops();
                format!("🔤 Stops sorted\n{}", render::plan(&self.trip))
            },
            SessionCommand::Reset => {
                self.trip.reset();
                "♻️ Trip cleared".to_string()
            },
            SessionCommand::Show => render::plan(&self.trip),
            SessionCommand::Progress => format!("📊 {}", render::progress(&self.trip)),
            SessionCommand::Go => {
                let link = self.links.build_for_trip(&self.trip)?;
                format!("🧭 {link}")
            },
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Message(message))
    }

    /// Accept a stop address verbatim or its 1-based number in the plan
    fn resolve_stop(&self, target: &str) -> Result<String, ApplicationError> {
        if self.trip.contains_stop(target) {
            return Ok(target.to_string());
        }
        target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.trip.stops().get(i))
            .map(|stop| stop.address().to_string())
            .ok_or_else(|| ApplicationError::NotFound(format!("no stop '{target}' in the plan")))
    }
}

/// Load stops from a CSV file into the trip
///
/// # Errors
///
/// Returns `IngestionFormat` when the file cannot be opened or has no
/// `Address` column; the trip is left untouched in that case.
pub fn import_file(
    path: &Path,
    trip: &mut TripState,
) -> Result<IngestionReport, ApplicationError> {
    let file = File::open(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Cannot open spreadsheet");
        ApplicationError::IngestionFormat(format!("cannot open {}: {e}", path.display()))
    })?;
    ingest_spreadsheet(file, trip)
}

/// Map the `me` shorthand to the current-location sentinel
pub fn endpoint_query(query: &str) -> String {
    if query.trim().eq_ignore_ascii_case(ME) {
        CURRENT_LOCATION_SENTINEL.to_string()
    } else {
        query.trim().to_string()
    }
}
