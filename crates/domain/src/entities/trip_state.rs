//! Trip planning state
//!
//! A flat, owned record of start, end, ordered stops and the set of stops
//! already visited. Each session owns exactly one `TripState`; nothing here
//! is shared or global.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Progress, Waypoint};

/// Mutable state of a multi-stop trip being planned or driven
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripState {
    start: Option<Waypoint>,
    end: Option<Waypoint>,
    stops: Vec<Waypoint>,
    completed: BTreeSet<String>,
}

impl TripState {
    /// Create an empty trip
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start point, if set
    #[must_use]
    pub const fn start(&self) -> Option<&Waypoint> {
        self.start.as_ref()
    }

    /// End point, if set
    #[must_use]
    pub const fn end(&self) -> Option<&Waypoint> {
        self.end.as_ref()
    }

    /// Stops in routing order
    #[must_use]
    pub fn stops(&self) -> &[Waypoint] {
        &self.stops
    }

    /// Addresses of completed stops
    #[must_use]
    pub const fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    /// Whether the stop with this address is marked completed
    #[must_use]
    pub fn is_completed(&self, address: &str) -> bool {
        self.completed.contains(address)
    }

    /// Whether a stop with this exact address exists
    #[must_use]
    pub fn contains_stop(&self, address: &str) -> bool {
        self.stops.iter().any(|s| s.address() == address)
    }

    /// Stops not yet completed, in routing order
    pub fn pending_stops(&self) -> impl Iterator<Item = &Waypoint> {
        self.stops
            .iter()
            .filter(|s| !self.completed.contains(s.address()))
    }

    /// True when nothing has been entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.stops.is_empty()
    }

    /// Append a stop by address
    ///
    /// # Errors
    ///
    /// `BlankAddress` if the trimmed address is empty, `DuplicateStop` if the
    /// same string is already a stop. Both leave the state untouched.
    pub fn add_stop(&mut self, address: &str) -> Result<(), DomainError> {
        self.add_waypoint(Waypoint::new(address))
    }

    /// Append a stop, keeping any resolved coordinates
    pub fn add_waypoint(&mut self, waypoint: Waypoint) -> Result<(), DomainError> {
        if waypoint.address().is_empty() {
            return Err(DomainError::BlankAddress);
        }
        if self.contains_stop(waypoint.address()) {
            return Err(DomainError::duplicate(waypoint.address()));
        }
        self.stops.push(waypoint);
        Ok(())
    }

    /// Append raw column values verbatim, skipping exact duplicates
    ///
    /// Used for bulk imports where cells may hold missing-value markers;
    /// run [`Self::remove_blank`] afterwards to drop those. Returns the number
    /// of duplicates skipped.
    pub fn extend_raw<I, S>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0;
        for value in values {
            let waypoint = Waypoint::new(value);
            if self.contains_stop(waypoint.address()) {
                skipped += 1;
            } else {
                self.stops.push(waypoint);
            }
        }
        skipped
    }

    /// Overwrite the start point. No validation, no dedup against stops.
    pub fn set_start(&mut self, address: &str) {
        self.start = Some(Waypoint::new(address));
    }

    /// Overwrite the start point with a resolved waypoint
    pub fn set_start_waypoint(&mut self, waypoint: Waypoint) {
        self.start = Some(waypoint);
    }

    /// Overwrite the end point. No validation, no dedup against stops.
    pub fn set_end(&mut self, address: &str) {
        self.end = Some(Waypoint::new(address));
    }

    /// Overwrite the end point with a resolved waypoint
    pub fn set_end_waypoint(&mut self, waypoint: Waypoint) {
        self.end = Some(waypoint);
    }

    /// Mark a stop done or not done. Unknown addresses are ignored.
    pub fn toggle_complete(&mut self, address: &str, done: bool) {
        if done {
            if self.contains_stop(address) {
                self.completed.insert(address.to_string());
            }
        } else {
            self.completed.remove(address);
        }
    }

    /// Remove a stop and its completed mark. Returns whether it existed.
    pub fn remove_stop(&mut self, address: &str) -> bool {
        let before = self.stops.len();
        self.stops.retain(|s| s.address() != address);
        self.completed.remove(address);
        self.stops.len() != before
    }

    /// Drop empty stops and `nan` markers left by spreadsheet imports
    pub fn remove_blank(&mut self) {
        let completed = &mut self.completed;
        self.stops.retain(|s| {
            if s.is_blank() {
                completed.remove(s.address());
                false
            } else {
                true
            }
        });
    }

    /// Replace the stops with their sorted, deduplicated set
    ///
    /// This is the only "optimization" offered: plain ascending string order.
    /// The original insertion order is lost.
    pub fn sort_stops(&mut self) {
        self.stops.sort_by(|a, b| a.address().cmp(b.address()));
        self.stops.dedup_by(|a, b| a.address() == b.address());
    }

    /// Clear everything back to the empty trip
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Counters for display
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.stops.len(), self.completed.len())
    }

    /// Ordered address list for a navigation provider
    ///
    /// Start first (with the current-location sentinel substituted), then the
    /// pending stops, then the end. Completed stops are skipped. Without an
    /// end, the trailing pending stop is popped and the route terminates at
    /// the stop before it; a lone pending stop is itself the destination.
    ///
    /// # Errors
    ///
    /// `MissingStart` without a start point, `MissingDestination` when there
    /// is no end and no pending stop.
    pub fn build_navigation_waypoints(&self) -> Result<Vec<String>, DomainError> {
        let start = self.start.as_ref().ok_or(DomainError::MissingStart)?;

        let mut middle: Vec<String> = self
            .pending_stops()
            .map(|s| s.navigation_label().to_string())
            .collect();

        let mut waypoints = Vec::with_capacity(middle.len() + 2);
        waypoints.push(start.navigation_label().to_string());

        match &self.end {
            Some(end) => {
                waypoints.append(&mut middle);
                waypoints.push(end.navigation_label().to_string());
            },
            None => {
                if middle.is_empty() {
                    return Err(DomainError::MissingDestination);
                }
                if middle.len() > 1 {
                    middle.pop();
                }
                waypoints.append(&mut middle);
            },
        }

        Ok(waypoints)
    }
}
