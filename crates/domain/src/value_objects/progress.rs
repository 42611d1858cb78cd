//! Trip progress counters

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many stops are done and how many remain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Number of stops on the trip
    pub total: usize,
    /// Number of stops marked completed
    pub done: usize,
    /// `total - done`
    pub remaining: usize,
}

impl Progress {
    /// Build counters from a total and a completed count
    #[must_use]
    pub const fn new(total: usize, done: usize) -> Self {
        Self {
            total,
            done,
            remaining: total.saturating_sub(done),
        }
    }

    /// Completed share in percent, 0 for an empty trip
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64 * 100.0
    }

    /// True when every stop is done (and there is at least one)
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} stops done, {} remaining",
            self.done, self.total, self.remaining
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_derived() {
        let p = Progress::new(5, 2);
        assert_eq!(p.remaining, 3);
        assert!(!p.is_finished());
    }

    #[test]
    fn empty_trip_is_zero_percent() {
        let p = Progress::default();
        assert!(p.percent_complete().abs() < f64::EPSILON);
        assert!(!p.is_finished());
    }

    #[test]
    fn percent_complete() {
        assert!((Progress::new(4, 1).percent_complete() - 25.0).abs() < f64::EPSILON);
        assert!(Progress::new(4, 4).is_finished());
    }

    #[test]
    fn display() {
        assert_eq!(
            Progress::new(3, 1).to_string(),
            "1/3 stops done, 2 remaining"
        );
    }
}
