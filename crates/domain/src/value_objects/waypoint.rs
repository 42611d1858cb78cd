//! Waypoint value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeoLocation;

/// Literal a user enters to mean "start from where the device is"
pub const CURRENT_LOCATION_SENTINEL: &str = "My Location";

/// What the sentinel becomes when handed to a navigation provider
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// An address, as entered or as normalized by a geocoder, plus optional coordinates
///
/// Identity is the trimmed address string. Two waypoints that differ only in
/// casing or geocoder formatting are distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<GeoLocation>,
}

impl Waypoint {
    /// Create a waypoint from a free-text address (trimmed, otherwise verbatim)
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Self {
        Self {
            address: address.as_ref().trim().to_string(),
            location: None,
        }
    }

    /// Create a waypoint carrying resolved coordinates
    #[must_use]
    pub fn with_location(address: impl AsRef<str>, location: GeoLocation) -> Self {
        Self {
            location: Some(location),
            ..Self::new(address)
        }
    }

    /// The "use current device location" waypoint
    #[must_use]
    pub fn current_location() -> Self {
        Self::new(CURRENT_LOCATION_SENTINEL)
    }

    /// The address as stored
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Resolved coordinates, if the waypoint was geocoded
    #[must_use]
    pub const fn location(&self) -> Option<GeoLocation> {
        self.location
    }

    /// Whether this is the current-location sentinel
    #[must_use]
    pub fn is_current_location(&self) -> bool {
        self.address == CURRENT_LOCATION_SENTINEL
    }

    /// Whether the address is empty or a spreadsheet missing-value marker
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let trimmed = self.address.trim();
        trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
    }

    /// The string handed to a navigation provider
    ///
    /// The sentinel is substituted here and nowhere else, so it survives
    /// verbatim in the trip state.
    #[must_use]
    pub fn navigation_label(&self) -> &str {
        if self.is_current_location() {
            CURRENT_LOCATION_LABEL
        } else {
            &self.address
        }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{} ({loc})", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl From<&str> for Waypoint {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Waypoint {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}
