//! Geographic location value object
//!
//! Distances are measured along the WGS-84 ellipsoid, the same geodesic a
//! GPS receiver or a maps provider reports.

use std::fmt;

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const METERS_PER_MILE: f64 = 1_609.344;

/// Coordinates outside the valid latitude/longitude ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
pub struct InvalidCoordinates;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` for out-of-range or non-finite values,
    /// e.g. a geocoder swapping x and y.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinates)
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Ellipsoidal (WGS-84) distance in meters
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        Geodesic.distance(Point::from(*self), Point::from(*other))
    }

    /// Ellipsoidal (WGS-84) distance in statute miles
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        self.distance_meters(other) / METERS_PER_MILE
    }

    /// Coordinate average of two locations, used to centre a map view
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }
}

impl From<GeoLocation> for Point<f64> {
    fn from(location: GeoLocation) -> Self {
        Self::new(location.longitude, location.latitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}
