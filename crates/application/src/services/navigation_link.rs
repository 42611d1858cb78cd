//! Navigation link builder
//!
//! Pure functions turning an ordered waypoint list into a link that opens
//! turn-by-turn directions in Google Maps (native app on mobile, browser on
//! desktop).

use domain::TripState;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

use crate::error::ApplicationError;

/// Default directions provider
pub const DEFAULT_MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// Builds directions links against a maps base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationLinkBuilder {
    base_url: String,
}

impl Default for NavigationLinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAPS_BASE_URL)
    }
}

impl NavigationLinkBuilder {
    /// Create a builder for the given base URL (trailing `/` ignored)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL links are built against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Multi-stop directions: `<base>/dir/<w0>/<w1>/.../<wn>`
    ///
    /// # Errors
    ///
    /// `InvalidLink` when fewer than two waypoints are given.
    pub fn build<S: AsRef<str>>(&self, waypoints: &[S]) -> Result<String, ApplicationError> {
        if waypoints.len() < 2 {
            return Err(ApplicationError::InvalidLink(format!(
                "need an origin and a destination, got {} waypoint(s)",
                waypoints.len()
            )));
        }

        let mut link = format!("{}/dir", self.base_url);
        for waypoint in waypoints {
            link.push('/');
            link.push_str(&encode(waypoint.as_ref()));
        }

        debug!(stops = waypoints.len(), "Built navigation link");
        Ok(link)
    }

    /// Point-to-point directions using the Maps URLs API
    #[must_use]
    pub fn build_two_point(&self, origin: &str, destination: &str) -> String {
        format!(
            "{}/dir/?api=1&origin={}&destination={}",
            self.base_url,
            encode(origin),
            encode(destination)
        )
    }

    /// Link for the trip's remaining route
    ///
    /// # Errors
    ///
    /// Propagates `MissingStart` / `MissingDestination` from the trip.
    pub fn build_for_trip(&self, trip: &TripState) -> Result<String, ApplicationError> {
        let waypoints = trip.build_navigation_waypoints()?;
        self.build(&waypoints)
    }
}

/// `application/x-www-form-urlencoded` encoding; spaces become `+`
fn encode(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn test_encode_spaces() {
        assert_eq!(encode("Current Location"), "Current+Location");
    }

    #[test]
    fn test_encode_special() {
        let encoded = encode("100 Main St, Apt #2 & Co/B");
        assert_eq!(encoded, "100+Main+St%2C+Apt+%232+%26+Co%2FB");
    }

    #[test]
    fn test_encode_unicode() {
        assert_eq!(encode("Straße"), "Stra%C3%9Fe");
    }

    #[test]
    fn test_build_multi_stop() {
        let link = NavigationLinkBuilder::default()
            .build(&["Current Location", "100 Main St", "200 Oak Ave"])
            .unwrap();
        assert_eq!(
            link,
            "https://www.google.com/maps/dir/Current+Location/100+Main+St/200+Oak+Ave"
        );
    }

    #[test]
    fn test_build_requires_two_waypoints() {
        let builder = NavigationLinkBuilder::default();
        assert!(matches!(
            builder.build(&["only one"]),
            Err(ApplicationError::InvalidLink(_))
        ));
        assert!(builder.build::<&str>(&[]).is_err());
    }

    #[test]
    fn test_build_two_point() {
        let link = NavigationLinkBuilder::default().build_two_point("Raleigh, NC", "Durham NC");
        assert_eq!(
            link,
            "https://www.google.com/maps/dir/?api=1&origin=Raleigh%2C+NC&destination=Durham+NC"
        );
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let builder = NavigationLinkBuilder::new("http://maps.local/");
        assert_eq!(builder.base_url(), "http://maps.local");
        assert_eq!(
            builder.build(&["a", "b"]).unwrap(),
            "http://maps.local/dir/a/b"
        );
    }

    #[test]
    fn test_build_for_trip_substitutes_sentinel() {
        let mut trip = TripState::new();
        trip.set_start("My Location");
        trip.set_end("200 Oak Ave");
        trip.add_stop("100 Main St").unwrap();

        let link = NavigationLinkBuilder::default()
            .build_for_trip(&trip)
            .unwrap();
        assert_eq!(
            link,
            "https://www.google.com/maps/dir/Current+Location/100+Main+St/200+Oak+Ave"
        );
    }

    #[test]
    fn test_build_for_trip_without_start() {
        let mut trip = TripState::new();
        trip.set_end("200 Oak Ave");

        let err = NavigationLinkBuilder::default()
            .build_for_trip(&trip)
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingStart)
        ));
    }

    #[test]
    fn test_build_for_trip_without_destination() {
        let mut trip = TripState::new();
        trip.set_start("100 Main St");

        let err = NavigationLinkBuilder::default()
            .build_for_trip(&trip)
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingDestination)
        ));
    }
}
