//! Geocoding port
//!
//! Resolves free-text addresses to a normalized address plus coordinates.
//! Lookups never fail loudly: anything that goes wrong downstream is
//! reported as "no match".

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Queries shorter than this (after trimming) are not sent to a geocoder
pub const MIN_QUERY_CHARS: usize = 3;

/// A free-text lookup, optionally narrowed by a region hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    /// What the user typed
    pub text: String,
    /// Appended as `", <hint>"` before the lookup (e.g. a state name)
    pub region_hint: Option<String>,
}

impl GeocodeQuery {
    /// Create a query without a region hint
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            region_hint: None,
        }
    }

    /// Narrow the query to a region. Blank hints are ignored.
    #[must_use]
    pub fn with_region_hint(mut self, hint: Option<&str>) -> Self {
        self.region_hint = hint
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(ToString::to_string);
        self
    }

    /// Whether the query is long enough to be worth a lookup
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.text.trim().chars().count() >= MIN_QUERY_CHARS
    }

    /// The string sent to the provider
    #[must_use]
    pub fn full_text(&self) -> String {
        let text = self.text.trim();
        match &self.region_hint {
            Some(hint) => format!("{text}, {hint}"),
            None => text.to_string(),
        }
    }
}

/// A geocoder's best match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Normalized address as returned by the provider
    pub address: String,
    /// Resolved coordinates
    pub location: GeoLocation,
}

/// Port for address lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a query to its best match
    ///
    /// Returns `None` when the query is too short, nothing matches, or the
    /// provider is unavailable.
    async fn lookup(&self, query: &GeocodeQuery) -> Option<GeocodedPlace>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }

    #[test]
    fn full_text_appends_hint() {
        let query = GeocodeQuery::new("100 Main St").with_region_hint(Some("North Carolina"));
        assert_eq!(query.full_text(), "100 Main St, North Carolina");
    }

    #[test]
    fn full_text_without_hint_is_trimmed() {
        assert_eq!(GeocodeQuery::new("  100 Main St ").full_text(), "100 Main St");
    }

    #[test]
    fn blank_hint_is_dropped() {
        let query = GeocodeQuery::new("Raleigh").with_region_hint(Some("   "));
        assert!(query.region_hint.is_none());
        assert_eq!(query.full_text(), "Raleigh");
    }

    #[test]
    fn short_queries_are_not_searchable() {
        assert!(!GeocodeQuery::new("ab").is_searchable());
        assert!(!GeocodeQuery::new("  ab  ").is_searchable());
        assert!(GeocodeQuery::new("abc").is_searchable());
    }

    #[test]
    fn hint_does_not_make_short_query_searchable() {
        let query = GeocodeQuery::new("NC").with_region_hint(Some("North Carolina"));
        assert!(!query.is_searchable());
    }

    #[tokio::test]
    async fn mock_port_returns_configured_place() {
        let mut port = MockGeocodingPort::new();
        port.expect_lookup()
            .withf(|q| q.text == "Durham")
            .returning(|_| {
                Some(GeocodedPlace {
                    address: "Durham, North Carolina".to_string(),
                    location: GeoLocation::new(35.994, -78.8986).unwrap(),
                })
            });

        let place = port.lookup(&GeocodeQuery::new("Durham")).await.unwrap();
        assert_eq!(place.address, "Durham, North Carolina");
    }
}
