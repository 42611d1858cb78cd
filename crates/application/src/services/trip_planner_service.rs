//! Trip planner service
//!
//! Resolves user-entered addresses through the geocoding port and applies
//! them to a caller-owned [`TripState`]. The service holds no trip state of
//! its own, so one instance can serve any number of sessions.

use std::fmt;
use std::sync::Arc;

use domain::TripState;
use domain::value_objects::{CURRENT_LOCATION_SENTINEL, GeoLocation, GreenImpact, Waypoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{GeocodeQuery, GeocodedPlace, GeocodingPort};
use crate::services::navigation_link::NavigationLinkBuilder;

/// Straight-line route between two geocoded points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoPointRoute {
    /// Where the trip starts
    pub origin: GeocodedPlace,
    /// Where the trip ends
    pub destination: GeocodedPlace,
    /// Geodesic distance in statute miles
    pub miles: f64,
}

impl TwoPointRoute {
    /// Build a route, computing the distance between both places
    #[must_use]
    pub fn between(origin: GeocodedPlace, destination: GeocodedPlace) -> Self {
        let miles = origin.location.distance_miles(&destination.location);
        Self {
            origin,
            destination,
            miles,
        }
    }

    /// CO2 avoided if the distance is covered without a car
    #[must_use]
    pub fn impact(&self) -> GreenImpact {
        GreenImpact::from_miles(self.miles)
    }

    /// Point halfway between origin and destination, for centring a map
    #[must_use]
    pub fn center(&self) -> GeoLocation {
        self.origin.location.midpoint(&self.destination.location)
    }

    /// Directions link from origin to destination
    #[must_use]
    pub fn navigation_link(&self, links: &NavigationLinkBuilder) -> String {
        links.build_two_point(&self.origin.address, &self.destination.address)
    }
}

/// Geocodes queries and applies the results to a trip
pub struct TripPlannerService {
    geocoder: Arc<dyn GeocodingPort>,
    region_hint: Option<String>,
}

impl fmt::Debug for TripPlannerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripPlannerService")
            .field("region_hint", &self.region_hint)
            .finish_non_exhaustive()
    }
}

impl TripPlannerService {
    /// Create a new planner service
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self {
            geocoder,
            region_hint: None,
        }
    }

    /// Append a region (e.g. `"North Carolina"`) to every lookup
    #[must_use]
    pub fn with_region_hint(mut self, hint: Option<String>) -> Self {
        self.region_hint = hint.filter(|h| !h.trim().is_empty());
        self
    }

    /// The configured region hint
    #[must_use]
    pub fn region_hint(&self) -> Option<&str> {
        self.region_hint.as_deref()
    }

    /// Look up a free-text address
    ///
    /// # Errors
    ///
    /// `NotFound` when the query is too short or nothing matches.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<GeocodedPlace, ApplicationError> {
        let query = GeocodeQuery::new(query).with_region_hint(self.region_hint.as_deref());
        if !query.is_searchable() {
            return Err(ApplicationError::NotFound(format!(
                "'{}' is too short to look up",
                query.text.trim()
            )));
        }

        match self.geocoder.lookup(&query).await {
            Some(place) => {
                debug!(query = %query.full_text(), resolved = %place.address, "Address resolved");
                Ok(place)
            },
            None => Err(ApplicationError::NotFound(query.full_text())),
        }
    }

    /// Set the trip start from a query; the current-location sentinel is kept as-is
    ///
    /// # Errors
    ///
    /// `NotFound` when the address cannot be resolved. The trip is unchanged.
    pub async fn set_start_from_query(
        &self,
        trip: &mut TripState,
        query: &str,
    ) -> Result<Waypoint, ApplicationError> {
        let waypoint = self.resolve_endpoint(query).await?;
        trip.set_start_waypoint(waypoint.clone());
        info!(start = %waypoint.address(), "Start set");
        Ok(waypoint)
    }

    /// Set the trip end from a query; the current-location sentinel is kept as-is
    ///
    /// # Errors
    ///
    /// `NotFound` when the address cannot be resolved. The trip is unchanged.
    pub async fn set_end_from_query(
        &self,
        trip: &mut TripState,
        query: &str,
    ) -> Result<Waypoint, ApplicationError> {
        let waypoint = self.resolve_endpoint(query).await?;
        trip.set_end_waypoint(waypoint.clone());
        info!(end = %waypoint.address(), "End set");
        Ok(waypoint)
    }

    /// Geocode a query and append the result as a stop
    ///
    /// # Errors
    ///
    /// `NotFound` when the address cannot be resolved, `Domain(DuplicateStop)`
    /// when the normalized address is already a stop.
    pub async fn add_stop_from_query(
        &self,
        trip: &mut TripState,
        query: &str,
    ) -> Result<Waypoint, ApplicationError> {
        let place = self.search(query).await?;
        let waypoint = Waypoint::with_location(&place.address, place.location);
        trip.add_waypoint(waypoint.clone())?;
        info!(stop = %waypoint.address(), total = trip.stops().len(), "Stop added");
        Ok(waypoint)
    }

    /// Geocode both ends of a point-to-point trip and record them on the trip
    ///
    /// # Errors
    ///
    /// `NotFound` if either end cannot be resolved; the current-location
    /// sentinel has no coordinates and is rejected here. The trip is only
    /// modified when both lookups succeed.
    #[instrument(skip(self, trip))]
    pub async fn plan_two_point(
        &self,
        trip: &mut TripState,
        start_query: &str,
        end_query: &str,
    ) -> Result<TwoPointRoute, ApplicationError> {
        for query in [start_query, end_query] {
            if query.trim() == CURRENT_LOCATION_SENTINEL {
                return Err(ApplicationError::NotFound(format!(
                    "'{CURRENT_LOCATION_SENTINEL}' has no coordinates for a distance estimate"
                )));
            }
        }

        let origin = self.search(start_query).await?;
        let destination = self.search(end_query).await?;

        trip.set_start_waypoint(Waypoint::with_location(&origin.address, origin.location));
        trip.set_end_waypoint(Waypoint::with_location(
            &destination.address,
            destination.location,
        ));

        let route = TwoPointRoute::between(origin, destination);
        info!(miles = route.miles, "Two-point route planned");
        Ok(route)
    }

    async fn resolve_endpoint(&self, query: &str) -> Result<Waypoint, ApplicationError> {
        if query.trim() == CURRENT_LOCATION_SENTINEL {
            return Ok(Waypoint::current_location());
        }
        let place = self.search(query).await?;
        Ok(Waypoint::with_location(&place.address, place.location))
    }
}
