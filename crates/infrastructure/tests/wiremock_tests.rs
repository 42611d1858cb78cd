//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Geocoding adapter over a mocked ArcGIS / Nominatim server
//! - Planner service wired to the real adapter

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use application::ports::{GeocodeQuery, GeocodingPort};
use application::{ApplicationError, TripPlannerService};
use domain::TripState;
use infrastructure::{AppConfig, GeocodingAdapter, GeocodingProvider};

fn config_for(server: &MockServer, provider: GeocodingProvider) -> AppConfig {
    let mut config = AppConfig::for_testing();
    config.geocoding.provider = provider;
    config.geocoding.arcgis.base_url = server.uri();
    config.geocoding.nominatim.base_url = server.uri();
    config
}

fn candidates(address: &str, x: f64, y: f64) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "address": address,
            "location": {"x": x, "y": y},
            "score": 100
        }]
    })
}

// ============================================================================
// Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn arcgis_lookup_resolves_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/findAddressCandidates"))
            .and(query_param("SingleLine", "100 Main St, North Carolina"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidates(
                "100 Main St, Raleigh, North Carolina, 27601",
                -78.6382,
                35.7796,
            )))
            .mount(&server)
            .await;

        let config = config_for(&server, GeocodingProvider::ArcGis);
        let adapter = GeocodingAdapter::from_config(&config.geocoding).unwrap();

        let query = GeocodeQuery::new("100 Main St").with_region_hint(Some("North Carolina"));
        let place = adapter.lookup(&query).await.unwrap();

        assert_eq!(place.address, "100 Main St, Raleigh, North Carolina, 27601");
        assert!((place.location.latitude() - 35.7796).abs() < 1e-9);
    }

    #[tokio::test]
    async fn nominatim_lookup_resolves_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "lat": "35.994",
                "lon": "-78.8986",
                "display_name": "Durham, North Carolina, United States"
            }])))
            .mount(&server)
            .await;

        let config = config_for(&server, GeocodingProvider::Nominatim);
        let adapter = GeocodingAdapter::from_config(&config.geocoding).unwrap();

        let place = adapter.lookup(&GeocodeQuery::new("Durham")).await.unwrap();
        assert_eq!(place.address, "Durham, North Carolina, United States");
    }

    #[tokio::test]
    async fn server_error_becomes_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let config = config_for(&server, GeocodingProvider::ArcGis);
        let adapter = GeocodingAdapter::from_config(&config.geocoding).unwrap();

        assert!(adapter.lookup(&GeocodeQuery::new("Raleigh")).await.is_none());
    }

    #[tokio::test]
    async fn short_query_sends_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = config_for(&server, GeocodingProvider::ArcGis);
        let adapter = GeocodingAdapter::from_config(&config.geocoding).unwrap();

        assert!(adapter.lookup(&GeocodeQuery::new("ab")).await.is_none());
    }
}

// ============================================================================
// Planner Service Tests
// ============================================================================

mod planner_tests {
    use super::*;

    fn planner(server: &MockServer) -> TripPlannerService {
        let config = config_for(server, GeocodingProvider::ArcGis);
        let adapter = GeocodingAdapter::from_config(&config.geocoding).unwrap();
        TripPlannerService::new(Arc::new(adapter))
    }

    #[tokio::test]
    async fn two_point_route_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("SingleLine", "Raleigh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidates(
                "Raleigh, North Carolina",
                -78.6382,
                35.7796,
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("SingleLine", "Durham"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidates(
                "Durham, North Carolina",
                -78.8986,
                35.994,
            )))
            .mount(&server)
            .await;

        let planner = planner(&server);
        let mut trip = TripState::new();
        let route = planner
            .plan_two_point(&mut trip, "Raleigh", "Durham")
            .await
            .unwrap();

        assert!(route.miles > 18.0 && route.miles < 25.0);
        assert_eq!(trip.end().unwrap().address(), "Durham, North Carolina");
    }

    #[tokio::test]
    async fn unknown_address_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let planner = planner(&server);
        let mut trip = TripState::new();
        let err = planner
            .add_stop_from_query(&mut trip, "Nowhere Lane")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound(_)));
        assert!(trip.stops().is_empty());
    }
}
