//! ArcGIS World Geocoding client
//!
//! Uses the `findAddressCandidates` operation of the public
//! [World GeocodeServer](https://developers.arcgis.com/rest/geocode/).
//! Single-address lookups do not require a token; one can be supplied via
//! configuration for higher quotas.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::cache::GeocodeCache;
use crate::client::{GeocodedLocation, GeocodingClient};
use crate::config::ArcGisConfig;
use crate::error::GeocodingError;

/// ArcGIS-based geocoding client with caching
#[derive(Debug)]
pub struct ArcGisGeocodingClient {
    client: Client,
    config: ArcGisConfig,
    cache: GeocodeCache,
}

impl ArcGisGeocodingClient {
    /// Create a new ArcGIS geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ArcGisConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("route-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            cache: GeocodeCache::new(config.cache_ttl_hours),
        })
    }

    /// Parse a `findAddressCandidates` body, keeping the best candidate
    fn parse_response(
        address: &str,
        body: &str,
        min_score: f64,
    ) -> Result<GeocodedLocation, GeocodingError> {
        let raw: RawCandidatesResponse =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        // ArcGIS reports some failures with HTTP 200 and an error object
        if let Some(error) = raw.error {
            return Err(GeocodingError::RequestFailed(format!(
                "ArcGIS error {}: {}",
                error.code.unwrap_or_default(),
                error.message.unwrap_or_default()
            )));
        }

        let best = raw
            .candidates
            .into_iter()
            .filter(|c| c.score >= min_score)
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?;

        // x is longitude, y is latitude (WGS84)
        let location = GeoLocation::new(best.location.y, best.location.x)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(GeocodedLocation {
            address: best.address,
            location,
        })
    }
}

#[async_trait]
impl GeocodingClient for ArcGisGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "Address must not be empty".to_string(),
            ));
        }

        if let Some(hit) = self.cache.get(address).await {
            debug!(%address, "Geocoding cache hit");
            return Ok(hit);
        }

        let url = format!("{}/findAddressCandidates", self.config.base_url);
        let mut params = vec![
            ("SingleLine", address.to_string()),
            ("f", "json".to_string()),
            ("maxLocations", "1".to_string()),
            ("outFields", "Match_addr".to_string()),
        ];
        if let Some(token) = &self.config.api_key {
            params.push(("token", token.clone()));
        }

        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let place = Self::parse_response(address, &body, self.config.min_score)?;

        self.cache.insert(address, place.clone()).await;
        debug!(%address, resolved = %place.address, location = %place.location, "Geocoded address");

        Ok(place)
    }

    fn provider_name(&self) -> &'static str {
        "arcgis"
    }
}

#[derive(Debug, Deserialize)]
struct RawCandidatesResponse {
    #[serde(default)]
    candidates: Vec<RawCandidate>,
    error: Option<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawCandidate {
    address: String,
    location: RawPoint,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawError {
    code: Option<i64>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RALEIGH: &str = r#"{
        "spatialReference": {"wkid": 4326, "latestWkid": 4326},
        "candidates": [{
            "address": "100 Main St, Raleigh, North Carolina, 27601",
            "location": {"x": -78.6382, "y": 35.7796},
            "score": 98.5,
            "attributes": {"Match_addr": "100 Main St, Raleigh, North Carolina, 27601"}
        }]
    }"#;

    #[test]
    fn test_parse_candidate() {
        let place = ArcGisGeocodingClient::parse_response("100 main st", RALEIGH, 0.0).unwrap();
        assert_eq!(place.address, "100 Main St, Raleigh, North Carolina, 27601");
        assert!((place.location.latitude() - 35.7796).abs() < 1e-9);
        assert!((place.location.longitude() - -78.6382).abs() < 1e-9);
    }

    #[test]
    fn test_parse_no_candidates() {
        let err =
            ArcGisGeocodingClient::parse_response("zzz", r#"{"candidates": []}"#, 0.0).unwrap_err();
        assert!(matches!(err, GeocodingError::AddressNotFound(_)));
    }

    #[test]
    fn test_min_score_filters_candidates() {
        let err = ArcGisGeocodingClient::parse_response("100 main st", RALEIGH, 99.0).unwrap_err();
        assert!(matches!(err, GeocodingError::AddressNotFound(_)));
    }

    #[test]
    fn test_error_object_in_body() {
        let body = r#"{"error": {"code": 498, "message": "Invalid token", "details": []}}"#;
        let err = ArcGisGeocodingClient::parse_response("x", body, 0.0).unwrap_err();
        assert!(matches!(err, GeocodingError::RequestFailed(_)));
        assert!(err.to_string().contains("498"));
    }

    #[test]
    fn test_parse_garbage() {
        let err = ArcGisGeocodingClient::parse_response("x", "<html>", 0.0).unwrap_err();
        assert!(matches!(err, GeocodingError::ParseError(_)));
    }
}
