//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::error::ApplicationError;
use application::ports::{GeocodeQuery, GeocodedPlace, GeocodingPort};
use async_trait::async_trait;
use integration_geocoding::{
    ArcGisGeocodingClient, GeocodedLocation, GeocodingClient, NominatimGeocodingClient,
};
use tracing::{debug, instrument, warn};

use crate::config::{GeocodingAppConfig, GeocodingProvider};

/// Adapter that turns provider results into port answers
///
/// Every provider failure (not found, timeout, HTTP error, bad payload)
/// becomes `None`; the cause is logged.
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

impl GeocodingAdapter {
    /// Wrap an existing client
    pub fn new(client: Box<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    /// Build the adapter for the configured provider
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the provider settings are invalid or the
    /// HTTP client cannot be created.
    pub fn from_config(config: &GeocodingAppConfig) -> Result<Self, ApplicationError> {
        let client: Box<dyn GeocodingClient> = match config.provider {
            GeocodingProvider::ArcGis => Box::new(
                ArcGisGeocodingClient::new(&config.arcgis)
                    .map_err(|e| ApplicationError::Configuration(e.to_string()))?,
            ),
            GeocodingProvider::Nominatim => Box::new(
                NominatimGeocodingClient::new(&config.nominatim)
                    .map_err(|e| ApplicationError::Configuration(e.to_string()))?,
            ),
        };
        debug!(provider = client.provider_name(), "Geocoding adapter ready");
        Ok(Self::new(client))
    }

    /// Name of the underlying provider
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    fn convert(found: GeocodedLocation) -> GeocodedPlace {
        GeocodedPlace {
            address: found.address,
            location: found.location,
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    async fn lookup(&self, query: &GeocodeQuery) -> Option<GeocodedPlace> {
        if !query.is_searchable() {
            debug!(text = %query.text, "Query too short, skipping lookup");
            return None;
        }

        match self.client.geocode(&query.full_text()).await {
            Ok(found) => Some(Self::convert(found)),
            Err(e) => {
                warn!(
                    query = %query.full_text(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "Geocoding lookup failed"
                );
                None
            },
        }
    }
}
