//! Geocoding client trait and result type

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};

use crate::error::GeocodingError;

/// A resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    /// Provider-normalized address string
    pub address: String,
    /// Resolved coordinates
    pub location: GeoLocation,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to a normalized address and coordinates
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodingError>;

    /// Short provider name for logs
    fn provider_name(&self) -> &'static str;
}
