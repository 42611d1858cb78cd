//! Geocoding provider selection

use std::fmt;

use integration_geocoding::{ArcGisConfig, NominatimConfig};
use serde::{Deserialize, Serialize};

/// Which geocoding service answers lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodingProvider {
    /// ArcGIS World Geocoding Service (default)
    #[default]
    ArcGis,
    /// OpenStreetMap Nominatim
    Nominatim,
}

impl fmt::Display for GeocodingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArcGis => write!(f, "arcgis"),
            Self::Nominatim => write!(f, "nominatim"),
        }
    }
}

impl std::str::FromStr for GeocodingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arcgis" | "esri" => Ok(Self::ArcGis),
            "nominatim" | "osm" => Ok(Self::Nominatim),
            _ => Err(format!(
                "Invalid geocoding provider: {s}. Use 'arcgis' or 'nominatim'"
            )),
        }
    }
}

/// Geocoding configuration: the active provider plus settings for each
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Active provider
    #[serde(default)]
    pub provider: GeocodingProvider,

    /// ArcGIS settings (used when `provider = "arcgis"`)
    #[serde(default)]
    pub arcgis: ArcGisConfig,

    /// Nominatim settings (used when `provider = "nominatim"`)
    #[serde(default)]
    pub nominatim: NominatimConfig,
}

impl GeocodingAppConfig {
    /// Validate the settings of the active provider
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        match self.provider {
            GeocodingProvider::ArcGis => self.arcgis.validate(),
            GeocodingProvider::Nominatim => self.nominatim.validate(),
        }
        .map_err(|e| format!("geocoding.{}: {e}", self.provider))
    }
}
