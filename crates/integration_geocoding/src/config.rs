//! Geocoding service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the ArcGIS World Geocoding Service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcGisConfig {
    /// Base URL of the GeocodeServer
    #[serde(default = "default_arcgis_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Optional API token; anonymous single-address lookups work without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Candidates scoring below this (0-100) are treated as not found
    #[serde(default)]
    pub min_score: f64,
}

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Country code filter (e.g., "us"); empty for worldwide
    #[serde(default)]
    pub country_filter: String,
}

fn default_arcgis_base_url() -> String {
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

impl Default for ArcGisConfig {
    fn default() -> Self {
        Self {
            base_url: default_arcgis_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            api_key: None,
            min_score: 0.0,
        }
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: String::new(),
        }
    }
}

impl ArcGisConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_common(&self.base_url, self.timeout_secs)?;
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err("min_score must be between 0 and 100".to_string());
        }
        Ok(())
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_common(&self.base_url, self.timeout_secs)
    }
}

fn validate_common(base_url: &str, timeout_secs: u64) -> Result<(), String> {
    if base_url.is_empty() {
        return Err("base_url must not be empty".to_string());
    }
    if timeout_secs == 0 {
        return Err("timeout_secs must be greater than 0".to_string());
    }
    Ok(())
}
