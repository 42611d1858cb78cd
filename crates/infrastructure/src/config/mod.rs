//! Application configuration
//!
//! Split into focused sub-modules:
//! - `geocoding`: provider selection and per-provider settings
//! - `planner`: region hint and directions link settings
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `route-planner.toml` (or an explicit file), then `ROUTE_PLANNER_*`
//! environment variables. Nested keys use a double underscore, e.g.
//! `ROUTE_PLANNER_GEOCODING__PROVIDER=nominatim` or
//! `ROUTE_PLANNER_PLANNER__REGION_HINT="North Carolina"`.

mod geocoding;
mod planner;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use geocoding::{GeocodingAppConfig, GeocodingProvider};
pub use planner::PlannerConfig;

/// Default configuration file name (extension resolved by the `config` crate)
pub const CONFIG_FILE_NAME: &str = "route-planner";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ROUTE_PLANNER";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding provider settings
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Log output settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `route-planner.*` file
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None, None)
    }

    /// Load configuration from an explicit file, still honouring the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or the result is invalid.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(path), None)
    }

    fn build(
        path: Option<&Path>,
        env_source: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("geocoding.provider", "arcgis")?
            .set_default("telemetry.log_filter", "warn")?
            .add_source(file)
            // Override with environment variables (e.g., ROUTE_PLANNER_GEOCODING__PROVIDER)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_source),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate().map_err(config::ConfigError::Message)?;

        debug!(provider = %config.geocoding.provider, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding.validate()?;
        self.planner.validate()
    }

    /// Create a configuration suitable for testing (no caching)
    #[must_use]
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.geocoding.arcgis = integration_geocoding::ArcGisConfig::for_testing();
        config.geocoding.nominatim = integration_geocoding::NominatimConfig::for_testing();
        config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(config.geocoding.provider, GeocodingProvider::ArcGis);
        assert_eq!(config.planner.maps_base_url, "https://www.google.com/maps");
        assert_eq!(config.telemetry.log_filter, "warn");
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
[geocoding]
provider = "nominatim"

[geocoding.nominatim]
country_filter = "us"

[planner]
region_hint = "North Carolina"
"#,
        );

        let config = AppConfig::build(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.geocoding.provider, GeocodingProvider::Nominatim);
        assert_eq!(config.geocoding.nominatim.country_filter, "us");
        assert_eq!(config.geocoding.nominatim.timeout_secs, 5);
        assert_eq!(config.planner.region_hint.as_deref(), Some("North Carolina"));
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[geocoding]\nprovider = \"nominatim\"\n");

        let config = AppConfig::build(
            Some(file.path()),
            env(&[
                ("ROUTE_PLANNER_GEOCODING__PROVIDER", "arcgis"),
                ("ROUTE_PLANNER_PLANNER__REGION_HINT", "Virginia"),
                ("ROUTE_PLANNER_GEOCODING__ARCGIS__TIMEOUT_SECS", "12"),
            ]),
        )
        .unwrap();

        assert_eq!(config.geocoding.provider, GeocodingProvider::ArcGis);
        assert_eq!(config.planner.region_hint.as_deref(), Some("Virginia"));
        assert_eq!(config.geocoding.arcgis.timeout_secs, 12);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::build(Some(Path::new("/nonexistent/route-planner.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = toml_file("[geocoding.arcgis]\ntimeout_secs = 0\n");
        let err = AppConfig::build(Some(file.path()), env(&[])).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn for_testing_disables_caches() {
        let config = AppConfig::for_testing();
        assert_eq!(config.geocoding.arcgis.cache_ttl_hours, 0);
        assert_eq!(config.geocoding.nominatim.cache_ttl_hours, 0);
        assert!(config.validate().is_ok());
    }
}
