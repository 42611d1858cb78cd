//! Planner and navigation settings

use application::services::{DEFAULT_MAPS_BASE_URL, NavigationLinkBuilder};
use serde::{Deserialize, Serialize};

/// Session-level planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Region appended to every lookup, e.g. "North Carolina"
    #[serde(default)]
    pub region_hint: Option<String>,

    /// Base URL for directions links
    #[serde(default = "default_maps_base_url")]
    pub maps_base_url: String,
}

fn default_maps_base_url() -> String {
    DEFAULT_MAPS_BASE_URL.to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            region_hint: None,
            maps_base_url: default_maps_base_url(),
        }
    }
}

impl PlannerConfig {
    /// Link builder for the configured maps provider
    #[must_use]
    pub fn to_link_builder(&self) -> NavigationLinkBuilder {
        NavigationLinkBuilder::new(self.maps_base_url.as_str())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the maps base URL is not an http(s) URL.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.maps_base_url.starts_with("https://") || self.maps_base_url.starts_with("http://"))
        {
            return Err(format!(
                "planner.maps_base_url must be an http(s) URL, got '{}'",
                self.maps_base_url
            ));
        }
        Ok(())
    }
}
