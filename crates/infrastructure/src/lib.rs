//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains configuration loading, the geocoding adapter and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, GeocodingAppConfig, GeocodingProvider, PlannerConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_tracing};
