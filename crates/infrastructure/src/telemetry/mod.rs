//! Logging and tracing setup
//!
//! Console output via `tracing-subscriber`; the filter comes from `RUST_LOG`
//! when set, otherwise from configuration.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_tracing};
