//! Application layer - Use cases and orchestration
//!
//! Contains the geocoding port, trip planning services, navigation link
//! building and bulk stop ingestion. Orchestrates domain objects and
//! infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
