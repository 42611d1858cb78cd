//! Domain layer for the route planner
//!
//! Contains the trip planning state, value objects, and domain errors.
//! This layer performs no I/O; geocoding and navigation live behind ports
//! in the application layer.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
