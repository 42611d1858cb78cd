//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The stop is already part of the trip
    #[error("Stop already added: {0}")]
    DuplicateStop(String),

    /// An address was empty after trimming
    #[error("Address must not be blank")]
    BlankAddress,

    /// Navigation was requested before a start point was set
    #[error("No start point set")]
    MissingStart,

    /// Navigation was requested with no end and no pending stop to promote
    #[error("No destination: set an end point or add a stop that is not completed")]
    MissingDestination,

    /// Coordinates outside the valid latitude/longitude ranges
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

impl DomainError {
    /// Create a duplicate stop error
    pub fn duplicate(address: impl Into<String>) -> Self {
        Self::DuplicateStop(address.into())
    }
}
