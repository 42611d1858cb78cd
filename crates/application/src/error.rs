//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Geocoder found nothing for the query
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Imported data is not in the expected shape
    #[error("Ingestion failed: {0}")]
    IngestionFormat(String),

    /// A navigation link could not be built
    #[error("Cannot build navigation link: {0}")]
    InvalidLink(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

impl From<csv::Error> for ApplicationError {
    fn from(err: csv::Error) -> Self {
        Self::IngestionFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_convert_transparently() {
        let err: ApplicationError = DomainError::duplicate("100 Main St").into();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::DuplicateStop(_))
        ));
        assert_eq!(err.to_string(), "Stop already added: 100 Main St");
    }

    #[test]
    fn only_external_failures_are_retryable() {
        assert!(ApplicationError::ExternalService("down".to_string()).is_retryable());
        assert!(!ApplicationError::NotFound("x".to_string()).is_retryable());
        assert!(!ApplicationError::Domain(DomainError::MissingStart).is_retryable());
    }

    #[test]
    fn not_found_mentions_query() {
        let err = ApplicationError::NotFound("Nowhere Lane".to_string());
        assert!(err.to_string().contains("Nowhere Lane"));
    }
}
