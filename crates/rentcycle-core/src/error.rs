//! Error types for the Rentcycle library.
//!
//! Every fallible operation in the workspace returns [`RentResult`]. Errors
//! carry enough context for a caller to map them onto a transport response;
//! no operation returns partial output alongside an error.

use thiserror::Error;

/// A specialized Result type for Rentcycle operations.
pub type RentResult<T> = Result<T, RentError>;

/// The main error type for Rentcycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RentError {
    /// A date could not be constructed or parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// An input value violates the domain rules.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A referenced entity is missing from the supplied snapshot.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity (e.g. "tenant").
        entity: String,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A forward cycle walk exceeded its iteration cap.
    #[error("Computation aborted after {iterations} iterations: {reason}")]
    RunawayComputation {
        /// Number of iterations performed before aborting.
        iterations: u32,
        /// Description of the inconsistency.
        reason: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl RentError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// Creates a runaway computation error.
    #[must_use]
    pub fn runaway(iterations: u32, reason: impl Into<String>) -> Self {
        Self::RunawayComputation {
            iterations,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RentError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_not_found_display() {
        let err = RentError::not_found("tenant", "T-42");
        assert_eq!(err.to_string(), "tenant not found: T-42");
    }

    #[test]
    fn test_runaway_error() {
        let err = RentError::runaway(100, "check-in date inconsistent with current time");
        assert!(err.to_string().contains("100 iterations"));
        assert!(err.to_string().contains("check-in date"));
    }

    #[test]
    fn test_invalid_input_names_field() {
        let err = RentError::invalid_input("rent_amount", "must not be negative");
        assert!(err.to_string().contains("'rent_amount'"));
    }
}
