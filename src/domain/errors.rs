//! # Domain Errors
//!
//! Error types for domain-level validation failures.
//!
//! These errors represent violations of value-object invariants, such as
//! coordinates outside geographic ranges or malformed postal codes. They are
//! raised at construction time so invalid values never circulate through the
//! resolution pipeline.

use thiserror::Error;

/// Error type for domain validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside valid geographic ranges.
    #[error("invalid coordinate: {message}")]
    InvalidCoordinate {
        /// Description of the violated range.
        message: String,
    },

    /// Postal code is not an 8-digit CEP.
    #[error("invalid postal code: {value}")]
    InvalidPostalCode {
        /// The rejected input.
        value: String,
    },

    /// Region code is not exactly two letters.
    #[error("invalid region code: {value}")]
    InvalidRegionCode {
        /// The rejected input.
        value: String,
    },

    /// Store identifier is not a well-formed record key.
    #[error("invalid store id: {value}")]
    InvalidStoreId {
        /// The rejected input.
        value: String,
    },

    /// Distance violates the provider contract (negative or non-finite).
    #[error("invalid distance: {value} km")]
    InvalidDistance {
        /// The offending distance in kilometers.
        value: f64,
    },

    /// Monetary amount is negative.
    #[error("invalid amount: {value}")]
    InvalidAmount {
        /// The rejected amount.
        value: String,
    },
}

impl DomainError {
    /// Creates an invalid coordinate error.
    #[must_use]
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    /// Creates an invalid postal code error.
    #[must_use]
    pub fn invalid_postal_code(value: impl Into<String>) -> Self {
        Self::InvalidPostalCode {
            value: value.into(),
        }
    }

    /// Creates an invalid region code error.
    #[must_use]
    pub fn invalid_region_code(value: impl Into<String>) -> Self {
        Self::InvalidRegionCode {
            value: value.into(),
        }
    }

    /// Creates an invalid store id error.
    #[must_use]
    pub fn invalid_store_id(value: impl Into<String>) -> Self {
        Self::InvalidStoreId {
            value: value.into(),
        }
    }

    /// Creates an invalid distance error.
    #[must_use]
    pub fn invalid_distance(value: f64) -> Self {
        Self::InvalidDistance { value }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = DomainError::invalid_postal_code("123");
        assert_eq!(err.to_string(), "invalid postal code: 123");

        let err = DomainError::invalid_distance(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = DomainError::invalid_region_code("pernambuco");
        assert!(err.to_string().contains("pernambuco"));
    }
}
