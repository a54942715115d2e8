//! # Application Errors
//!
//! Error taxonomy for fulfillment resolution.
//!
//! Two tiers:
//!
//! - [`ResolutionError`]: fatal for the whole request. Input validation,
//!   geocoding, and the catalog read abort resolution with no partial
//!   output.
//! - [`CandidateError`]: scoped to one candidate distribution point.
//!   Logged at warning level, then the candidate is dropped; the caller
//!   never sees it.
//!
//! ```text
//! ResolutionError
//! ├── InvalidPostalCode   - user error, surfaced as a client error
//! ├── AddressNotFound     - valid input, no match, client error
//! └── Upstream            - geocoder/catalog failure, server error
//! CandidateError (never surfaced)
//! ├── Distance            - road-distance lookup failed
//! ├── Classification      - provider distance violated its contract
//! ├── Association         - weak-reference lookup failed
//! ├── Quote               - carrier quote missing or malformed
//! └── Pricing             - quoted amount violated domain invariants
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::carriers::CarrierError;
use crate::infrastructure::geocoding::GeocodeError;
use crate::infrastructure::persistence::RepositoryError;
use crate::infrastructure::routing::RoutingError;
use thiserror::Error;

/// Fatal error for a resolution request.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The postal code is malformed. Rejected before any upstream call.
    #[error("invalid postal code: {value}")]
    InvalidPostalCode {
        /// The rejected input.
        value: String,
    },

    /// The postal code is valid but geocodes to nothing.
    #[error("no address found for postal code {postal_code}")]
    AddressNotFound {
        /// The postal code with no match.
        postal_code: String,
    },

    /// A resolver-fatal collaborator failed.
    #[error("upstream failure in {service}: {message}")]
    Upstream {
        /// Which collaborator failed.
        service: &'static str,
        /// Failure description.
        message: String,
    },
}

impl ResolutionError {
    /// Creates an invalid postal code error.
    #[must_use]
    pub fn invalid_postal_code(value: impl Into<String>) -> Self {
        Self::InvalidPostalCode {
            value: value.into(),
        }
    }

    /// Creates an address not found error.
    #[must_use]
    pub fn address_not_found(postal_code: impl Into<String>) -> Self {
        Self::AddressNotFound {
            postal_code: postal_code.into(),
        }
    }

    /// Creates an upstream failure error.
    #[must_use]
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Returns true if the failure is attributable to the caller.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPostalCode { .. } | Self::AddressNotFound { .. }
        )
    }
}

impl From<GeocodeError> for ResolutionError {
    fn from(error: GeocodeError) -> Self {
        match error {
            GeocodeError::NotFound { postal_code } => Self::AddressNotFound { postal_code },
            GeocodeError::Provider(e) => Self::upstream("geocoder", e.to_string()),
        }
    }
}

impl From<RepositoryError> for ResolutionError {
    fn from(error: RepositoryError) -> Self {
        Self::upstream("store catalog", error.to_string())
    }
}

/// Result type for resolution requests.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Non-fatal error scoped to one candidate distribution point.
#[derive(Debug, Error)]
pub enum CandidateError {
    /// Road-distance lookup failed.
    #[error("distance lookup failed: {0}")]
    Distance(#[from] RoutingError),

    /// The reported distance violated the provider contract.
    #[error("distance contract violation: {0}")]
    Classification(DomainError),

    /// The weak-reference store lookup failed.
    #[error("association lookup failed: {0}")]
    Association(#[from] RepositoryError),

    /// A carrier quote was missing or malformed.
    #[error("carrier quote failed: {0}")]
    Quote(#[from] CarrierError),

    /// A quoted amount violated domain invariants.
    #[error("quoted amount rejected: {0}")]
    Pricing(DomainError),
}
