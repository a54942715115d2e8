//! # Proximity Classifier
//!
//! Decides which shipping tier applies to a candidate distribution point
//! based on its road distance from the origin.
//!
//! The boundary is [`LOCAL_RADIUS_KM`]: at or under it a point dispatches
//! local flat-rate courier deliveries, beyond it fulfillment goes through
//! the carrier via the point's associated retail store.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius in kilometers within which a distribution point ships locally.
pub const LOCAL_RADIUS_KM: f64 = 50.0;

/// Shipping tier for one candidate. Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProximityTier {
    /// Within [`LOCAL_RADIUS_KM`]: flat-rate local courier.
    Local,
    /// Beyond [`LOCAL_RADIUS_KM`]: carrier shipping via the associated store.
    Carrier,
}

impl ProximityTier {
    /// Returns true for the local tier.
    #[inline]
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for ProximityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "LOCAL"),
            Self::Carrier => write!(f, "CARRIER"),
        }
    }
}

/// Classifies a road distance into a shipping tier.
///
/// Pure function. A negative or non-finite distance is a contract violation
/// by the distance provider and fails the candidate instead of being
/// clamped.
///
/// # Errors
///
/// Returns `DomainError::InvalidDistance` for negative or non-finite input.
///
/// # Examples
///
/// ```
/// use store_fulfillment::domain::services::proximity::{classify, ProximityTier};
///
/// assert_eq!(classify(10.0).unwrap(), ProximityTier::Local);
/// assert_eq!(classify(120.0).unwrap(), ProximityTier::Carrier);
/// assert!(classify(-1.0).is_err());
/// ```
pub fn classify(distance_km: f64) -> DomainResult<ProximityTier> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(DomainError::invalid_distance(distance_km));
    }
    if distance_km <= LOCAL_RADIUS_KM {
        Ok(ProximityTier::Local)
    } else {
        Ok(ProximityTier::Carrier)
    }
}
