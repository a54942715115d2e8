//! # Routing
//!
//! Port and adapters for road-distance lookups between two coordinates.
//!
//! ## Port
//!
//! - [`DistanceProvider`]: coordinate pair → road distance
//!
//! ## Adapters
//!
//! - [`google_routes::GoogleRoutesClient`]: Google Routes `computeRoutes`

pub mod google_routes;

use crate::domain::value_objects::Coordinate;
use crate::infrastructure::http::ProviderError;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub use google_routes::GoogleRoutesClient;

/// Error type for routing operations.
#[derive(Debug, Clone, Error)]
pub enum RoutingError {
    /// The provider found no drivable route between the points.
    #[error("no route found: {message}")]
    NoRoute {
        /// Error message.
        message: String,
    },

    /// The provider returned a distance violating its contract.
    #[error("invalid distance from provider: {value} km")]
    InvalidDistance {
        /// The offending value in kilometers.
        value: f64,
    },

    /// The routing provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RoutingError {
    /// Creates a no route error.
    #[must_use]
    pub fn no_route(message: impl Into<String>) -> Self {
        Self::NoRoute {
            message: message.into(),
        }
    }

    /// Creates an invalid distance error.
    #[must_use]
    pub fn invalid_distance(value: f64) -> Self {
        Self::InvalidDistance { value }
    }
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// A road distance between two points, with optional travel duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteDistance {
    km: f64,
    duration: Option<Duration>,
}

impl RouteDistance {
    /// Creates a route distance.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::InvalidDistance` for a negative or non-finite
    /// distance.
    pub fn new(km: f64, duration: Option<Duration>) -> RoutingResult<Self> {
        if !km.is_finite() || km < 0.0 {
            return Err(RoutingError::invalid_distance(km));
        }
        Ok(Self { km, duration })
    }

    /// Returns the distance in kilometers.
    #[inline]
    #[must_use]
    pub fn km(&self) -> f64 {
        self.km
    }

    /// Returns the travel duration, when the provider reported one.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

impl fmt::Display for RouteDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km", self.km)
    }
}

/// Port for road-distance lookups.
#[async_trait]
pub trait DistanceProvider: Send + Sync + fmt::Debug {
    /// Computes the road distance from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::NoRoute` when the points are not connected by
    /// road and `RoutingError::Provider` for transport failures.
    async fn road_distance(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> RoutingResult<RouteDistance>;
}
