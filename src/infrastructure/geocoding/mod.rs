//! # Geocoding
//!
//! Port and adapters for resolving a postal code to a geographic origin.
//!
//! ## Port
//!
//! - [`Geocoder`]: postal code → coordinate + normalized address
//!
//! ## Adapters
//!
//! - [`viacep::ViaCepGeocoder`]: ViaCEP-compatible CEP lookup gateway

pub mod viacep;

use crate::domain::value_objects::{Coordinate, PostalCode};
use crate::infrastructure::http::ProviderError;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub use viacep::ViaCepGeocoder;

/// Error type for geocoding operations.
#[derive(Debug, Clone, Error)]
pub enum GeocodeError {
    /// The postal code is valid but matches no address.
    #[error("no address found for postal code {postal_code}")]
    NotFound {
        /// The postal code that produced no match.
        postal_code: String,
    },

    /// The geocoding provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl GeocodeError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(postal_code: impl Into<String>) -> Self {
        Self::NotFound {
            postal_code: postal_code.into(),
        }
    }
}

/// Result type for geocoding operations.
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// A geocoded origin: coordinate plus normalized address components.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    coordinate: Coordinate,
    street: String,
    district: String,
    city: String,
    state: String,
}

impl GeocodedAddress {
    /// Creates a geocoded address.
    #[must_use]
    pub fn new(
        coordinate: Coordinate,
        street: impl Into<String>,
        district: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            coordinate,
            street: street.into(),
            district: district.into(),
            city: city.into(),
            state: state.into(),
        }
    }

    /// Returns the resolved coordinate.
    #[inline]
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Returns the street name.
    #[inline]
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Returns the district.
    #[inline]
    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the federative unit.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the single-line normalized form,
    /// e.g. `"Avenida Paulista, Bela Vista, São Paulo - SP"`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.street, self.district, self.city, self.state
        )
    }
}

impl fmt::Display for GeocodedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Port for postal code geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync + fmt::Debug {
    /// Resolves a postal code to its coordinate and normalized address.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::NotFound` when the provider reports no match
    /// and `GeocodeError::Provider` for transport or contract failures.
    async fn resolve(&self, postal_code: &PostalCode) -> GeocodeResult<GeocodedAddress>;
}
