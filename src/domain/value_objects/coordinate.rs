//! # Coordinate
//!
//! Geographic coordinate value object.
//!
//! A [`Coordinate`] is validated at construction: latitude must lie in
//! `[-90, 90]`, longitude in `[-180, 180]`, and both must be finite. Once
//! built it is immutable.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum valid latitude in degrees.
const MIN_LATITUDE: f64 = -90.0;
/// Maximum valid latitude in degrees.
const MAX_LATITUDE: f64 = 90.0;
/// Minimum valid longitude in degrees.
const MIN_LONGITUDE: f64 = -180.0;
/// Maximum valid longitude in degrees.
const MAX_LONGITUDE: f64 = 180.0;

/// A validated geographic coordinate.
///
/// # Examples
///
/// ```
/// use store_fulfillment::domain::value_objects::Coordinate;
///
/// let recife = Coordinate::new(-8.0476, -34.877).unwrap();
/// assert!((recife.latitude() + 8.0476).abs() < f64::EPSILON);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if either component is
    /// non-finite or outside its geographic range.
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(DomainError::invalid_coordinate(format!(
                "latitude {latitude} outside [{MIN_LATITUDE}, {MAX_LATITUDE}]"
            )));
        }
        if !longitude.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(DomainError::invalid_coordinate(format!(
                "longitude {longitude} outside [{MIN_LONGITUDE}, {MAX_LONGITUDE}]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Serde surrogate so deserialized coordinates go through validation.
#[derive(Debug, Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DomainError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}
