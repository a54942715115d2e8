//! # Region Code
//!
//! Two-letter Brazilian federative unit code (UF).

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated two-letter region code, stored uppercase.
///
/// # Examples
///
/// ```
/// use store_fulfillment::domain::value_objects::RegionCode;
///
/// let uf = RegionCode::parse("pe").unwrap();
/// assert_eq!(uf.as_str(), "PE");
///
/// assert!(RegionCode::parse("pernambuco").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Parses a region code, uppercasing it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRegionCode` unless the input is exactly
    /// two ASCII letters.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_region_code(raw));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the uppercase two-letter code.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegionCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}
