//! # Store Id
//!
//! Natural record key for distribution points and retail stores.
//!
//! Keys look like `PDV001` or `LOJA002`. A well-formed key is non-empty,
//! at most 64 characters, and built from ASCII alphanumerics, `-` and `_`.
//! Malformed keys are rejected before any repository lookup.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum accepted key length.
const MAX_ID_LEN: usize = 64;

/// A validated store record key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreId(String);

impl StoreId {
    /// Parses a store id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStoreId` if the input is empty, longer
    /// than 64 characters, or contains characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.is_empty()
            || raw.len() > MAX_ID_LEN
            || !raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::invalid_store_id(raw));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StoreId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StoreId> for String {
    fn from(id: StoreId) -> Self {
        id.0
    }
}
