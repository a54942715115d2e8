//! # Postal Code
//!
//! Brazilian postal code (CEP) value object.
//!
//! A CEP has exactly 8 digits. [`PostalCode::parse`] strips any non-digit
//! characters first, so `"01310-100"` and `"01310100"` normalize to the same
//! value. Validation happens before any upstream call is made.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a CEP.
const CEP_DIGITS: usize = 8;

/// A validated, normalized Brazilian postal code.
///
/// # Examples
///
/// ```
/// use store_fulfillment::domain::value_objects::PostalCode;
///
/// let cep = PostalCode::parse("01310-100").unwrap();
/// assert_eq!(cep.as_str(), "01310100");
/// assert_eq!(cep.formatted(), "01310-100");
///
/// assert!(PostalCode::parse("123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parses a postal code, stripping non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPostalCode` unless exactly 8 digits
    /// remain after stripping.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != CEP_DIGITS {
            return Err(DomainError::invalid_postal_code(raw));
        }
        Ok(Self(digits))
    }

    /// Returns the normalized 8-digit form.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional hyphenated form, e.g. `"01310-100"`.
    #[must_use]
    pub fn formatted(&self) -> String {
        let (prefix, suffix) = self.0.split_at(5);
        format!("{prefix}-{suffix}")
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostalCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}
