//! # Money
//!
//! Non-negative monetary amount in BRL.
//!
//! Amounts are held as [`rust_decimal::Decimal`] and rendered in the fixed
//! two-decimal Brazilian format (`"R$ 20,00"`), which is the shape quoting
//! responses expose to callers.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative BRL amount.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use store_fulfillment::domain::value_objects::Money;
///
/// let price = Money::new(Decimal::new(2550, 2)).unwrap();
/// assert_eq!(price.to_brl_string(), "R$ 25,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the amount is negative.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::invalid_amount(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Renders the amount as a fixed two-decimal BRL string, e.g. `"R$ 15,00"`.
    #[must_use]
    pub fn to_brl_string(&self) -> String {
        format!("R$ {:.2}", self.0.round_dp(2)).replace('.', ",")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_brl_string())
    }
}
