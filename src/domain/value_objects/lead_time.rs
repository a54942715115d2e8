//! # Lead Time
//!
//! Delivery estimate in business days, with the Portuguese rendering used
//! in quoting responses (`"1 dia útil"`, `"2 dias úteis"`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A delivery estimate in business days.
///
/// # Examples
///
/// ```
/// use store_fulfillment::domain::value_objects::LeadTime;
///
/// assert_eq!(LeadTime::new(1).to_string(), "1 dia útil");
/// assert_eq!(LeadTime::new(4).to_string(), "4 dias úteis");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadTime(u32);

impl LeadTime {
    /// Creates a lead time of the given number of business days.
    #[inline]
    #[must_use]
    pub fn new(days: u32) -> Self {
        Self(days)
    }

    /// Returns the number of business days.
    #[inline]
    #[must_use]
    pub fn days(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 dia útil")
        } else {
            write!(f, "{} dias úteis", self.0)
        }
    }
}
