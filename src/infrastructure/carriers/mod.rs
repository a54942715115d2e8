//! # Carriers
//!
//! Port and adapters for carrier rate quoting.
//!
//! ## Port
//!
//! - [`CarrierQuoteClient`]: postal code pair + service → price and lead time
//!
//! ## Adapters
//!
//! - [`melhor_envio::MelhorEnvioClient`]: Melhor Envio shipment calculator

pub mod melhor_envio;

use crate::domain::value_objects::PostalCode;
use crate::infrastructure::http::ProviderError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

pub use melhor_envio::MelhorEnvioClient;

/// Error type for carrier quoting operations.
#[derive(Debug, Clone, Error)]
pub enum CarrierError {
    /// The provider answered, but the quote was missing or malformed.
    #[error("malformed carrier quote: {message}")]
    MalformedQuote {
        /// Error message.
        message: String,
    },

    /// The quoting provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl CarrierError {
    /// Creates a malformed quote error.
    #[must_use]
    pub fn malformed_quote(message: impl Into<String>) -> Self {
        Self::MalformedQuote {
            message: message.into(),
        }
    }
}

/// Result type for carrier quoting operations.
pub type CarrierResult<T> = Result<T, CarrierError>;

/// Carrier service being quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierService {
    /// Premium express service.
    Sedex,
    /// Economy service.
    Pac,
}

impl CarrierService {
    /// Returns the provider's numeric service code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sedex => "1",
            Self::Pac => "2",
        }
    }

    /// Returns the customer-facing service name.
    #[inline]
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sedex => "Sedex",
            Self::Pac => "PAC",
        }
    }
}

impl fmt::Display for CarrierService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// One quoted carrier service: price and transit estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierQuote {
    price: Decimal,
    delivery_days: u32,
}

impl CarrierQuote {
    /// Creates a carrier quote.
    #[must_use]
    pub fn new(price: Decimal, delivery_days: u32) -> Self {
        Self {
            price,
            delivery_days,
        }
    }

    /// Returns the quoted price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the transit estimate in business days.
    #[inline]
    #[must_use]
    pub fn delivery_days(&self) -> u32 {
        self.delivery_days
    }
}

/// Port for carrier rate quoting.
#[async_trait]
pub trait CarrierQuoteClient: Send + Sync + fmt::Debug {
    /// Quotes one service for a shipment from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::MalformedQuote` when the provider answer lacks
    /// a usable price or lead time, and `CarrierError::Provider` for
    /// transport failures.
    async fn quote(
        &self,
        from: &PostalCode,
        to: &PostalCode,
        service: CarrierService,
    ) -> CarrierResult<CarrierQuote>;
}
