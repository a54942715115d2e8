//! # Quote Aggregator
//!
//! Produces zero or one [`FulfillmentResult`] per candidate distribution
//! point.
//!
//! The tier decides the shape of the shipping menu:
//!
//! - LOCAL: one flat-rate express-courier option, lead time quoted from the
//!   carrier.
//! - CARRIER: the retail store associated with the point is resolved via
//!   its weak reference, then Sedex and PAC are quoted concurrently. Both
//!   quotes must succeed; a partial menu is unusable and drops the
//!   candidate.

use crate::application::error::CandidateError;
use crate::domain::entities::store::StoreRecord;
use crate::domain::services::proximity::ProximityTier;
use crate::domain::value_objects::{LeadTime, Money, PostalCode};
use crate::infrastructure::carriers::{CarrierQuote, CarrierQuoteClient, CarrierService};
use crate::infrastructure::persistence::StoreRepository;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Customer-facing name of the local flat-rate courier service.
const LOCAL_SERVICE_DESCRIPTION: &str = "Motoboy";

/// One quoted service for one fulfillment point. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    /// Customer-facing service name.
    pub description: String,
    /// Delivery estimate, e.g. `"2 dias úteis"`.
    pub prazo: String,
    /// Price as a fixed two-decimal BRL string, e.g. `"R$ 15,00"`.
    pub price: String,
    /// Carrier service code, absent for local courier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,
}

/// One fulfillment option returned to the caller.
///
/// `distance_km` is the raw sort key; it stays internal while the rendered
/// `distance` string is part of the public contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentResult {
    /// Display name of the fulfillment point.
    pub name: String,
    /// City of the fulfillment point.
    pub city: String,
    /// Postal code of the fulfillment point, normalized digits.
    pub postal_code: String,
    /// Shipping tier this point was resolved under.
    pub tier: ProximityTier,
    /// Human-readable road distance from the origin, e.g. `"10.0 km"`.
    pub distance: String,
    /// Quoted services: one for LOCAL, `[Sedex, PAC]` for CARRIER.
    pub options: Vec<ShippingOption>,
    /// Raw distance used only for ordering.
    #[serde(skip)]
    pub distance_km: f64,
}

/// Renders a road distance the way results expose it.
fn format_distance(distance_km: f64) -> String {
    format!("{distance_km:.1} km")
}

/// Configuration for quote aggregation.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Flat price charged for local courier deliveries.
    pub local_flat_price: Decimal,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            local_flat_price: Decimal::new(1500, 2),
        }
    }
}

impl QuoteConfig {
    /// Sets the local flat price.
    #[must_use]
    pub fn with_local_flat_price(mut self, price: Decimal) -> Self {
        self.local_flat_price = price;
        self
    }
}

/// Builds the shipping menu for one candidate distribution point.
#[derive(Debug)]
pub struct QuoteAggregator {
    repository: Arc<dyn StoreRepository>,
    carrier: Arc<dyn CarrierQuoteClient>,
    config: QuoteConfig,
}

impl QuoteAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new(
        repository: Arc<dyn StoreRepository>,
        carrier: Arc<dyn CarrierQuoteClient>,
        config: QuoteConfig,
    ) -> Self {
        Self {
            repository,
            carrier,
            config,
        }
    }

    /// Creates a new aggregator with default configuration.
    #[must_use]
    pub fn with_defaults(
        repository: Arc<dyn StoreRepository>,
        carrier: Arc<dyn CarrierQuoteClient>,
    ) -> Self {
        Self::new(repository, carrier, QuoteConfig::default())
    }

    /// Quotes one candidate.
    ///
    /// Returns `Ok(None)` when the candidate is legitimately out of scope
    /// (no associated retail store for the carrier tier). Any error means
    /// the candidate must be dropped by the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`CandidateError`] when an association lookup fails, a
    /// quote is missing or malformed, or a quoted amount violates domain
    /// invariants.
    pub async fn quote_candidate(
        &self,
        point: &StoreRecord,
        origin: &PostalCode,
        tier: ProximityTier,
        distance_km: f64,
    ) -> Result<Option<FulfillmentResult>, CandidateError> {
        match tier {
            ProximityTier::Local => self.quote_local(point, origin, distance_km).await.map(Some),
            ProximityTier::Carrier => self.quote_carrier(point, origin, distance_km).await,
        }
    }

    /// LOCAL tier: flat price, carrier-quoted lead time.
    async fn quote_local(
        &self,
        point: &StoreRecord,
        origin: &PostalCode,
        distance_km: f64,
    ) -> Result<FulfillmentResult, CandidateError> {
        let quote = self
            .carrier
            .quote(point.postal_code(), origin, CarrierService::Sedex)
            .await?;

        let price = Money::new(self.config.local_flat_price).map_err(CandidateError::Pricing)?;
        let option = ShippingOption {
            description: LOCAL_SERVICE_DESCRIPTION.to_string(),
            prazo: LeadTime::new(quote.delivery_days()).to_string(),
            price: price.to_brl_string(),
            carrier_code: None,
        };

        debug!(candidate = %point.id(), distance_km, "local candidate accepted");

        Ok(FulfillmentResult {
            name: point.name().to_string(),
            city: point.city().to_string(),
            postal_code: point.postal_code().as_str().to_string(),
            tier: ProximityTier::Local,
            distance: format_distance(distance_km),
            options: vec![option],
            distance_km,
        })
    }

    /// CARRIER tier: resolve the associated store, quote both services.
    async fn quote_carrier(
        &self,
        point: &StoreRecord,
        origin: &PostalCode,
        distance_km: f64,
    ) -> Result<Option<FulfillmentResult>, CandidateError> {
        let Some(store) = self.repository.find_store_for_point(point.id()).await? else {
            // Expected: not every point backs an online-sellable store.
            debug!(candidate = %point.id(), "no associated retail store, skipping");
            return Ok(None);
        };

        if self.repository.find_associated_point(&store).await?.is_none() {
            debug!(candidate = %point.id(), store = %store.id(), "dangling association, skipping");
            return Ok(None);
        }

        let (sedex, pac) = tokio::join!(
            self.carrier
                .quote(store.postal_code(), origin, CarrierService::Sedex),
            self.carrier
                .quote(store.postal_code(), origin, CarrierService::Pac),
        );
        let options = vec![
            carrier_option(CarrierService::Sedex, &sedex?)?,
            carrier_option(CarrierService::Pac, &pac?)?,
        ];

        debug!(candidate = %point.id(), store = %store.id(), distance_km, "carrier candidate accepted");

        Ok(Some(FulfillmentResult {
            name: store.name().to_string(),
            city: store.city().to_string(),
            postal_code: store.postal_code().as_str().to_string(),
            tier: ProximityTier::Carrier,
            distance: format_distance(distance_km),
            options,
            distance_km,
        }))
    }
}

/// Shapes one carrier quote into a shipping option.
fn carrier_option(
    service: CarrierService,
    quote: &CarrierQuote,
) -> Result<ShippingOption, CandidateError> {
    let price = Money::new(quote.price()).map_err(CandidateError::Pricing)?;
    Ok(ShippingOption {
        description: service.description().to_string(),
        prazo: LeadTime::new(quote.delivery_days()).to_string(),
        price: price.to_brl_string(),
        carrier_code: Some(service.code().to_string()),
    })
}
