//! # Melhor Envio Client
//!
//! Adapter for the Melhor Envio shipment calculator.
//!
//! One POST to `/api/v2/me/shipment/calculate` per service, authenticated
//! with a bearer token. The calculator answers an array with one entry per
//! requested service; prices come back as decimal strings.

use crate::domain::value_objects::PostalCode;
use crate::infrastructure::carriers::{
    CarrierError, CarrierQuote, CarrierQuoteClient, CarrierResult, CarrierService,
};
use crate::infrastructure::http::{HttpClient, ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Carrier quoting client backed by the Melhor Envio API.
#[derive(Debug, Clone)]
pub struct MelhorEnvioClient {
    http: HttpClient,
    base_url: String,
}

impl MelhorEnvioClient {
    /// Creates a new adapter.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Authentication` if the token cannot be used
    /// as a header value, or `ProviderError::Internal` if the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: &str,
        timeout_ms: u64,
    ) -> ProviderResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ProviderError::authentication("token is not a valid header"))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: HttpClient::with_headers(timeout_ms, headers)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn calculate_url(&self) -> String {
        format!("{}/api/v2/me/shipment/calculate", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct CalculateRequest<'a> {
    from: PostalRef<'a>,
    to: PostalRef<'a>,
    services: &'static str,
}

#[derive(Debug, Serialize)]
struct PostalRef<'a> {
    postal_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct CalculateEntry {
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    delivery_time: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

impl CalculateEntry {
    fn into_quote(self, service: CarrierService) -> CarrierResult<CarrierQuote> {
        if let Some(error) = self.error {
            return Err(CarrierError::malformed_quote(format!(
                "{service} rejected: {error}"
            )));
        }
        let price = self
            .price
            .ok_or_else(|| CarrierError::malformed_quote(format!("{service} missing price")))?
            .parse::<Decimal>()
            .map_err(|e| CarrierError::malformed_quote(format!("{service} price: {e}")))?;
        let delivery_time = self.delivery_time.ok_or_else(|| {
            CarrierError::malformed_quote(format!("{service} missing delivery_time"))
        })?;

        Ok(CarrierQuote::new(price, delivery_time))
    }
}

#[async_trait]
impl CarrierQuoteClient for MelhorEnvioClient {
    async fn quote(
        &self,
        from: &PostalCode,
        to: &PostalCode,
        service: CarrierService,
    ) -> CarrierResult<CarrierQuote> {
        let request = [CalculateRequest {
            from: PostalRef {
                postal_code: from.as_str(),
            },
            to: PostalRef {
                postal_code: to.as_str(),
            },
            services: service.code(),
        }];

        let entries: Vec<CalculateEntry> = self
            .http
            .post_json(&self.calculate_url(), &request)
            .await?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| CarrierError::malformed_quote(format!("{service} empty response")))?;

        let quote = entry.into_quote(service)?;
        debug!(%from, %to, %service, price = %quote.price(), days = quote.delivery_days(), "carrier quote received");

        Ok(quote)
    }
}
