//! # ViaCEP Geocoder
//!
//! Adapter for a ViaCEP-compatible CEP lookup gateway.
//!
//! The gateway answers `GET {base}/ws/{cep}/json/` with the address
//! components for a CEP, a `lat`/`lng` pair, and `"erro": true` when the
//! CEP matches nothing.

use crate::domain::value_objects::{Coordinate, PostalCode};
use crate::infrastructure::geocoding::{GeocodeError, GeocodeResult, GeocodedAddress, Geocoder};
use crate::infrastructure::http::{HttpClient, ProviderError, ProviderResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

/// Geocoder backed by a ViaCEP-compatible HTTP gateway.
#[derive(Debug, Clone)]
pub struct ViaCepGeocoder {
    http: HttpClient,
    base_url: String,
}

impl ViaCepGeocoder {
    /// Creates a new adapter.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> ProviderResult<Self> {
        Ok(Self {
            http: HttpClient::new(timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, postal_code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, postal_code.as_str())
    }
}

/// Wire shape of a gateway response.
#[derive(Debug, Deserialize)]
struct CepPayload {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lng: Option<String>,
}

impl CepPayload {
    /// Extracts the coordinate, enforcing the gateway contract.
    fn coordinate(&self) -> ProviderResult<Coordinate> {
        let lat = self
            .lat
            .as_deref()
            .ok_or_else(|| ProviderError::protocol("response missing lat"))?
            .parse::<f64>()
            .map_err(|e| ProviderError::protocol(format!("unparseable lat: {e}")))?;
        let lng = self
            .lng
            .as_deref()
            .ok_or_else(|| ProviderError::protocol("response missing lng"))?
            .parse::<f64>()
            .map_err(|e| ProviderError::protocol(format!("unparseable lng: {e}")))?;

        Coordinate::new(lat, lng)
            .map_err(|e| ProviderError::protocol(format!("invalid coordinate: {e}")))
    }
}

#[async_trait]
impl Geocoder for ViaCepGeocoder {
    async fn resolve(&self, postal_code: &PostalCode) -> GeocodeResult<GeocodedAddress> {
        debug!(cep = %postal_code, "looking up address");

        let payload: CepPayload = self.http.get_json(&self.lookup_url(postal_code)).await?;

        if payload.erro {
            return Err(GeocodeError::not_found(postal_code.as_str()));
        }

        let address = GeocodedAddress::new(
            payload.coordinate()?,
            payload.logradouro,
            payload.bairro,
            payload.localidade,
            payload.uf,
        );
        info!(cep = %postal_code, address = %address, "address resolved");

        Ok(address)
    }
}
