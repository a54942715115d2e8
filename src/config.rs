//! # Configuration
//!
//! Layered application configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. `config/default.toml` (optional)
//! 2. `config/local.toml` (optional)
//! 3. Environment variables prefixed `APP`, `__`-separated,
//!    e.g. `APP__SERVER__PORT=8080`, `APP__CARRIER__TOKEN=...`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Geocoding gateway settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of the ViaCEP-compatible gateway.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://viacep.com.br".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Routing provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Base URL of the Google Routes API.
    pub base_url: String,
    /// API key sent as `X-Goog-Api-Key`.
    pub api_key: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://routes.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_ms: 5000,
        }
    }
}

/// Carrier quoting settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CarrierConfig {
    /// Base URL of the Melhor Envio API.
    pub base_url: String,
    /// Bearer token.
    pub token: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sandbox.melhorenvio.com.br".to_string(),
            token: String::new(),
            timeout_ms: 5000,
        }
    }
}

/// Resolver tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Upper bound on candidates evaluated concurrently.
    pub max_in_flight: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self { max_in_flight: 8 }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Geocoding gateway settings.
    pub geocoder: GeocoderConfig,
    /// Routing provider settings.
    pub routing: RoutingConfig,
    /// Carrier quoting settings.
    pub carrier: CarrierConfig,
    /// Resolver tuning.
    pub resolver: ResolverSettings,
    /// Optional JSON file the catalog is seeded from at startup.
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from files and the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be read or a value fails
    /// to deserialize.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
