//! Service entry point: configuration, tracing, adapter wiring, serving.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use store_fulfillment::api::rest::{AppState, create_router};
use store_fulfillment::application::services::fulfillment_resolver::{
    FulfillmentResolver, ResolverConfig,
};
use store_fulfillment::application::services::quote_aggregation::QuoteAggregator;
use store_fulfillment::config::AppConfig;
use store_fulfillment::domain::entities::store::StoreRecord;
use store_fulfillment::infrastructure::carriers::{CarrierQuoteClient, MelhorEnvioClient};
use store_fulfillment::infrastructure::geocoding::{Geocoder, ViaCepGeocoder};
use store_fulfillment::infrastructure::persistence::{InMemoryStoreRepository, StoreRepository};
use store_fulfillment::infrastructure::routing::{DistanceProvider, GoogleRoutesClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let geocoder: Arc<dyn Geocoder> = Arc::new(
        ViaCepGeocoder::new(config.geocoder.base_url.as_str(), config.geocoder.timeout_ms)
            .context("building geocoder adapter")?,
    );
    let distance_provider: Arc<dyn DistanceProvider> = Arc::new(
        GoogleRoutesClient::new(
            config.routing.base_url.as_str(),
            config.routing.api_key.as_str(),
            config.routing.timeout_ms,
        )
        .context("building routing adapter")?,
    );
    let carrier: Arc<dyn CarrierQuoteClient> = Arc::new(
        MelhorEnvioClient::new(
            config.carrier.base_url.as_str(),
            &config.carrier.token,
            config.carrier.timeout_ms,
        )
        .context("building carrier adapter")?,
    );

    let repository: Arc<dyn StoreRepository> = match &config.seed_file {
        Some(path) => {
            let records = load_seed(path)?;
            info!(records = records.len(), seed = %path.display(), "catalog seeded");
            Arc::new(InMemoryStoreRepository::with_records(records))
        }
        None => Arc::new(InMemoryStoreRepository::new()),
    };

    let aggregator = QuoteAggregator::with_defaults(Arc::clone(&repository), carrier);
    let resolver = Arc::new(FulfillmentResolver::new(
        geocoder,
        distance_provider,
        Arc::clone(&repository),
        aggregator,
        ResolverConfig::default().with_max_in_flight(config.resolver.max_in_flight),
    ));

    let state = Arc::new(AppState {
        repository,
        resolver,
    });
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr()))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router).await.context("serving")?;

    Ok(())
}

/// Reads the catalog seed file.
fn load_seed(path: &Path) -> anyhow::Result<Vec<StoreRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing seed file {}", path.display()))
}
