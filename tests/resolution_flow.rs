//! End-to-end tests: router + resolver over mock collaborator ports.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use store_fulfillment::api::rest::{AppState, create_router};
use store_fulfillment::application::services::fulfillment_resolver::{
    FulfillmentResolver, ResolverConfig,
};
use store_fulfillment::application::services::quote_aggregation::QuoteAggregator;
use store_fulfillment::domain::entities::store::{StoreKind, StoreRecord};
use store_fulfillment::domain::value_objects::{Coordinate, PostalCode, RegionCode, StoreId};
use store_fulfillment::infrastructure::carriers::{
    CarrierError, CarrierQuote, CarrierQuoteClient, CarrierResult, CarrierService,
};
use store_fulfillment::infrastructure::geocoding::{
    GeocodeError, GeocodeResult, GeocodedAddress, Geocoder,
};
use store_fulfillment::infrastructure::http::ProviderError;
use store_fulfillment::infrastructure::persistence::{InMemoryStoreRepository, StoreRepository};
use store_fulfillment::infrastructure::routing::{
    DistanceProvider, RouteDistance, RoutingError, RoutingResult,
};
use tower::ServiceExt;

#[derive(Debug)]
struct MockGeocoder {
    result: GeocodeResult<GeocodedAddress>,
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn resolve(&self, _postal_code: &PostalCode) -> GeocodeResult<GeocodedAddress> {
        self.result.clone()
    }
}

fn recife_geocoder() -> MockGeocoder {
    MockGeocoder {
        result: Ok(GeocodedAddress::new(
            Coordinate::new(-8.0476, -34.877).unwrap(),
            "Rua da Aurora",
            "Boa Vista",
            "Recife",
            "PE",
        )),
    }
}

/// Distance stub keyed by the candidate's latitude.
#[derive(Debug, Default)]
struct MockDistanceProvider {
    by_latitude: HashMap<i64, f64>,
}

impl MockDistanceProvider {
    fn with_km(mut self, latitude: f64, km: f64) -> Self {
        self.by_latitude.insert(key(latitude), km);
        self
    }
}

fn key(latitude: f64) -> i64 {
    (latitude * 1_000_000.0) as i64
}

#[async_trait]
impl DistanceProvider for MockDistanceProvider {
    async fn road_distance(
        &self,
        origin: &Coordinate,
        _destination: &Coordinate,
    ) -> RoutingResult<RouteDistance> {
        match self.by_latitude.get(&key(origin.latitude())) {
            Some(km) => RouteDistance::new(*km, None),
            None => Err(RoutingError::no_route("no script entry")),
        }
    }
}

#[derive(Debug, Default)]
struct ScriptedCarrier {
    responses: HashMap<&'static str, CarrierResult<CarrierQuote>>,
}

impl ScriptedCarrier {
    fn with(mut self, service: CarrierService, result: CarrierResult<CarrierQuote>) -> Self {
        self.responses.insert(service.code(), result);
        self
    }
}

#[async_trait]
impl CarrierQuoteClient for ScriptedCarrier {
    async fn quote(
        &self,
        _from: &PostalCode,
        _to: &PostalCode,
        service: CarrierService,
    ) -> CarrierResult<CarrierQuote> {
        self.responses
            .get(service.code())
            .cloned()
            .unwrap_or_else(|| Err(CarrierError::malformed_quote("no script entry")))
    }
}

fn point_at(id: &str, latitude: f64, state: &str) -> StoreRecord {
    StoreRecord::builder(
        StoreId::parse(id).unwrap(),
        format!("PDV {id}"),
        StoreKind::Pdv,
        Coordinate::new(latitude, -34.9).unwrap(),
        PostalCode::parse("50000-000").unwrap(),
        "Recife",
        RegionCode::parse(state).unwrap(),
    )
    .build()
}

fn store_for(id: &str, point_id: &str) -> StoreRecord {
    StoreRecord::builder(
        StoreId::parse(id).unwrap(),
        format!("Loja {id}"),
        StoreKind::Loja,
        Coordinate::new(-8.2, -34.9).unwrap(),
        PostalCode::parse("51000-000").unwrap(),
        "São Paulo",
        RegionCode::parse("SP").unwrap(),
    )
    .with_associated_pdv(StoreId::parse(point_id).unwrap())
    .build()
}

fn app(
    geocoder: MockGeocoder,
    distance: MockDistanceProvider,
    carrier: ScriptedCarrier,
    records: Vec<StoreRecord>,
) -> Router {
    let repository: Arc<dyn StoreRepository> =
        Arc::new(InMemoryStoreRepository::with_records(records));
    let carrier: Arc<dyn CarrierQuoteClient> = Arc::new(carrier);
    let aggregator = QuoteAggregator::with_defaults(Arc::clone(&repository), carrier);
    let resolver = Arc::new(FulfillmentResolver::new(
        Arc::new(geocoder),
        Arc::new(distance),
        Arc::clone(&repository),
        aggregator,
        ResolverConfig::default(),
    ));
    create_router(Arc::new(AppState {
        repository,
        resolver,
    }))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, uri: &str) -> axum::response::Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn default_app() -> Router {
    app(
        recife_geocoder(),
        MockDistanceProvider::default()
            .with_km(-8.01, 10.0)
            .with_km(-8.02, 120.0),
        ScriptedCarrier::default()
            .with(
                CarrierService::Sedex,
                Ok(CarrierQuote::new(Decimal::new(2550, 2), 2)),
            )
            .with(
                CarrierService::Pac,
                Ok(CarrierQuote::new(Decimal::new(2000, 2), 4)),
            ),
        vec![
            point_at("PDV001", -8.01, "PE"),
            point_at("PDV002", -8.02, "SP"),
            store_for("LOJA001", "PDV002"),
        ],
    )
}

#[tokio::test]
async fn health_endpoint() {
    let router = default_app();
    let response = get(&router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn list_stores_returns_every_record() {
    let router = default_app();
    let response = get(&router, "/store").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn store_by_id_found() {
    let router = default_app();
    let response = get(&router, "/store/PDV001").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], "PDV001");
}

#[tokio::test]
async fn store_by_malformed_id_is_bad_request() {
    let router = default_app();
    let response = get(&router, "/store/PDV!001").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_by_unknown_id_is_not_found() {
    let router = default_app();
    let response = get(&router, "/store/PDV999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stores_by_state_lowercase_code_matches() {
    let router = default_app();
    let response = get(&router, "/store/state/pe").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn stores_by_state_rejects_long_codes() {
    let router = default_app();
    let response = get(&router, "/store/state/pernambuco").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stores_by_state_with_zero_matches_is_not_found() {
    let router = default_app();
    let response = get(&router, "/store/state/MG").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resolve_ranks_local_before_carrier() {
    let router = default_app();
    let response = get(&router, "/store/cep/50710-000").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first["tier"], "LOCAL");
    assert_eq!(first["distance"], "10.0 km");
    assert_eq!(first["postalCode"], "50000000");
    assert_eq!(first["options"].as_array().unwrap().len(), 1);
    assert_eq!(first["options"][0]["price"], "R$ 15,00");
    assert_eq!(first["options"][0]["prazo"], "2 dias úteis");
    // The raw sort key stays internal.
    assert!(first.get("distanceKm").is_none());

    let second = &results[1];
    assert_eq!(second["tier"], "CARRIER");
    assert_eq!(second["name"], "Loja LOJA001");
    let options = second["options"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0]["description"], "Sedex");
    assert_eq!(options[1]["description"], "PAC");
    assert_eq!(options[1]["price"], "R$ 20,00");
    assert_eq!(options[1]["prazo"], "4 dias úteis");
    assert_eq!(options[0]["carrierCode"], "1");
}

#[tokio::test]
async fn resolve_malformed_cep_is_bad_request() {
    let router = default_app();
    let response = get(&router, "/store/cep/123").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn resolve_unknown_cep_is_not_found() {
    let router = app(
        MockGeocoder {
            result: Err(GeocodeError::not_found("99999999")),
        },
        MockDistanceProvider::default(),
        ScriptedCarrier::default(),
        vec![point_at("PDV001", -8.01, "PE")],
    );
    let response = get(&router, "/store/cep/99999-999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resolve_geocoder_outage_is_internal_error() {
    let router = app(
        MockGeocoder {
            result: Err(GeocodeError::Provider(ProviderError::timeout(
                "gateway timed out",
            ))),
        },
        MockDistanceProvider::default(),
        ScriptedCarrier::default(),
        vec![point_at("PDV001", -8.01, "PE")],
    );
    let response = get(&router, "/store/cep/50710-000").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "internal_error");
}

#[tokio::test]
async fn partial_carrier_menu_never_reaches_the_response() {
    let router = app(
        recife_geocoder(),
        MockDistanceProvider::default().with_km(-8.02, 120.0),
        ScriptedCarrier::default()
            .with(
                CarrierService::Sedex,
                Ok(CarrierQuote::new(Decimal::new(2550, 2), 2)),
            )
            .with(
                CarrierService::Pac,
                Err(CarrierError::malformed_quote("unserviceable")),
            ),
        vec![point_at("PDV002", -8.02, "SP"), store_for("LOJA001", "PDV002")],
    );
    let response = get(&router, "/store/cep/50710-000").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}
