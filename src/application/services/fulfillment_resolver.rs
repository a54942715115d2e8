//! # Fulfillment Resolver
//!
//! Orchestrates one resolution request end to end.
//!
//! Pipeline: validate the postal code, geocode it, list every distribution
//! point, then evaluate candidates concurrently (distance → tier → quote)
//! with bounded parallelism. Candidate failures are logged and drop only
//! that candidate; failures before the fan-out abort the whole request.
//!
//! Survivors are sorted ascending by road distance. The sort is stable and
//! candidates are evaluated in catalog order, so equal distances keep
//! catalog order.

use crate::application::error::{CandidateError, ResolutionError, ResolutionResult};
use crate::application::services::quote_aggregation::{FulfillmentResult, QuoteAggregator};
use crate::domain::entities::store::{StoreKind, StoreRecord};
use crate::domain::services::proximity;
use crate::domain::value_objects::{Coordinate, PostalCode};
use crate::infrastructure::geocoding::Geocoder;
use crate::infrastructure::persistence::StoreRepository;
use crate::infrastructure::routing::DistanceProvider;
use futures::stream::{self, StreamExt};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on candidates evaluated concurrently. Protects upstream
    /// provider rate limits.
    pub max_in_flight: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_in_flight: 8 }
    }
}

impl ResolverConfig {
    /// Sets the candidate concurrency bound.
    #[must_use]
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }
}

/// Resolves the ranked fulfillment options for a postal code.
#[derive(Debug)]
pub struct FulfillmentResolver {
    geocoder: Arc<dyn Geocoder>,
    distance_provider: Arc<dyn DistanceProvider>,
    repository: Arc<dyn StoreRepository>,
    aggregator: QuoteAggregator,
    config: ResolverConfig,
}

impl FulfillmentResolver {
    /// Creates a new resolver.
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        distance_provider: Arc<dyn DistanceProvider>,
        repository: Arc<dyn StoreRepository>,
        aggregator: QuoteAggregator,
        config: ResolverConfig,
    ) -> Self {
        Self {
            geocoder,
            distance_provider,
            repository,
            aggregator,
            config,
        }
    }

    /// Resolves the fulfillment options for a raw postal code.
    ///
    /// An empty vector is a valid outcome: every candidate was dropped or
    /// the catalog holds no distribution points.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::InvalidPostalCode` for malformed input
    /// (before any upstream call), `ResolutionError::AddressNotFound` when
    /// the geocoder has no match, and `ResolutionError::Upstream` when the
    /// geocoder or the catalog fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw: &str) -> ResolutionResult<Vec<FulfillmentResult>> {
        let postal_code = PostalCode::parse(raw)
            .map_err(|_| ResolutionError::invalid_postal_code(raw))?;

        let origin = self.geocoder.resolve(&postal_code).await?;
        info!(cep = %postal_code, address = %origin, "origin geocoded");

        let points = self.repository.list_by_kind(StoreKind::Pdv).await?;
        debug!(candidates = points.len(), "evaluating distribution points");

        let origin_coordinate = origin.coordinate();
        let postal_code_ref = &postal_code;
        let mut results: Vec<FulfillmentResult> = stream::iter(points.into_iter().map(|point| {
            async move { self.evaluate(&point, origin_coordinate, postal_code_ref).await }
        }))
        .buffered(self.config.max_in_flight.max(1))
            .collect::<Vec<Option<FulfillmentResult>>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        // Stable: equal distances keep catalog order.
        results.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        });

        info!(cep = %postal_code, results = results.len(), "resolution finished");
        Ok(results)
    }

    /// Evaluates one candidate, mapping every failure to a drop.
    async fn evaluate(
        &self,
        point: &StoreRecord,
        origin: Coordinate,
        origin_cep: &PostalCode,
    ) -> Option<FulfillmentResult> {
        match self.evaluate_inner(point, origin, origin_cep).await {
            Ok(result) => result,
            Err(error) => {
                warn!(candidate = %point.id(), %error, "candidate dropped");
                None
            }
        }
    }

    /// Distance → tier → quote for one candidate.
    async fn evaluate_inner(
        &self,
        point: &StoreRecord,
        origin: Coordinate,
        origin_cep: &PostalCode,
    ) -> Result<Option<FulfillmentResult>, CandidateError> {
        let route = self
            .distance_provider
            .road_distance(&point.coordinate(), &origin)
            .await?;

        let tier = proximity::classify(route.km()).map_err(CandidateError::Classification)?;
        debug!(candidate = %point.id(), distance = %route, tier = %tier, "candidate classified");

        self.aggregator
            .quote_candidate(point, origin_cep, tier, route.km())
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::services::quote_aggregation::QuoteConfig;
    use crate::domain::services::proximity::ProximityTier;
    use crate::domain::value_objects::{RegionCode, StoreId};
    use crate::infrastructure::carriers::{
        CarrierError, CarrierQuote, CarrierQuoteClient, CarrierResult, CarrierService,
    };
    use crate::infrastructure::geocoding::{GeocodeError, GeocodeResult, GeocodedAddress};
    use crate::infrastructure::http::ProviderError;
    use crate::infrastructure::persistence::InMemoryStoreRepository;
    use crate::infrastructure::routing::{RouteDistance, RoutingError, RoutingResult};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    #[derive(Debug)]
    struct MockGeocoder {
        result: GeocodeResult<GeocodedAddress>,
        calls: AtomicUsize,
    }

    impl MockGeocoder {
        fn returning(result: GeocodeResult<GeocodedAddress>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        fn recife() -> Self {
            Self::returning(Ok(GeocodedAddress::new(
                Coordinate::new(-8.0476, -34.877).unwrap(),
                "Rua da Aurora",
                "Boa Vista",
                "Recife",
                "PE",
            )))
        }
    }

    #[async_trait]
    impl Geocoder for MockGeocoder {
        async fn resolve(&self, _postal_code: &PostalCode) -> GeocodeResult<GeocodedAddress> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.result.clone()
        }
    }

    /// Distance stub keyed by candidate id (via coordinate latitude).
    #[derive(Debug, Default)]
    struct MockDistanceProvider {
        by_latitude: HashMap<i64, RoutingResult<f64>>,
    }

    impl MockDistanceProvider {
        /// Scripts the distance for a point placed at `latitude`.
        fn with_km(mut self, latitude: f64, km: f64) -> Self {
            self.by_latitude.insert(key(latitude), Ok(km));
            self
        }

        fn with_error(mut self, latitude: f64, error: RoutingError) -> Self {
            self.by_latitude.insert(key(latitude), Err(error));
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
                Some(Ok(km)) => RouteDistance::new(*km, None),
                Some(Err(e)) => Err(e.clone()),
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

        fn sedex_and_pac() -> Self {
            Self::default()
                .with(
                    CarrierService::Sedex,
                    Ok(CarrierQuote::new(Decimal::new(2550, 2), 2)),
                )
                .with(
                    CarrierService::Pac,
                    Ok(CarrierQuote::new(Decimal::new(2000, 2), 4)),
                )
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

    /// A point at `latitude`; the mock distance provider keys on it.
    fn point_at(id: &str, latitude: f64) -> StoreRecord {
        StoreRecord::builder(
            StoreId::parse(id).unwrap(),
            format!("PDV {id}"),
            StoreKind::Pdv,
            Coordinate::new(latitude, -34.9).unwrap(),
            PostalCode::parse("50000-000").unwrap(),
            "Recife",
            RegionCode::parse("PE").unwrap(),
        )
        .build()
    }

    fn store_for(id: &str, point_id: &str) -> StoreRecord {
        StoreRecord::builder(
            StoreId::parse(id).unwrap(),
            format!("Loja {id}"),
            StoreKind::Loja,
            Coordinate::new(-8.1, -34.9).unwrap(),
            PostalCode::parse("51000-000").unwrap(),
            "São Paulo",
            RegionCode::parse("SP").unwrap(),
        )
        .with_associated_pdv(StoreId::parse(point_id).unwrap())
        .build()
    }

    fn resolver(
        geocoder: MockGeocoder,
        distance: MockDistanceProvider,
        carrier: ScriptedCarrier,
        records: Vec<StoreRecord>,
    ) -> FulfillmentResolver {
        let repository: Arc<dyn StoreRepository> =
            Arc::new(InMemoryStoreRepository::with_records(records));
        let carrier: Arc<dyn CarrierQuoteClient> = Arc::new(carrier);
        let aggregator = QuoteAggregator::new(
            Arc::clone(&repository),
            carrier,
            QuoteConfig::default(),
        );
        FulfillmentResolver::new(
            Arc::new(geocoder),
            Arc::new(distance),
            repository,
            aggregator,
            ResolverConfig::default(),
        )
    }

    #[tokio::test]
    async fn local_candidate_within_radius() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default().with_km(-8.01, 10.0),
            ScriptedCarrier::default().with(
                CarrierService::Sedex,
                Ok(CarrierQuote::new(Decimal::new(900, 2), 2)),
            ),
            vec![point_at("PDV001", -8.01)],
        );

        let results = resolver.resolve("50710-000").await.unwrap();

        assert_eq!(results.len(), 1);
        let first = results.first().unwrap();
        assert_eq!(first.tier, ProximityTier::Local);
        assert_eq!(first.distance, "10.0 km");
        assert_eq!(first.options.len(), 1);
        assert_eq!(first.options.first().unwrap().price, "R$ 15,00");
        assert_eq!(first.options.first().unwrap().prazo, "2 dias úteis");
    }

    #[tokio::test]
    async fn carrier_candidate_beyond_radius() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default().with_km(-8.01, 120.0),
            ScriptedCarrier::sedex_and_pac(),
            vec![point_at("PDV001", -8.01), store_for("LOJA001", "PDV001")],
        );

        let results = resolver.resolve("50710-000").await.unwrap();

        assert_eq!(results.len(), 1);
        let first = results.first().unwrap();
        assert_eq!(first.tier, ProximityTier::Carrier);
        assert_eq!(first.options.len(), 2);
        assert_eq!(first.options.get(1).unwrap().price, "R$ 20,00");
    }

    #[tokio::test]
    async fn partial_carrier_menu_removes_candidate_entirely() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default().with_km(-8.01, 120.0),
            ScriptedCarrier::default()
                .with(
                    CarrierService::Sedex,
                    Ok(CarrierQuote::new(Decimal::new(2550, 2), 2)),
                )
                .with(
                    CarrierService::Pac,
                    Err(CarrierError::malformed_quote("unserviceable")),
                ),
            vec![point_at("PDV001", -8.01), store_for("LOJA001", "PDV001")],
        );

        let results = resolver.resolve("50710-000").await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn malformed_postal_code_fails_before_any_upstream_call() {
        let geocoder = Arc::new(MockGeocoder::recife());
        let repository: Arc<dyn StoreRepository> = Arc::new(InMemoryStoreRepository::new());
        let carrier: Arc<dyn CarrierQuoteClient> = Arc::new(ScriptedCarrier::default());
        let aggregator =
            QuoteAggregator::new(Arc::clone(&repository), carrier, QuoteConfig::default());
        let resolver = FulfillmentResolver::new(
            Arc::clone(&geocoder) as Arc<dyn Geocoder>,
            Arc::new(MockDistanceProvider::default()),
            repository,
            aggregator,
            ResolverConfig::default(),
        );

        let error = resolver.resolve("123").await.unwrap_err();
        assert!(matches!(error, ResolutionError::InvalidPostalCode { .. }));
        assert_eq!(geocoder.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn geocoder_miss_is_not_found() {
        let resolver = resolver(
            MockGeocoder::returning(Err(GeocodeError::not_found("99999999"))),
            MockDistanceProvider::default(),
            ScriptedCarrier::default(),
            vec![point_at("PDV001", -8.01)],
        );

        let error = resolver.resolve("99999-999").await.unwrap_err();
        assert!(matches!(error, ResolutionError::AddressNotFound { .. }));
    }

    #[tokio::test]
    async fn geocoder_outage_is_upstream_failure() {
        let resolver = resolver(
            MockGeocoder::returning(Err(GeocodeError::Provider(ProviderError::timeout("t")))),
            MockDistanceProvider::default(),
            ScriptedCarrier::default(),
            vec![point_at("PDV001", -8.01)],
        );

        let error = resolver.resolve("50710-000").await.unwrap_err();
        assert!(matches!(error, ResolutionError::Upstream { .. }));
    }

    #[tokio::test]
    async fn distance_failure_drops_only_that_candidate() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default()
                .with_error(-8.01, RoutingError::no_route("unreachable"))
                .with_km(-8.02, 10.0),
            ScriptedCarrier::default().with(
                CarrierService::Sedex,
                Ok(CarrierQuote::new(Decimal::new(900, 2), 2)),
            ),
            vec![point_at("PDV001", -8.01), point_at("PDV002", -8.02)],
        );

        let results = resolver.resolve("50710-000").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "PDV PDV002");
    }

    #[tokio::test]
    async fn negative_distance_fails_the_candidate() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default()
                .with_error(-8.01, RoutingError::invalid_distance(-5.0)),
            ScriptedCarrier::default(),
            vec![point_at("PDV001", -8.01)],
        );

        let results = resolver.resolve("50710-000").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn results_sort_ascending_with_stable_ties() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default()
                .with_km(-8.01, 30.0)
                .with_km(-8.02, 10.0)
                .with_km(-8.03, 30.0),
            ScriptedCarrier::default().with(
                CarrierService::Sedex,
                Ok(CarrierQuote::new(Decimal::new(900, 2), 2)),
            ),
            vec![
                point_at("PDV001", -8.01),
                point_at("PDV002", -8.02),
                point_at("PDV003", -8.03),
            ],
        );

        let results = resolver.resolve("50710-000").await.unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        // Nearest first; the two 30.0 km ties keep catalog order.
        assert_eq!(names, vec!["PDV PDV002", "PDV PDV001", "PDV PDV003"]);
        for pair in results.windows(2) {
            assert!(pair.first().unwrap().distance_km <= pair.get(1).unwrap().distance_km);
        }
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default()
                .with_km(-8.01, 30.0)
                .with_km(-8.02, 10.0),
            ScriptedCarrier::default().with(
                CarrierService::Sedex,
                Ok(CarrierQuote::new(Decimal::new(900, 2), 2)),
            ),
            vec![point_at("PDV001", -8.01), point_at("PDV002", -8.02)],
        );

        let first = resolver.resolve("50710-000").await.unwrap();
        let second = resolver.resolve("50710-000").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_catalog_is_a_valid_empty_result() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default(),
            ScriptedCarrier::default(),
            vec![],
        );

        let results = resolver.resolve("50710-000").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn first_result_is_local_when_a_point_is_within_radius() {
        let resolver = resolver(
            MockGeocoder::recife(),
            MockDistanceProvider::default()
                .with_km(-8.01, 45.0)
                .with_km(-8.02, 120.0),
            ScriptedCarrier::sedex_and_pac(),
            vec![
                point_at("PDV001", -8.01),
                point_at("PDV002", -8.02),
                store_for("LOJA001", "PDV002"),
            ],
        );

        let results = resolver.resolve("50710-000").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.first().unwrap().tier, ProximityTier::Local);
        assert_eq!(results.get(1).unwrap().tier, ProximityTier::Carrier);
    }
}
