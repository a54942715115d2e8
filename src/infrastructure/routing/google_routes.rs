//! # Google Routes Client
//!
//! Adapter for the Google Routes `computeRoutes` API.
//!
//! One POST per lookup, authenticated with `X-Goog-Api-Key` and scoped by
//! `X-Goog-FieldMask` to distance and duration only.

use crate::domain::value_objects::Coordinate;
use crate::infrastructure::http::{HttpClient, ProviderError, ProviderResult};
use crate::infrastructure::routing::{
    DistanceProvider, RouteDistance, RoutingError, RoutingResult,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Fields requested from the API; everything else is billed waste.
const FIELD_MASK: &str = "routes.duration,routes.distanceMeters";

/// Distance provider backed by the Google Routes API.
#[derive(Debug, Clone)]
pub struct GoogleRoutesClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl GoogleRoutesClient {
    /// Creates a new adapter.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
    ) -> ProviderResult<Self> {
        Ok(Self {
            http: HttpClient::new(timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn compute_url(&self) -> String {
        format!("{}/directions/v2:computeRoutes", self.base_url)
    }

    fn headers(&self) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Goog-Api-Key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| ProviderError::authentication("API key is not a valid header"))?,
        );
        headers.insert("X-Goog-FieldMask", HeaderValue::from_static(FIELD_MASK));
        Ok(headers)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: WaypointLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WaypointLocation {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl From<&Coordinate> for Waypoint {
    fn from(coordinate: &Coordinate) -> Self {
        Self {
            location: WaypointLocation {
                lat_lng: LatLng {
                    latitude: coordinate.latitude(),
                    longitude: coordinate.longitude(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Route {
    distance_meters: Option<f64>,
    /// Duration as rendered by the API, e.g. `"942s"`.
    duration: Option<String>,
}

/// Parses the API's `"<seconds>s"` duration rendering.
fn parse_duration(raw: &str) -> Option<Duration> {
    raw.strip_suffix('s')
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

#[async_trait]
impl DistanceProvider for GoogleRoutesClient {
    async fn road_distance(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> RoutingResult<RouteDistance> {
        let request = ComputeRoutesRequest {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: "DRIVE",
        };

        let response: ComputeRoutesResponse = self
            .http
            .post_json_with_headers(&self.compute_url(), &request, self.headers()?)
            .await?;

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::no_route(format!("{origin} -> {destination}")))?;

        let meters = route
            .distance_meters
            .ok_or_else(|| RoutingError::no_route("route missing distanceMeters"))?;
        let duration = route.duration.as_deref().and_then(parse_duration);

        let distance = RouteDistance::new(meters / 1000.0, duration)?;
        debug!(%origin, %destination, distance = %distance, "road distance computed");

        Ok(distance)
    }
}
