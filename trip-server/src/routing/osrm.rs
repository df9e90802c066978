//! OSRM-style driving provider.
//!
//! Speaks the OSRM HTTP API: coordinates go in the path as
//! `lon,lat;lon,lat;...`, the full geometry comes back as GeoJSON.
//! Both standard-tier providers (primary and alternate) are instances of
//! this client pointed at different base URLs.

use serde::Deserialize;

use crate::domain::{LatLon, RouteGeometry};

use super::client::DrivingProvider;
use super::error::RoutingError;

/// Default base URL for the primary OSRM instance.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Configuration for an OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the provider
    pub base_url: String,
    /// Display name used in logs when this provider fails
    pub name: &'static str,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config with the default public instance.
    pub fn new(name: &'static str) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            name,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Metres
    distance: f64,
    /// Seconds
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lon, lat]`
    coordinates: Vec<[f64; 2]>,
}

/// OSRM HTTP client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    name: &'static str,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            name: config.name,
        })
    }

    async fn request_route(&self, coords: &[LatLon]) -> Result<RouteGeometry, RoutingError> {
        if coords.len() < 2 {
            return Err(RoutingError::TooFewCoordinates);
        }

        let path = coords
            .iter()
            .map(|c| format!("{},{}", c.lon, c.lat))
            .collect::<Vec<_>>()
            .join(";");

        let url = format!("{}/route/v1/driving/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: OsrmResponse = serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })?;

        let Some(route) = parsed.routes.into_iter().next() else {
            return Err(RoutingError::NoRoute);
        };

        let points = route
            .geometry
            .coordinates
            .iter()
            .map(|[lon, lat]| LatLon::new(*lat, *lon))
            .collect();

        Ok(RouteGeometry::routed(
            points,
            route.distance,
            route.duration,
        ))
    }
}

impl DrivingProvider for OsrmClient {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn route(&self, coords: &[LatLon]) -> Result<RouteGeometry, RoutingError> {
        self.request_route(coords).await
    }
}
