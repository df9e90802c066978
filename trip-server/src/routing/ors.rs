//! Highway-avoiding driving provider.
//!
//! Speaks an openrouteservice-style directions API: coordinates are
//! POSTed as GeoJSON-ordered pairs together with an `avoid_features`
//! option, and the answer is a GeoJSON feature whose properties carry the
//! distance/duration summary. This provider is authoritative for the
//! highway-avoidance guarantee; there is no substitute for it in the
//! standard tier.

use serde::Deserialize;
use serde_json::json;

use crate::domain::{LatLon, RouteGeometry};

use super::client::DrivingProvider;
use super::error::RoutingError;

/// Default base URL for the avoiding provider.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Configuration for the avoiding client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key sent in the Authorization header
    pub api_key: String,
    /// Base URL for the provider
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OrsConfig {
    /// Create a config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
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
struct Feature {
    geometry: FeatureGeometry,
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    /// GeoJSON order: `[lon, lat]`
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    /// Metres
    distance: f64,
    /// Seconds
    duration: f64,
}

/// Highway-avoiding HTTP client.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OrsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    async fn request_route(&self, coords: &[LatLon]) -> Result<RouteGeometry, RoutingError> {
        if coords.len() < 2 {
            return Err(RoutingError::TooFewCoordinates);
        }

        let url = format!("{}/v2/directions/driving-car/geojson", self.base_url);

        let coordinates: Vec<[f64; 2]> = coords.iter().map(|c| [c.lon, c.lat]).collect();
        let body = json!({
            "coordinates": coordinates,
            "options": {"avoid_features": ["highways"]},
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
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

        let feature: Feature = serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })?;

        let Some(summary) = feature.properties.segments.first() else {
            return Err(RoutingError::NoRoute);
        };

        let points = feature
            .geometry
            .coordinates
            .iter()
            .map(|[lon, lat]| LatLon::new(*lat, *lon))
            .collect();

        Ok(RouteGeometry::routed(
            points,
            summary.distance,
            summary.duration,
        ))
    }
}

impl DrivingProvider for OrsClient {
    fn name(&self) -> &'static str {
        "avoiding"
    }

    async fn route(&self, coords: &[LatLon]) -> Result<RouteGeometry, RoutingError> {
        self.request_route(coords).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OrsConfig::new("key-123")
            .with_base_url("http://localhost:8082")
            .with_timeout(5);

        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.base_url, "http://localhost:8082");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = OrsClient::new(OrsConfig::new("key"));
        assert!(client.is_ok());
    }

    #[test]
    fn feature_parsing() {
        let json = r#"{
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[2.35, 48.85], [2.40, 48.90]]},
            "properties": {"segments": [{"distance": 7150.0, "duration": 890.0}]}
        }"#;

        let feature: Feature = serde_json::from_str(json).unwrap();

        assert_eq!(feature.properties.segments[0].distance, 7150.0);
        assert_eq!(feature.geometry.coordinates.len(), 2);
    }

    #[test]
    fn feature_without_segments_is_no_route() {
        let json = r#"{
            "geometry": {"coordinates": []},
            "properties": {"segments": []}
        }"#;

        let feature: Feature = serde_json::from_str(json).unwrap();
        assert!(feature.properties.segments.is_empty());
    }
}
