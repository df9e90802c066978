//! Geocoding HTTP client.
//!
//! Talks to a Nominatim-style search endpoint. Only the first match is
//! used; coordinates arrive as string-encoded floats and are parsed here.

use serde::Deserialize;

use crate::domain::LatLon;

use super::error::GeocodeError;
use super::resolver::Geocoder;

/// Default base URL for the geocoding provider.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// User agent sent with every request; the public provider rejects
/// anonymous clients.
const USER_AGENT: &str = concat!("trip-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for the provider (defaults to the public endpoint)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
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

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of the provider's search response.
///
/// Coordinates are string-encoded in the wire format.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Geocoding HTTP client.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Search for a location, returning the first match if any.
    async fn search(&self, query: &str) -> Result<Option<LatLon>, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let hits: Vec<SearchHit> = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        let Some(hit) = hits.first() else {
            return Ok(None);
        };

        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::BadCoordinate(hit.lat.clone()))?;
        let lon: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::BadCoordinate(hit.lon.clone()))?;

        Ok(Some(LatLon::new(lat, lon)))
    }
}

impl Geocoder for GeocodeClient {
    async fn geocode(&self, query: &str) -> Result<Option<LatLon>, GeocodeError> {
        self.search(query).await
    }
}
