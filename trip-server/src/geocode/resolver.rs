//! Location resolution with memoization.

use tracing::{debug, warn};

use crate::domain::{LatLon, Location};

use super::cache::GeoCache;
use super::error::GeocodeError;

/// Trait for text geocoding providers.
///
/// `Ok(None)` means the provider answered but found no match. This
/// abstraction lets the resolver and the distance engine be tested with
/// in-memory providers.
pub trait Geocoder {
    /// Resolve a free-text query to a coordinate.
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<LatLon>, GeocodeError>> + Send;
}

/// Resolves free-text locations, memoizing lookups for one operation.
///
/// Construct one resolver per logical operation (request or batch); its
/// cache is private to that operation. Resolution is total: any provider
/// failure is logged and reported as `None`, and negative outcomes are
/// cached so the same failing input is not retried within the operation.
pub struct LocationResolver<'a, G: Geocoder> {
    geocoder: &'a G,
    cache: GeoCache,
}

impl<'a, G: Geocoder> LocationResolver<'a, G> {
    /// Create a resolver with a fresh cache.
    pub fn new(geocoder: &'a G) -> Self {
        Self {
            geocoder,
            cache: GeoCache::new(),
        }
    }

    /// Resolve a location by name.
    ///
    /// Returns `None` when the provider has no match or the call failed;
    /// the distinction is logged, not surfaced.
    pub async fn resolve(&mut self, name: &str) -> Option<Location> {
        if let Some(memoized) = self.cache.get(name) {
            return memoized.clone();
        }

        let resolved = match self.geocoder.geocode(name).await {
            Ok(Some(coord)) => Some(Location::new(name, coord)),
            Ok(None) => {
                debug!(query = name, "geocoder found no match");
                None
            }
            Err(e) => {
                warn!(query = name, error = %e, "geocoding failed");
                None
            }
        };

        self.cache.insert(name, resolved.clone());
        resolved
    }

    /// Number of memoized queries so far.
    pub fn cached_lookups(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Geocoder backed by a fixed map, counting provider calls.
    struct FixedGeocoder {
        coords: HashMap<String, LatLon>,
        calls: Mutex<usize>,
        fail: bool,
    }

    impl FixedGeocoder {
        fn new(coords: &[(&str, f64, f64)]) -> Self {
            Self {
                coords: coords
                    .iter()
                    .map(|(n, lat, lon)| (n.to_string(), LatLon::new(*lat, *lon)))
                    .collect(),
                calls: Mutex::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                coords: HashMap::new(),
                calls: Mutex::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<LatLon>, GeocodeError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                return Err(GeocodeError::Api {
                    status: 503,
                    message: "down".into(),
                });
            }
            Ok(self.coords.get(query).copied())
        }
    }

    #[tokio::test]
    async fn resolves_known_location() {
        let geocoder = FixedGeocoder::new(&[("Paris", 48.8566, 2.3522)]);
        let mut resolver = LocationResolver::new(&geocoder);

        let loc = resolver.resolve("Paris").await.unwrap();
        assert_eq!(loc.name, "Paris");
        assert_eq!(loc.coord, LatLon::new(48.8566, 2.3522));
    }

    #[tokio::test]
    async fn memoizes_positive_lookups() {
        let geocoder = FixedGeocoder::new(&[("Paris", 48.8566, 2.3522)]);
        let mut resolver = LocationResolver::new(&geocoder);

        resolver.resolve("Paris").await;
        resolver.resolve("Paris").await;
        resolver.resolve("Paris").await;

        assert_eq!(geocoder.call_count(), 1);
    }

    #[tokio::test]
    async fn memoizes_no_match() {
        let geocoder = FixedGeocoder::new(&[]);
        let mut resolver = LocationResolver::new(&geocoder);

        assert!(resolver.resolve("Nowhere").await.is_none());
        assert!(resolver.resolve("Nowhere").await.is_none());

        // Second resolve served from the negative cache entry.
        assert_eq!(geocoder.call_count(), 1);
    }

    #[tokio::test]
    async fn provider_failure_is_unresolved_and_cached() {
        let geocoder = FixedGeocoder::failing();
        let mut resolver = LocationResolver::new(&geocoder);

        assert!(resolver.resolve("Paris").await.is_none());
        assert!(resolver.resolve("Paris").await.is_none());

        assert_eq!(geocoder.call_count(), 1);
        assert_eq!(resolver.cached_lookups(), 1);
    }

    #[tokio::test]
    async fn distinct_queries_are_cached_separately() {
        let geocoder = FixedGeocoder::new(&[("Paris", 48.8566, 2.3522)]);
        let mut resolver = LocationResolver::new(&geocoder);

        assert!(resolver.resolve("Paris").await.is_some());
        assert!(resolver.resolve("Nowhere").await.is_none());

        assert_eq!(geocoder.call_count(), 2);
        assert_eq!(resolver.cached_lookups(), 2);
    }
}
