//! Distance/duration computation over resolver + routing client.

use crate::domain::{LatLon, Location, RouteGeometry, Waypoint};
use crate::geocode::{Geocoder, LocationResolver};
use crate::routing::{DrivingProvider, RouteStrategy, RoutingClient};

/// Input to a distance computation.
///
/// Immutable value object. `start` and `end` are free text to be
/// geocoded; waypoints already carry coordinates and positions and are
/// threaded between the endpoints in position order.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
    pub waypoints: Vec<Waypoint>,
    pub avoid_motorways: bool,
}

/// The rounded figures stored on a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Kilometres, one decimal.
    pub distance_km: f64,

    /// Hours, two decimals.
    pub duration_hours: f64,
}

/// Outcome of resolving a request down to geometry.
///
/// The GPX exporter consumes this directly: a `Resolved` outcome without
/// geometry still carries the endpoint coordinates needed for the
/// degraded document.
#[derive(Debug, Clone)]
pub enum RouteResolution {
    /// An endpoint did not geocode; nothing further was attempted.
    UnresolvedEndpoint {
        /// The query that failed to resolve.
        query: String,
    },

    /// Both endpoints resolved.
    Resolved {
        start: Location,
        end: Location,

        /// `None` only when the request demanded highway avoidance and
        /// the avoiding tier was unavailable; the standard tier always
        /// degrades to a great-circle fallback instead.
        geometry: Option<RouteGeometry>,
    },
}

/// Computes distance, duration and geometry for route requests.
pub struct DistanceEngine<G, S, A> {
    geocoder: G,
    routing: RoutingClient<S, A>,
}

impl<G, S, A> DistanceEngine<G, S, A>
where
    G: Geocoder,
    S: DrivingProvider,
    A: DrivingProvider,
{
    /// Create an engine over a geocoder and a routing client.
    pub fn new(geocoder: G, routing: RoutingClient<S, A>) -> Self {
        Self { geocoder, routing }
    }

    /// Compute the rounded distance/duration for a request.
    ///
    /// `None` means "unknown": an endpoint did not geocode, or the
    /// request demanded highway avoidance and no avoiding provider was
    /// available. It is never an error.
    pub async fn compute(&self, request: &RouteRequest) -> Option<RouteSummary> {
        match self.resolve(request).await {
            RouteResolution::Resolved {
                geometry: Some(geometry),
                ..
            } => Some(RouteSummary {
                distance_km: round_to(geometry.distance_meters / 1000.0, 10.0),
                duration_hours: round_to(geometry.duration_seconds / 3600.0, 100.0),
            }),
            _ => None,
        }
    }

    /// Resolve a request down to endpoints and geometry.
    ///
    /// Endpoints go through a resolver scoped to this call, so repeated
    /// location strings (and repeated failures) cost one geocoder call
    /// each. Waypoints are never geocoded.
    pub async fn resolve(&self, request: &RouteRequest) -> RouteResolution {
        let mut resolver = LocationResolver::new(&self.geocoder);

        let Some(start) = resolver.resolve(&request.start).await else {
            return RouteResolution::UnresolvedEndpoint {
                query: request.start.clone(),
            };
        };
        let Some(end) = resolver.resolve(&request.end).await else {
            return RouteResolution::UnresolvedEndpoint {
                query: request.end.clone(),
            };
        };

        let strategy = RouteStrategy::for_request(request.avoid_motorways);
        let coords = coordinate_sequence(&start, &end, &request.waypoints);

        let geometry = match self.routing.route_through(&coords, strategy).await {
            Some(geometry) => Some(geometry),
            // The standard tier degrades to a straight line; the avoiding
            // tier must not fabricate a route that might cross a highway.
            None => match strategy {
                RouteStrategy::Standard => {
                    Some(RouteGeometry::fallback_between(start.coord, end.coord))
                }
                RouteStrategy::AvoidMotorways => None,
            },
        };

        RouteResolution::Resolved {
            start,
            end,
            geometry,
        }
    }
}

/// Build start → waypoints (by position) → end.
fn coordinate_sequence(start: &Location, end: &Location, waypoints: &[Waypoint]) -> Vec<LatLon> {
    let mut ordered: Vec<&Waypoint> = waypoints.iter().collect();
    ordered.sort_by_key(|w| w.position);

    let mut coords = Vec::with_capacity(waypoints.len() + 2);
    coords.push(start.coord);
    coords.extend(ordered.iter().map(|w| w.coord));
    coords.push(end.coord);
    coords
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeometrySource, RouteId, WaypointId};
    use crate::geocode::GeocodeError;
    use crate::routing::RoutingError;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct MapGeocoder {
        coords: HashMap<String, LatLon>,
    }

    impl MapGeocoder {
        fn new(coords: &[(&str, f64, f64)]) -> Self {
            Self {
                coords: coords
                    .iter()
                    .map(|(n, lat, lon)| (n.to_string(), LatLon::new(*lat, *lon)))
                    .collect(),
            }
        }
    }

    impl Geocoder for MapGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<LatLon>, GeocodeError> {
            Ok(self.coords.get(query).copied())
        }
    }

    /// Provider that echoes the coordinates with fixed figures, recording
    /// what it was asked for through a shared handle.
    struct EchoProvider {
        name: &'static str,
        distance_meters: f64,
        duration_seconds: f64,
        seen: Arc<Mutex<Vec<Vec<LatLon>>>>,
    }

    impl EchoProvider {
        fn new(name: &'static str, distance_meters: f64, duration_seconds: f64) -> Self {
            Self {
                name,
                distance_meters,
                duration_seconds,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn requests(&self) -> Arc<Mutex<Vec<Vec<LatLon>>>> {
            self.seen.clone()
        }
    }

    impl DrivingProvider for EchoProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn route(&self, coords: &[LatLon]) -> Result<RouteGeometry, RoutingError> {
            self.seen.lock().unwrap().push(coords.to_vec());
            Ok(RouteGeometry::routed(
                coords.to_vec(),
                self.distance_meters,
                self.duration_seconds,
            ))
        }
    }

    struct DownProvider(&'static str);

    impl DrivingProvider for DownProvider {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn route(&self, _coords: &[LatLon]) -> Result<RouteGeometry, RoutingError> {
            Err(RoutingError::NoRoute)
        }
    }

    fn equator_geocoder() -> MapGeocoder {
        MapGeocoder::new(&[("Origin", 0.0, 0.0), ("Target", 0.0, 1.0)])
    }

    fn request(avoid: bool) -> RouteRequest {
        RouteRequest {
            start: "Origin".into(),
            end: "Target".into(),
            waypoints: Vec::new(),
            avoid_motorways: avoid,
        }
    }

    fn waypoint(position: u32, lat: f64, lon: f64) -> Waypoint {
        Waypoint {
            id: WaypointId(u64::from(position)),
            route_id: RouteId(1),
            coord: LatLon::new(lat, lon),
            position,
            name: format!("wp-{position}"),
        }
    }

    #[tokio::test]
    async fn routed_figures_are_rounded() {
        let engine = DistanceEngine::new(
            equator_geocoder(),
            RoutingClient::new(
                EchoProvider::new("primary", 123_456.0, 5_000.0),
                EchoProvider::new("alternate", 0.0, 0.0),
                DownProvider("avoiding"),
            ),
        );

        let summary = engine.compute(&request(false)).await.unwrap();

        assert_eq!(summary.distance_km, 123.5);
        assert_eq!(summary.duration_hours, 1.39);
    }

    #[tokio::test]
    async fn unresolved_endpoint_is_unknown() {
        let engine = DistanceEngine::new(
            MapGeocoder::new(&[("Origin", 0.0, 0.0)]),
            RoutingClient::new(
                EchoProvider::new("primary", 1000.0, 60.0),
                EchoProvider::new("alternate", 1000.0, 60.0),
                EchoProvider::new("avoiding", 1000.0, 60.0),
            ),
        );

        assert!(engine.compute(&request(false)).await.is_none());

        match engine.resolve(&request(false)).await {
            RouteResolution::UnresolvedEndpoint { query } => assert_eq!(query, "Target"),
            other => panic!("expected unresolved endpoint, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn standard_requests_always_produce_a_distance() {
        // Both standard providers down: the great-circle fallback kicks
        // in, so a request with two resolvable endpoints is never
        // "unknown".
        let engine = DistanceEngine::new(
            equator_geocoder(),
            RoutingClient::new(
                DownProvider("primary"),
                DownProvider("alternate"),
                DownProvider("avoiding"),
            ),
        );

        let summary = engine.compute(&request(false)).await.unwrap();
        assert!((summary.distance_km - 111.2).abs() < 0.1);

        match engine.resolve(&request(false)).await {
            RouteResolution::Resolved {
                geometry: Some(geometry),
                ..
            } => {
                assert_eq!(geometry.source, GeometrySource::Fallback);
                assert_eq!(geometry.points.len(), 2);
            }
            other => panic!("expected fallback geometry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn avoidance_is_strict() {
        // Avoiding provider down: no fallback to the standard tier, no
        // fabricated straight line. The answer is "unknown".
        let engine = DistanceEngine::new(
            equator_geocoder(),
            RoutingClient::new(
                EchoProvider::new("primary", 1000.0, 60.0),
                EchoProvider::new("alternate", 1000.0, 60.0),
                DownProvider("avoiding"),
            ),
        );

        assert!(engine.compute(&request(true)).await.is_none());

        match engine.resolve(&request(true)).await {
            RouteResolution::Resolved { geometry, .. } => assert!(geometry.is_none()),
            other => panic!("expected resolved endpoints, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn avoiding_tier_serves_avoidance_requests() {
        let engine = DistanceEngine::new(
            equator_geocoder(),
            RoutingClient::new(
                DownProvider("primary"),
                DownProvider("alternate"),
                EchoProvider::new("avoiding", 150_000.0, 7_200.0),
            ),
        );

        let summary = engine.compute(&request(true)).await.unwrap();
        assert_eq!(summary.distance_km, 150.0);
        assert_eq!(summary.duration_hours, 2.0);
    }

    #[tokio::test]
    async fn waypoints_are_threaded_in_position_order() {
        let primary = EchoProvider::new("primary", 1000.0, 60.0);
        let requests = primary.requests();

        let engine = DistanceEngine::new(
            equator_geocoder(),
            RoutingClient::new(
                primary,
                EchoProvider::new("alternate", 0.0, 0.0),
                DownProvider("avoiding"),
            ),
        );

        let mut req = request(false);
        // Deliberately out of order.
        req.waypoints = vec![waypoint(2, 0.0, 0.6), waypoint(1, 0.0, 0.3)];

        engine.compute(&req).await.unwrap();

        let seen = requests.lock().unwrap();
        assert_eq!(
            seen.last().unwrap(),
            &vec![
                LatLon::new(0.0, 0.0),
                LatLon::new(0.0, 0.3),
                LatLon::new(0.0, 0.6),
                LatLon::new(0.0, 1.0),
            ]
        );
    }
}
