//! Provider selection and fallback policy.

use tracing::warn;

use crate::domain::{LatLon, RouteGeometry};

use super::error::RoutingError;

/// Trait for driving-route providers.
///
/// Implementations take the full coordinate sequence (start, waypoints in
/// travel order, end) and return a complete geometry or an error. This
/// abstraction lets the fallback policy be tested with scripted
/// providers.
pub trait DrivingProvider {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Compute a driving route through the given coordinates, in order.
    fn route(
        &self,
        coords: &[LatLon],
    ) -> impl Future<Output = Result<RouteGeometry, RoutingError>> + Send;
}

/// Which provider tier serves a request.
///
/// Selected once, at the start of routing; the tiers never mix. The
/// avoiding tier has no fallback into the standard tier because standard
/// providers cannot honour the avoidance constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStrategy {
    /// Primary standard provider, then the alternate.
    Standard,

    /// The highway-avoiding provider only.
    AvoidMotorways,
}

impl RouteStrategy {
    /// Pick the strategy for a request's avoidance flag.
    pub fn for_request(avoid_motorways: bool) -> Self {
        if avoid_motorways {
            RouteStrategy::AvoidMotorways
        } else {
            RouteStrategy::Standard
        }
    }
}

/// Routing facade over the provider tiers.
///
/// Returns `None` when the selected tier is exhausted; what "exhausted"
/// means afterwards is the caller's decision (the distance engine
/// synthesizes a great-circle fallback for the standard tier and reports
/// "unknown" for the avoiding tier).
#[derive(Debug, Clone)]
pub struct RoutingClient<S, A> {
    primary: S,
    alternate: S,
    avoiding: A,
}

impl<S: DrivingProvider, A: DrivingProvider> RoutingClient<S, A> {
    /// Create a client from the two standard-tier providers and the
    /// avoiding provider.
    pub fn new(primary: S, alternate: S, avoiding: A) -> Self {
        Self {
            primary,
            alternate,
            avoiding,
        }
    }

    /// Route from start to end with no intermediate stops.
    pub async fn route(
        &self,
        start: LatLon,
        end: LatLon,
        strategy: RouteStrategy,
    ) -> Option<RouteGeometry> {
        self.route_through(&[start, end], strategy).await
    }

    /// Route through the full coordinate sequence (start, waypoints in
    /// position order, end).
    pub async fn route_through(
        &self,
        coords: &[LatLon],
        strategy: RouteStrategy,
    ) -> Option<RouteGeometry> {
        match strategy {
            RouteStrategy::AvoidMotorways => self.try_provider(&self.avoiding, coords).await,
            RouteStrategy::Standard => {
                if let Some(geometry) = self.try_provider(&self.primary, coords).await {
                    return Some(geometry);
                }
                self.try_provider(&self.alternate, coords).await
            }
        }
    }

    async fn try_provider<P: DrivingProvider>(
        &self,
        provider: &P,
        coords: &[LatLon],
    ) -> Option<RouteGeometry> {
        match provider.route(coords).await {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "routing provider failed");
                None
            }
        }
    }
}
