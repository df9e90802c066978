//! The distance engine: request in, distance/duration/geometry out.
//!
//! Orchestrates the location resolver and the routing client for both
//! simple and waypoint-constrained requests. The engine is total over
//! provider misbehaviour: its only "failure" mode is the honest answer
//! "unknown".

mod distance;

pub use distance::{DistanceEngine, RouteRequest, RouteResolution, RouteSummary};
