//! Waypoints: ordered intermediate stops on a route.

use super::{LatLon, RouteId, WaypointId};

/// An intermediate point a route passes through, distinct from its start
/// and end.
///
/// # Invariant
///
/// For the waypoints of one route, the set of `position` values is always
/// exactly `{1..N}` — one-based, no duplicates, no gaps. The sequencer in
/// [`crate::waypoints`] maintains this under insert, delete and bulk
/// replace; code receiving a route's waypoints may rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: WaypointId,
    pub route_id: RouteId,

    /// Coordinate of the stop. Waypoints always carry coordinates; they
    /// are never geocoded from text.
    pub coord: LatLon,

    /// One-based position in travel order.
    pub position: u32,

    /// Display name.
    pub name: String,
}
