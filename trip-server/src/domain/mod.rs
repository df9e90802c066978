//! Domain types for the route geometry and scheduling engine.
//!
//! This module contains the core model shared by the geocoding, routing,
//! scheduling and export layers. Types here carry no persistence or wire
//! concerns; the web layer converts to and from DTOs at the boundary.

mod geometry;
mod ids;
mod location;
mod route;
mod waypoint;

pub use geometry::{GeometrySource, RouteGeometry, haversine_km};
pub use ids::{RouteId, TripId, WaypointId};
pub use location::{LatLon, Location};
pub use route::{DEFAULT_DURATION_HOURS, RoadTrip, Route, duration_from_hours};
pub use waypoint::Waypoint;
