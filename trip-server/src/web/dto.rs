//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Route, RouteId, TripId, Waypoint, WaypointId};
use crate::waypoints::WaypointInput;

/// Request to compute distance/duration for an ad-hoc route.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    /// Free-text start location
    pub start: String,

    /// Free-text end location
    pub end: String,

    /// Intermediate stops in travel order
    #[serde(default)]
    pub waypoints: Vec<WaypointInput>,

    /// Route must avoid major highways
    #[serde(default)]
    pub avoid_motorways: bool,
}

/// Computed distance/duration; both fields null when unknown.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: Option<f64>,
    pub duration_hours: Option<f64>,
}

/// Request to create a road trip.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub name: String,
}

/// A road trip.
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: TripId,
    pub name: String,
}

/// Request to create a route in a trip.
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    /// Free-text start location
    pub start: String,

    /// Free-text end location
    pub end: String,

    /// Departure time
    pub datetime: DateTime<Utc>,

    /// Driving duration in hours; computed from the route when omitted
    pub duration_hours: Option<f64>,

    /// Route must avoid major highways
    #[serde(default)]
    pub avoid_motorways: bool,
}

/// Request to move a route to a new time slot.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    /// New departure time
    pub datetime: DateTime<Utc>,

    /// New duration in hours, if any
    pub duration_hours: Option<f64>,
}

/// A route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: RouteId,
    pub trip_id: TripId,
    pub start: String,
    pub end: String,
    pub datetime: DateTime<Utc>,
    pub duration_hours: Option<f64>,
    pub distance_km: Option<f64>,
    pub avoid_motorways: bool,
}

impl RouteResponse {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id,
            trip_id: route.trip_id,
            start: route.start.clone(),
            end: route.end.clone(),
            datetime: route.datetime,
            duration_hours: route.duration_hours,
            distance_km: route.distance_km,
            avoid_motorways: route.avoid_motorways,
        }
    }
}

/// Routes of a trip.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResponse>,
}

/// Request to add one waypoint to a route.
#[derive(Debug, Deserialize)]
pub struct AddWaypointRequest {
    pub lat: f64,
    pub lon: f64,

    #[serde(default)]
    pub name: String,

    /// Explicit position; appended when omitted
    pub position: Option<u32>,
}

/// A waypoint.
#[derive(Debug, Serialize)]
pub struct WaypointResponse {
    pub id: WaypointId,
    pub route_id: RouteId,
    pub lat: f64,
    pub lon: f64,
    pub position: u32,
    pub name: String,
}

impl WaypointResponse {
    pub fn from_waypoint(waypoint: &Waypoint) -> Self {
        Self {
            id: waypoint.id,
            route_id: waypoint.route_id,
            lat: waypoint.coord.lat,
            lon: waypoint.coord.lon,
            position: waypoint.position,
            name: waypoint.name.clone(),
        }
    }
}

/// Waypoints of a route, in position order.
#[derive(Debug, Serialize)]
pub struct WaypointListResponse {
    pub waypoints: Vec<WaypointResponse>,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Field the error attaches to, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}
