//! In-memory trip store.
//!
//! Stands in for the relational store the surrounding application would
//! provide: road trips, their routes, and each route's waypoints, keyed
//! by id. Every mutation takes the write lock for the whole
//! check-then-write section, so the schedule validation and the write it
//! gates are atomic with respect to other writers on this store.
//!
//! Waypoint mutations delegate to [`crate::waypoints`] so the `{1..N}`
//! position invariant holds for every stored route.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{RoadTrip, Route, RouteId, TripId, Waypoint, WaypointId};
use crate::schedule::{ScheduleConflict, validate_schedule};
use crate::waypoints::{self, NewWaypoint, WaypointError, WaypointPayload};

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("road trip not found")]
    TripNotFound,

    #[error("route not found")]
    RouteNotFound,

    /// The candidate's interval overlaps a sibling route
    #[error(transparent)]
    Conflict(#[from] ScheduleConflict),

    /// Waypoint mutation rejected
    #[error(transparent)]
    Waypoint(#[from] WaypointError),
}

/// A route to be created, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub start: String,
    pub end: String,
    pub datetime: DateTime<Utc>,
    pub duration_hours: Option<f64>,
    pub distance_km: Option<f64>,
    pub avoid_motorways: bool,
}

#[derive(Debug, Default)]
struct Inner {
    trips: HashMap<TripId, RoadTrip>,
    routes: HashMap<RouteId, Route>,
    waypoints: HashMap<RouteId, Vec<Waypoint>>,
    next_trip: u64,
    next_route: u64,
    next_waypoint: u64,
}

impl Inner {
    fn next_waypoint_id(&mut self) -> WaypointId {
        self.next_waypoint += 1;
        WaypointId(self.next_waypoint)
    }

    fn siblings(&self, trip_id: TripId) -> Vec<Route> {
        self.routes
            .values()
            .filter(|r| r.trip_id == trip_id)
            .cloned()
            .collect()
    }
}

/// In-memory store for trips, routes and waypoints.
#[derive(Debug, Default)]
pub struct TripStore {
    inner: RwLock<Inner>,
}

impl TripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a road trip.
    pub async fn create_trip(&self, name: impl Into<String>) -> RoadTrip {
        let mut inner = self.inner.write().await;
        inner.next_trip += 1;
        let trip = RoadTrip {
            id: TripId(inner.next_trip),
            name: name.into(),
        };
        inner.trips.insert(trip.id, trip.clone());
        trip
    }

    /// Look up a road trip.
    pub async fn trip(&self, id: TripId) -> Option<RoadTrip> {
        self.inner.read().await.trips.get(&id).cloned()
    }

    /// All routes of a trip, unordered.
    pub async fn routes_for_trip(&self, trip_id: TripId) -> Result<Vec<Route>, StoreError> {
        let inner = self.inner.read().await;
        if !inner.trips.contains_key(&trip_id) {
            return Err(StoreError::TripNotFound);
        }
        Ok(inner.siblings(trip_id))
    }

    /// Look up a route.
    pub async fn route(&self, id: RouteId) -> Option<Route> {
        self.inner.read().await.routes.get(&id).cloned()
    }

    /// Create a route, gated by schedule validation.
    ///
    /// The overlap check runs against the trip's current routes under the
    /// same write guard that inserts the new route.
    pub async fn create_route(
        &self,
        trip_id: TripId,
        new: NewRoute,
    ) -> Result<Route, StoreError> {
        let mut inner = self.inner.write().await;

        if !inner.trips.contains_key(&trip_id) {
            return Err(StoreError::TripNotFound);
        }

        inner.next_route += 1;
        let route = Route {
            id: RouteId(inner.next_route),
            trip_id,
            start: new.start,
            end: new.end,
            datetime: new.datetime,
            duration_hours: new.duration_hours,
            distance_km: new.distance_km,
            avoid_motorways: new.avoid_motorways,
        };

        validate_schedule(&route, &inner.siblings(trip_id))?;

        inner.waypoints.insert(route.id, Vec::new());
        inner.routes.insert(route.id, route.clone());
        Ok(route)
    }

    /// Move a route to a new time slot (and optionally a new duration),
    /// re-validating against its siblings.
    pub async fn reschedule_route(
        &self,
        route_id: RouteId,
        datetime: DateTime<Utc>,
        duration_hours: Option<f64>,
    ) -> Result<Route, StoreError> {
        let mut inner = self.inner.write().await;

        let mut candidate = inner
            .routes
            .get(&route_id)
            .cloned()
            .ok_or(StoreError::RouteNotFound)?;
        candidate.datetime = datetime;
        candidate.duration_hours = duration_hours;

        // Siblings include the stored copy of this route; validation
        // skips it by id.
        validate_schedule(&candidate, &inner.siblings(candidate.trip_id))?;

        inner.routes.insert(route_id, candidate.clone());
        Ok(candidate)
    }

    /// Delete a route and, with it, all of its waypoints.
    pub async fn delete_route(&self, route_id: RouteId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        inner
            .routes
            .remove(&route_id)
            .ok_or(StoreError::RouteNotFound)?;
        inner.waypoints.remove(&route_id);
        Ok(())
    }

    /// A route's waypoints in position order.
    pub async fn waypoints(&self, route_id: RouteId) -> Result<Vec<Waypoint>, StoreError> {
        let inner = self.inner.read().await;

        let mut list = inner
            .waypoints
            .get(&route_id)
            .cloned()
            .ok_or(StoreError::RouteNotFound)?;
        list.sort_by_key(|w| w.position);
        Ok(list)
    }

    /// Insert a waypoint at the requested position, or append.
    pub async fn add_waypoint(
        &self,
        route_id: RouteId,
        new: NewWaypoint,
        position: Option<u32>,
    ) -> Result<Waypoint, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_waypoint_id();
        let list = inner
            .waypoints
            .get_mut(&route_id)
            .ok_or(StoreError::RouteNotFound)?;

        Ok(waypoints::insert(list, id, route_id, new, position)?)
    }

    /// Remove a waypoint, renumbering the remainder of its route.
    pub async fn remove_waypoint(&self, waypoint_id: WaypointId) -> Result<Waypoint, StoreError> {
        let mut inner = self.inner.write().await;

        let route_id = inner
            .waypoints
            .iter()
            .find(|(_, list)| list.iter().any(|w| w.id == waypoint_id))
            .map(|(route_id, _)| *route_id)
            .ok_or(StoreError::Waypoint(WaypointError::NotFound))?;

        let list = inner.waypoints.get_mut(&route_id).unwrap();
        Ok(waypoints::remove(list, waypoint_id)?)
    }

    /// Replace a route's waypoints wholesale from a boundary payload.
    ///
    /// Malformed payloads fail before anything is destroyed; the stored
    /// list is untouched on error.
    pub async fn replace_waypoints(
        &self,
        route_id: RouteId,
        payload: WaypointPayload,
    ) -> Result<Vec<Waypoint>, StoreError> {
        let mut inner = self.inner.write().await;

        if !inner.waypoints.contains_key(&route_id) {
            return Err(StoreError::RouteNotFound);
        }

        // Take the list out so the id counter and the list can be
        // borrowed independently.
        let mut list = inner.waypoints.remove(&route_id).unwrap();
        let result = waypoints::replace_all(&mut list, route_id, payload, || {
            inner.next_waypoint += 1;
            WaypointId(inner.next_waypoint)
        });
        inner.waypoints.insert(route_id, list);

        result?;
        self_waypoints_sorted(&inner, route_id)
    }
}

fn self_waypoints_sorted(inner: &Inner, route_id: RouteId) -> Result<Vec<Waypoint>, StoreError> {
    let mut list = inner
        .waypoints
        .get(&route_id)
        .cloned()
        .ok_or(StoreError::RouteNotFound)?;
    list.sort_by_key(|w| w.position);
    Ok(list)
}
