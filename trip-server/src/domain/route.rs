//! Routes and road trips.

use chrono::{DateTime, Duration, Utc};

use super::{RouteId, TripId};

/// Scheduling duration, in hours, assumed for routes with no explicit
/// duration.
///
/// Both the overlap check and the GPX time interpolation fall back to
/// this value. Whether it is a deliberate policy or a stand-in for a
/// future estimate-from-distance feature is undecided; keep the value
/// as-is.
pub const DEFAULT_DURATION_HOURS: f64 = 2.0;

/// A driving route inside a road trip.
///
/// `start` and `end` are free-text locations; coordinates are resolved on
/// demand by the geocoding layer. `duration_hours` and `distance_km` are
/// `None` until (and unless) the distance engine could compute them.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub trip_id: TripId,

    /// Free-text start location.
    pub start: String,

    /// Free-text end location.
    pub end: String,

    /// Departure time.
    pub datetime: DateTime<Utc>,

    /// Driving duration in hours, if known.
    pub duration_hours: Option<f64>,

    /// Driving distance in kilometres, if known.
    pub distance_km: Option<f64>,

    /// Route must not use major highways.
    pub avoid_motorways: bool,
}

impl Route {
    /// Duration used for scheduling and export, falling back to
    /// [`DEFAULT_DURATION_HOURS`] when none is stored.
    pub fn effective_duration_hours(&self) -> f64 {
        self.duration_hours.unwrap_or(DEFAULT_DURATION_HOURS)
    }

    /// End of the occupied time interval: `datetime + effective duration`.
    ///
    /// The interval is half-open, so another route may start exactly here.
    pub fn end_datetime(&self) -> DateTime<Utc> {
        self.datetime + duration_from_hours(self.effective_duration_hours())
    }
}

/// Convert fractional hours to a chrono duration at millisecond
/// resolution.
pub fn duration_from_hours(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// A road trip: one shared calendar of routes.
///
/// The routes themselves are held by the store; the no-overlap invariant
/// is scoped to the routes sharing one `TripId`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadTrip {
    pub id: TripId,
    pub name: String,
}
