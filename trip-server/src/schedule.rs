//! Route schedule validation.
//!
//! Routes of one road trip share a calendar: their occupied intervals
//! `[datetime, datetime + duration)` must not overlap. The check is a
//! pure function over `(candidate, siblings)`, called explicitly by the
//! store as part of the same write section as the mutation — it is not
//! hidden behind a persistence hook.
//!
//! Intervals are half-open, so back-to-back routes (one ending exactly
//! where the next starts) are allowed. Routes without a stored duration
//! occupy [`DEFAULT_DURATION_HOURS`][crate::domain::DEFAULT_DURATION_HOURS]
//! hours.

use crate::domain::{Route, RouteId};

/// A candidate route overlaps a sibling in the same road trip.
///
/// This is a field-level validation error: it attaches to the
/// candidate's `datetime` and is fully recoverable by picking another
/// time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("overlaps with another route in this road trip")]
pub struct ScheduleConflict {
    /// The sibling the candidate collides with.
    pub conflicting_route: RouteId,
}

impl ScheduleConflict {
    /// The route field this error attaches to.
    pub fn field(&self) -> &'static str {
        "datetime"
    }
}

/// True if the two routes' intervals share any instant other than a
/// common boundary.
pub fn conflicts(a: &Route, b: &Route) -> bool {
    a.datetime < b.end_datetime() && b.datetime < a.end_datetime()
}

/// Check a candidate against the routes it would share a trip with.
///
/// `siblings` is the candidate's road trip's current route set; the
/// candidate itself is skipped by id, so the same call serves both
/// create (id not present) and update (id present with the old interval).
pub fn validate_schedule(candidate: &Route, siblings: &[Route]) -> Result<(), ScheduleConflict> {
    for sibling in siblings {
        if sibling.id == candidate.id {
            continue;
        }
        if conflicts(candidate, sibling) {
            return Err(ScheduleConflict {
                conflicting_route: sibling.id,
            });
        }
    }
    Ok(())
}
