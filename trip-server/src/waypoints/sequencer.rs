//! Position bookkeeping for one route's waypoints.
//!
//! Every function operates on the full waypoint list of a single route
//! and either preserves the `{1..N}` position invariant or refuses the
//! operation without mutating anything.

use crate::domain::{LatLon, RouteId, Waypoint, WaypointId};

use super::payload::WaypointPayload;

/// Errors from waypoint mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaypointError {
    /// Explicit insert position already used by this route
    #[error("position {0} is already taken for this route")]
    PositionTaken(u32),

    /// Explicit insert position would leave a gap in the ordering
    #[error("position {0} would leave a gap in the waypoint ordering")]
    PositionOutOfRange(u32),

    /// Bulk-replace payload did not parse as a waypoint array
    #[error("invalid waypoint format")]
    InvalidFormat,

    /// No waypoint with the given id on this route
    #[error("waypoint not found")]
    NotFound,
}

/// A waypoint to be created, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWaypoint {
    pub coord: LatLon,
    pub name: String,
}

/// The position an automatic insert would take: one past the current
/// maximum, or 1 for an empty route.
pub fn next_position(existing: &[Waypoint]) -> u32 {
    existing.iter().map(|w| w.position).max().unwrap_or(0) + 1
}

/// Insert a waypoint, at `requested_position` if given, else appended.
///
/// An explicit position is accepted only if it keeps the ordering
/// contiguous: it must be unused (else [`WaypointError::PositionTaken`])
/// and within `1..=N+1` (else [`WaypointError::PositionOutOfRange`]).
/// In practice the only unused in-range position is `N+1`.
pub fn insert(
    list: &mut Vec<Waypoint>,
    id: WaypointId,
    route_id: RouteId,
    new: NewWaypoint,
    requested_position: Option<u32>,
) -> Result<Waypoint, WaypointError> {
    let position = match requested_position {
        None => next_position(list),
        Some(p) => {
            if list.iter().any(|w| w.position == p) {
                return Err(WaypointError::PositionTaken(p));
            }
            if p == 0 || p > list.len() as u32 + 1 {
                return Err(WaypointError::PositionOutOfRange(p));
            }
            p
        }
    };

    let waypoint = Waypoint {
        id,
        route_id,
        coord: new.coord,
        position,
        name: new.name,
    };
    list.push(waypoint.clone());

    debug_assert!(is_contiguous(list));
    Ok(waypoint)
}

/// Remove a waypoint by id, closing the gap it leaves.
///
/// Every remaining waypoint with a higher position is decremented by
/// exactly one; earlier waypoints are untouched.
pub fn remove(list: &mut Vec<Waypoint>, id: WaypointId) -> Result<Waypoint, WaypointError> {
    let index = list
        .iter()
        .position(|w| w.id == id)
        .ok_or(WaypointError::NotFound)?;

    let removed = list.remove(index);

    for waypoint in list.iter_mut() {
        if waypoint.position > removed.position {
            waypoint.position -= 1;
        }
    }

    debug_assert!(is_contiguous(list));
    Ok(removed)
}

/// Replace the whole list from a boundary payload.
///
/// The payload is resolved *before* anything is destroyed, so a
/// malformed payload leaves the current waypoints untouched. Valid input
/// (including the empty list) replaces everything, with positions
/// assigned from the given order.
pub fn replace_all(
    list: &mut Vec<Waypoint>,
    route_id: RouteId,
    payload: WaypointPayload,
    mut next_id: impl FnMut() -> WaypointId,
) -> Result<(), WaypointError> {
    let entries = payload.into_entries()?;

    list.clear();
    for (index, entry) in entries.into_iter().enumerate() {
        list.push(Waypoint {
            id: next_id(),
            route_id,
            coord: LatLon::new(entry.lat, entry.lon),
            position: index as u32 + 1,
            name: entry.name,
        });
    }

    debug_assert!(is_contiguous(list));
    Ok(())
}

/// True if positions are exactly the set `{1..N}`.
pub fn is_contiguous(list: &[Waypoint]) -> bool {
    let mut positions: Vec<u32> = list.iter().map(|w| w.position).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(i, &p)| p == i as u32 + 1)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::waypoints::WaypointInput;
    use proptest::prelude::*;

    /// A mutation against a route's waypoint list.
    #[derive(Debug, Clone)]
    enum Op {
        InsertAuto,
        InsertAt(u32),
        /// Remove the waypoint at this index (mod current length).
        RemoveNth(usize),
        /// Replace with this many fresh entries.
        Replace(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::InsertAuto),
            (0u32..12).prop_map(Op::InsertAt),
            (0usize..16).prop_map(Op::RemoveNth),
            (0usize..6).prop_map(Op::Replace),
        ]
    }

    fn entry(i: usize) -> WaypointInput {
        WaypointInput {
            lat: i as f64,
            lon: -(i as f64),
            name: format!("wp{i}"),
        }
    }

    proptest! {
        /// Positions are exactly {1..N} after any operation sequence,
        /// whether each operation succeeded or was rejected.
        #[test]
        fn contiguity_holds_under_any_sequence(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let route = RouteId(1);
            let mut list: Vec<Waypoint> = Vec::new();
            let mut next = 0u64;
            let mut fresh = || {
                next += 1;
                WaypointId(next)
            };

            for op in ops {
                match op {
                    Op::InsertAuto => {
                        let coord = LatLon::new(0.0, 0.0);
                        let _ = insert(&mut list, fresh(), route, NewWaypoint { coord, name: String::new() }, None);
                    }
                    Op::InsertAt(p) => {
                        let coord = LatLon::new(0.0, 0.0);
                        let _ = insert(&mut list, fresh(), route, NewWaypoint { coord, name: String::new() }, Some(p));
                    }
                    Op::RemoveNth(n) => {
                        if !list.is_empty() {
                            let id = list[n % list.len()].id;
                            let _ = remove(&mut list, id);
                        }
                    }
                    Op::Replace(count) => {
                        let payload = WaypointPayload::Entries((0..count).map(entry).collect());
                        let _ = replace_all(&mut list, route, payload, &mut fresh);
                    }
                }

                prop_assert!(is_contiguous(&list), "positions not contiguous: {:?}",
                    list.iter().map(|w| w.position).collect::<Vec<_>>());
            }
        }
    }
}
