//! GPX 1.1 export.
//!
//! Turns a route and its (possibly absent) geometry into a GPX 1.1
//! interchange document. A full geometry yields start/end flag waypoints
//! plus a track with time-interpolated points; a missing geometry
//! degrades to the minimal two-waypoint + route-stub document, the same
//! contract used when routing failed entirely.
//!
//! [`validate`] re-parses an emitted document and reports structural
//! problems; it backs tests and the health check, not end users.

mod export;
mod types;
mod validate;

pub use export::{GPX_NAMESPACE, GPX_VERSION, GpxError, export};
pub use validate::validate;
