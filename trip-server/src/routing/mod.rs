//! Driving-route providers and the selection/fallback policy over them.
//!
//! Two provider families exist:
//!
//! - the **standard** tier: a primary and an alternate OSRM-style
//!   provider, interchangeable for plain driving routes;
//! - the **avoiding** tier: a single provider capable of honouring the
//!   "avoid major highways" constraint.
//!
//! [`RoutingClient`] picks a tier once per request from the request's
//! avoidance flag and applies the fallback policy inside that tier only.
//! A highway-avoiding request is never served by a standard provider: an
//! unavailable avoiding tier is reported as "no route" rather than as a
//! route that might cross a highway.

mod client;
mod error;
mod ors;
mod osrm;

pub use client::{DrivingProvider, RouteStrategy, RoutingClient};
pub use error::RoutingError;
pub use ors::{OrsClient, OrsConfig};
pub use osrm::{OsrmClient, OsrmConfig};
