//! Text geocoding: free-text location → coordinate.
//!
//! The resolver wraps an HTTP geocoding provider behind a per-operation
//! cache. Two things matter to callers:
//!
//! - resolution never fails loudly: transport and parse errors are logged
//!   and reported as "unresolved", exactly like a clean no-match;
//! - failed lookups are cached too, so one workflow never re-queries the
//!   provider for the same bad input.

mod cache;
mod client;
mod error;
mod resolver;

pub use cache::GeoCache;
pub use client::{GeocodeClient, GeocodeConfig};
pub use error::GeocodeError;
pub use resolver::{Geocoder, LocationResolver};
