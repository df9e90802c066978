//! Web layer: the engine's HTTP surface.
//!
//! JSON endpoints for distance computation, route scheduling and
//! waypoint editing, plus the GPX download. The surrounding application's
//! HTML rendering and authentication live elsewhere; this layer only
//! speaks the engine's contract.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Engine};
