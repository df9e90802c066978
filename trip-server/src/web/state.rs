//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::DistanceEngine;
use crate::geocode::GeocodeClient;
use crate::routing::{OrsClient, OsrmClient};
use crate::store::TripStore;

/// The concrete engine wired to the real HTTP providers.
pub type Engine = DistanceEngine<GeocodeClient, OsrmClient, OrsClient>;

/// Shared application state.
///
/// Contains the distance engine and the trip store needed to handle
/// requests.
#[derive(Clone)]
pub struct AppState {
    /// Distance/geometry engine over the live providers
    pub engine: Arc<Engine>,

    /// Trip, route and waypoint storage
    pub store: Arc<TripStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: Engine, store: TripStore) -> Self {
        Self {
            engine: Arc::new(engine),
            store: Arc::new(store),
        }
    }
}
