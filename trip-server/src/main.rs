use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use trip_server::engine::DistanceEngine;
use trip_server::geocode::{GeocodeClient, GeocodeConfig};
use trip_server::routing::{OrsClient, OrsConfig, OsrmClient, OsrmConfig, RoutingClient};
use trip_server::store::TripStore;
use trip_server::web::{AppState, create_router};

/// Default base URL for the alternate standard-tier routing provider.
const DEFAULT_OSRM_FALLBACK_URL: &str = "https://routing.openstreetmap.de/routed-car";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Provider endpoints are overridable for self-hosted instances.
    let mut geocode_config = GeocodeConfig::new();
    if let Ok(url) = std::env::var("GEOCODER_URL") {
        geocode_config = geocode_config.with_base_url(url);
    }

    let mut primary_config = OsrmConfig::new("osrm-primary");
    if let Ok(url) = std::env::var("OSRM_URL") {
        primary_config = primary_config.with_base_url(url);
    }

    let alternate_config = OsrmConfig::new("osrm-alternate").with_base_url(
        std::env::var("OSRM_FALLBACK_URL")
            .unwrap_or_else(|_| DEFAULT_OSRM_FALLBACK_URL.to_string()),
    );

    let ors_api_key = std::env::var("ORS_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: ORS_API_KEY not set. Highway-avoiding routes will be unavailable.");
        String::new()
    });
    let mut ors_config = OrsConfig::new(ors_api_key);
    if let Ok(url) = std::env::var("ORS_URL") {
        ors_config = ors_config.with_base_url(url);
    }

    let geocoder = GeocodeClient::new(geocode_config).expect("Failed to create geocoding client");
    let primary = OsrmClient::new(primary_config).expect("Failed to create primary OSRM client");
    let alternate =
        OsrmClient::new(alternate_config).expect("Failed to create alternate OSRM client");
    let avoiding = OrsClient::new(ors_config).expect("Failed to create avoiding client");

    let engine = DistanceEngine::new(geocoder, RoutingClient::new(primary, alternate, avoiding));
    let state = AppState::new(engine, TripStore::new());

    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Trip planner engine listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health                         - Health check");
    println!("  POST   /api/distance                   - Compute distance/duration");
    println!("  POST   /api/trips                      - Create a road trip");
    println!("  GET    /api/trips/:id/routes           - List a trip's routes");
    println!("  POST   /api/trips/:id/routes           - Create a route");
    println!("  PUT    /api/routes/:id                 - Reschedule a route");
    println!("  DELETE /api/routes/:id                 - Delete a route");
    println!("  GET    /api/routes/:id/waypoints       - List waypoints");
    println!("  POST   /api/routes/:id/waypoints       - Add a waypoint");
    println!("  PUT    /api/routes/:id/waypoints       - Replace all waypoints");
    println!("  DELETE /api/waypoints/:id              - Remove a waypoint");
    println!("  GET    /api/routes/:id/gpx             - Download GPX");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
