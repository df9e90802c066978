//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use tracing::warn;

use crate::domain::{LatLon, Route, RouteGeometry, RouteId, TripId, Waypoint, WaypointId};
use crate::engine::{RouteRequest, RouteResolution};
use crate::gpx::{self, GpxError};
use crate::store::{NewRoute, StoreError};
use crate::waypoints::{NewWaypoint, WaypointError, WaypointInput, WaypointPayload};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/distance", post(compute_distance))
        .route("/api/trips", post(create_trip))
        .route(
            "/api/trips/:trip_id/routes",
            get(list_routes).post(create_route),
        )
        .route(
            "/api/routes/:route_id",
            put(reschedule_route).delete(delete_route),
        )
        .route(
            "/api/routes/:route_id/waypoints",
            get(list_waypoints)
                .post(add_waypoint)
                .put(replace_waypoints),
        )
        .route("/api/waypoints/:waypoint_id", delete(remove_waypoint))
        .route("/api/routes/:route_id/gpx", get(export_gpx))
        .with_state(state)
}

/// Health check: liveness plus a GPX exporter smoke test.
///
/// Exports a fixed two-point route and re-validates the document, so a
/// structural regression in the exporter shows up here before anyone
/// downloads a broken file.
async fn health() -> Result<&'static str, AppError> {
    let probe = Route {
        id: RouteId(0),
        trip_id: TripId(0),
        start: "health-start".into(),
        end: "health-end".into(),
        datetime: Utc::now(),
        duration_hours: Some(1.0),
        distance_km: None,
        avoid_motorways: false,
    };
    let geometry = RouteGeometry::routed(
        vec![LatLon::new(0.0, 0.0), LatLon::new(0.0, 1.0)],
        111_195.0,
        5_000.0,
    );

    let xml = gpx::export(
        &probe,
        LatLon::new(0.0, 0.0),
        LatLon::new(0.0, 1.0),
        Some(&geometry),
    )?;

    let failures = gpx::validate(&xml);
    if !failures.is_empty() {
        return Err(AppError::Internal {
            message: format!("GPX self-check failed: {}", failures.join("; ")),
        });
    }

    Ok("ok")
}

/// Compute distance/duration for an ad-hoc request.
async fn compute_distance(
    State(state): State<AppState>,
    Json(req): Json<DistanceRequest>,
) -> Json<DistanceResponse> {
    let request = RouteRequest {
        start: req.start,
        end: req.end,
        waypoints: ad_hoc_waypoints(req.waypoints),
        avoid_motorways: req.avoid_motorways,
    };

    let summary = state.engine.compute(&request).await;

    Json(DistanceResponse {
        distance_km: summary.map(|s| s.distance_km),
        duration_hours: summary.map(|s| s.duration_hours),
    })
}

/// Create a road trip.
async fn create_trip(
    State(state): State<AppState>,
    Json(req): Json<CreateTripRequest>,
) -> Json<TripResponse> {
    let trip = state.store.create_trip(req.name).await;
    Json(TripResponse {
        id: trip.id,
        name: trip.name,
    })
}

/// List the routes of a trip.
async fn list_routes(
    State(state): State<AppState>,
    Path(trip_id): Path<u64>,
) -> Result<Json<RouteListResponse>, AppError> {
    let routes = state.store.routes_for_trip(TripId(trip_id)).await?;

    Ok(Json(RouteListResponse {
        routes: routes.iter().map(RouteResponse::from_route).collect(),
    }))
}

/// Create a route: compute figures, then persist behind the schedule
/// check.
async fn create_route(
    State(state): State<AppState>,
    Path(trip_id): Path<u64>,
    Json(req): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    // A new route has no waypoints yet.
    let request = RouteRequest {
        start: req.start.clone(),
        end: req.end.clone(),
        waypoints: Vec::new(),
        avoid_motorways: req.avoid_motorways,
    };
    let summary = state.engine.compute(&request).await;

    let route = state
        .store
        .create_route(
            TripId(trip_id),
            NewRoute {
                start: req.start,
                end: req.end,
                datetime: req.datetime,
                duration_hours: req.duration_hours.or(summary.map(|s| s.duration_hours)),
                distance_km: summary.map(|s| s.distance_km),
                avoid_motorways: req.avoid_motorways,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RouteResponse::from_route(&route))))
}

/// Move a route to a new time slot.
async fn reschedule_route(
    State(state): State<AppState>,
    Path(route_id): Path<u64>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let route = state
        .store
        .reschedule_route(RouteId(route_id), req.datetime, req.duration_hours)
        .await?;

    Ok(Json(RouteResponse::from_route(&route)))
}

/// Delete a route (waypoints cascade).
async fn delete_route(
    State(state): State<AppState>,
    Path(route_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_route(RouteId(route_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a route's waypoints in position order.
async fn list_waypoints(
    State(state): State<AppState>,
    Path(route_id): Path<u64>,
) -> Result<Json<WaypointListResponse>, AppError> {
    let waypoints = state.store.waypoints(RouteId(route_id)).await?;

    Ok(Json(WaypointListResponse {
        waypoints: waypoints
            .iter()
            .map(WaypointResponse::from_waypoint)
            .collect(),
    }))
}

/// Add one waypoint, at an explicit position or appended.
async fn add_waypoint(
    State(state): State<AppState>,
    Path(route_id): Path<u64>,
    Json(req): Json<AddWaypointRequest>,
) -> Result<(StatusCode, Json<WaypointResponse>), AppError> {
    let waypoint = state
        .store
        .add_waypoint(
            RouteId(route_id),
            NewWaypoint {
                coord: LatLon::new(req.lat, req.lon),
                name: req.name,
            },
            req.position,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WaypointResponse::from_waypoint(&waypoint)),
    ))
}

/// Replace a route's waypoints wholesale.
///
/// The body is either a waypoint array or that array as a JSON string;
/// the payload type sorts that out before the store mutates anything.
async fn replace_waypoints(
    State(state): State<AppState>,
    Path(route_id): Path<u64>,
    Json(payload): Json<WaypointPayload>,
) -> Result<Json<WaypointListResponse>, AppError> {
    let waypoints = state
        .store
        .replace_waypoints(RouteId(route_id), payload)
        .await?;

    Ok(Json(WaypointListResponse {
        waypoints: waypoints
            .iter()
            .map(WaypointResponse::from_waypoint)
            .collect(),
    }))
}

/// Remove one waypoint, closing the position gap.
async fn remove_waypoint(
    State(state): State<AppState>,
    Path(waypoint_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.store.remove_waypoint(WaypointId(waypoint_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export a route as a GPX download.
async fn export_gpx(
    State(state): State<AppState>,
    Path(route_id): Path<u64>,
) -> Result<Response, AppError> {
    let route_id = RouteId(route_id);

    let route = state.store.route(route_id).await.ok_or(AppError::NotFound {
        message: "route not found".to_string(),
    })?;
    let waypoints = state.store.waypoints(route_id).await?;

    let request = RouteRequest {
        start: route.start.clone(),
        end: route.end.clone(),
        waypoints,
        avoid_motorways: route.avoid_motorways,
    };

    let xml = match state.engine.resolve(&request).await {
        RouteResolution::UnresolvedEndpoint { query } => {
            return Err(AppError::Unprocessable {
                message: format!("cannot export: location \"{query}\" did not resolve"),
            });
        }
        RouteResolution::Resolved {
            start,
            end,
            geometry,
        } => gpx::export(&route, start.coord, end.coord, geometry.as_ref())?,
    };

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/gpx+xml".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"route-{}.gpx\"", route_id.0),
        ),
    ];

    Ok((headers, xml).into_response())
}

/// Build transient waypoints from an ordered ad-hoc payload.
///
/// Positions come from payload order; the ids are never persisted.
fn ad_hoc_waypoints(inputs: Vec<WaypointInput>) -> Vec<Waypoint> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| Waypoint {
            id: WaypointId(index as u64 + 1),
            route_id: RouteId(0),
            coord: LatLon::new(input.lat, input.lon),
            position: index as u32 + 1,
            name: input.name,
        })
        .collect()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String, field: &'static str },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::TripNotFound | StoreError::RouteNotFound => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::Conflict(conflict) => AppError::Conflict {
                message: conflict.to_string(),
                field: conflict.field(),
            },
            StoreError::Waypoint(waypoint) => match waypoint {
                WaypointError::NotFound => AppError::NotFound {
                    message: waypoint.to_string(),
                },
                WaypointError::InvalidFormat => AppError::Unprocessable {
                    message: waypoint.to_string(),
                },
                WaypointError::PositionTaken(_) | WaypointError::PositionOutOfRange(_) => {
                    AppError::BadRequest {
                        message: waypoint.to_string(),
                    }
                }
            },
        }
    }
}

impl From<GpxError> for AppError {
    fn from(e: GpxError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, field) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Conflict { message, field } => (StatusCode::CONFLICT, message, Some(field)),
            AppError::Unprocessable { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, None)
            }
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        warn!(status = %status, %message, "request failed");

        let body = Json(ErrorResponse {
            error: message,
            field,
        });
        (status, body).into_response()
    }
}
