//! GPX document construction.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::{LatLon, Route, RouteGeometry, duration_from_hours};

use super::types::{Bounds, Gpx, Metadata, Point, Rte, Trk, TrkSeg};

/// GPX schema version emitted.
pub const GPX_VERSION: &str = "1.1";

/// GPX 1.1 namespace.
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";
const CREATOR: &str = "trip-server";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Errors from GPX document construction.
///
/// Serialization can only fail on an internal defect (the document is
/// built entirely from our own types), so this surfaces in tests and
/// health checks rather than user flows.
#[derive(Debug, thiserror::Error)]
pub enum GpxError {
    #[error("GPX serialization failed: {0}")]
    Serialize(String),
}

/// Render a route as a GPX 1.1 document.
///
/// `start` and `end` are the route's resolved endpoint coordinates; they
/// anchor the degraded document when `geometry` is absent or empty. With
/// a non-empty geometry the flag waypoints use the geometry's own first
/// and last points, and every path point becomes a `trkpt` whose time is
/// interpolated linearly across the route's duration: the first point at
/// the route's datetime exactly, the last at datetime + duration.
pub fn export(
    route: &Route,
    start: LatLon,
    end: LatLon,
    geometry: Option<&RouteGeometry>,
) -> Result<String, GpxError> {
    let title = format!("{} to {}", route.start, route.end);
    let desc = format!("Driving route from {} to {}", route.start, route.end);

    let mut document = Gpx {
        version: GPX_VERSION,
        creator: CREATOR,
        xmlns: GPX_NAMESPACE,
        xmlns_xsi: XSI_NAMESPACE,
        schema_location: SCHEMA_LOCATION,
        metadata: Metadata {
            name: title.clone(),
            desc,
            time: format_time(route.datetime),
            bounds: geometry.and_then(|g| g.bounds()).map(|(min, max)| Bounds {
                minlat: min.lat,
                minlon: min.lon,
                maxlat: max.lat,
                maxlon: max.lon,
            }),
        },
        waypoints: Vec::new(),
        route: None,
        track: None,
    };

    match geometry {
        Some(geometry) if !geometry.points.is_empty() => {
            let first = geometry.points[0];
            let last = *geometry.points.last().unwrap();
            document.waypoints = endpoint_flags(first, last);

            let duration_hours = route.effective_duration_hours();
            let n = geometry.points.len();
            let points = geometry
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let mut point = Point::at(p.lat, p.lon);
                    point.time = Some(format_time(interpolated_time(
                        route.datetime,
                        duration_hours,
                        i,
                        n,
                    )));
                    point
                })
                .collect();

            document.track = Some(Trk {
                name: title,
                segments: vec![TrkSeg { points }],
            });
        }
        _ => {
            // Routing failed or was never attempted: endpoints only,
            // with a route stub instead of a track.
            document.waypoints = endpoint_flags(start, end);

            let mut start_pt = Point::at(start.lat, start.lon);
            start_pt.name = Some(route.start.clone());
            let mut end_pt = Point::at(end.lat, end.lon);
            end_pt.name = Some(route.end.clone());

            document.route = Some(Rte {
                name: title,
                points: vec![start_pt, end_pt],
            });
        }
    }

    serialize(&document)
}

/// The green/red flag waypoint pair marking the route's ends.
fn endpoint_flags(start: LatLon, end: LatLon) -> Vec<Point> {
    let mut start_wpt = Point::at(start.lat, start.lon);
    start_wpt.name = Some("Route Start".to_string());
    start_wpt.sym = Some("Flag, Green".to_string());

    let mut end_wpt = Point::at(end.lat, end.lon);
    end_wpt.name = Some("Route End".to_string());
    end_wpt.sym = Some("Flag, Red".to_string());

    vec![start_wpt, end_wpt]
}

/// Time of path point `i` of `n`, spread evenly over the duration.
fn interpolated_time(
    departure: DateTime<Utc>,
    duration_hours: f64,
    i: usize,
    n: usize,
) -> DateTime<Utc> {
    if n < 2 {
        return departure;
    }
    let fraction = i as f64 / (n - 1) as f64;
    departure + duration_from_hours(duration_hours * fraction)
}

fn format_time(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize(document: &Gpx) -> Result<String, GpxError> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some("gpx"))
        .map_err(|e| GpxError::Serialize(e.to_string()))?;
    serializer.indent(' ', 2);

    document
        .serialize(serializer)
        .map_err(|e| GpxError::Serialize(e.to_string()))?;

    let mut xml = String::with_capacity(XML_DECLARATION.len() + body.len());
    xml.push_str(XML_DECLARATION);
    xml.push_str(&body);
    Ok(xml)
}
