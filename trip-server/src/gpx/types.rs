//! Serde shapes for the emitted GPX document.
//!
//! Field order matters: quick-xml serializes struct fields in
//! declaration order, and the GPX 1.1 schema fixes the child order of
//! each element (`time` precedes `name` precedes `sym` inside a point).

use serde::Serialize;

/// The `gpx` document root.
#[derive(Debug, Serialize)]
pub struct Gpx {
    #[serde(rename = "@version")]
    pub version: &'static str,

    #[serde(rename = "@creator")]
    pub creator: &'static str,

    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,

    #[serde(rename = "@xmlns:xsi")]
    pub xmlns_xsi: &'static str,

    #[serde(rename = "@xsi:schemaLocation")]
    pub schema_location: &'static str,

    pub metadata: Metadata,

    #[serde(rename = "wpt")]
    pub waypoints: Vec<Point>,

    #[serde(rename = "rte", skip_serializing_if = "Option::is_none")]
    pub route: Option<Rte>,

    #[serde(rename = "trk", skip_serializing_if = "Option::is_none")]
    pub track: Option<Trk>,
}

/// The `metadata` block.
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub name: String,
    pub desc: String,
    pub time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

/// Bounding box over every point in the document.
#[derive(Debug, Serialize)]
pub struct Bounds {
    #[serde(rename = "@minlat")]
    pub minlat: f64,
    #[serde(rename = "@minlon")]
    pub minlon: f64,
    #[serde(rename = "@maxlat")]
    pub maxlat: f64,
    #[serde(rename = "@maxlon")]
    pub maxlon: f64,
}

/// A GPX point, shared by `wpt`, `rtept` and `trkpt`.
#[derive(Debug, Serialize)]
pub struct Point {
    #[serde(rename = "@lat")]
    pub lat: f64,
    #[serde(rename = "@lon")]
    pub lon: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sym: Option<String>,
}

impl Point {
    /// A bare coordinate point.
    pub fn at(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            time: None,
            name: None,
            sym: None,
        }
    }
}

/// The degraded `rte` stub: endpoints only, no computed path.
#[derive(Debug, Serialize)]
pub struct Rte {
    pub name: String,

    #[serde(rename = "rtept")]
    pub points: Vec<Point>,
}

/// A track with a single segment holding the full geometry.
#[derive(Debug, Serialize)]
pub struct Trk {
    pub name: String,

    #[serde(rename = "trkseg")]
    pub segments: Vec<TrkSeg>,
}

#[derive(Debug, Serialize)]
pub struct TrkSeg {
    #[serde(rename = "trkpt")]
    pub points: Vec<Point>,
}
