//! Route geometry: the ordered path of a route plus its aggregate
//! distance and duration.
//!
//! A geometry is either `Routed` (produced by a routing provider) or
//! `Fallback` (a straight great-circle segment synthesized when every
//! applicable provider failed). It is never partially populated: a failed
//! computation yields no geometry at all.

use super::LatLon;

/// Mean Earth radius in kilometres, used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average driving speed for fallback durations, in km/h.
///
/// When no provider can route, we still need a duration to go with the
/// great-circle distance. This is a coarse road-trip average; the result
/// is clearly tagged `Fallback` so callers can present it as an estimate.
const FALLBACK_SPEED_KMH: f64 = 80.0;

/// How a geometry was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    /// Computed by a routing provider over the road network.
    Routed,

    /// Great-circle estimate used when all applicable providers failed.
    Fallback,
}

/// The ordered coordinate path of a route with aggregate figures.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Path coordinates in travel order.
    pub points: Vec<LatLon>,

    /// Total distance in metres.
    pub distance_meters: f64,

    /// Total driving duration in seconds.
    pub duration_seconds: f64,

    /// Provenance of this geometry.
    pub source: GeometrySource,
}

impl RouteGeometry {
    /// Build a provider-routed geometry.
    pub fn routed(points: Vec<LatLon>, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            points,
            distance_meters,
            duration_seconds,
            source: GeometrySource::Routed,
        }
    }

    /// Build the two-point straight-line fallback between two coordinates.
    ///
    /// Distance is the great-circle distance; duration assumes
    /// `FALLBACK_SPEED_KMH` average speed.
    pub fn fallback_between(start: LatLon, end: LatLon) -> Self {
        let distance_km = haversine_km(start, end);
        let duration_hours = distance_km / FALLBACK_SPEED_KMH;

        Self {
            points: vec![start, end],
            distance_meters: distance_km * 1000.0,
            duration_seconds: duration_hours * 3600.0,
            source: GeometrySource::Fallback,
        }
    }

    /// Bounding box of the path as (south-west, north-east) corners.
    ///
    /// Returns `None` for an empty path.
    pub fn bounds(&self) -> Option<(LatLon, LatLon)> {
        let first = self.points.first()?;

        let mut min = *first;
        let mut max = *first;
        for p in &self.points[1..] {
            min.lat = min.lat.min(p.lat);
            min.lon = min.lon.min(p.lon);
            max.lat = max.lat.max(p.lat);
            max.lon = max.lon.max(p.lon);
        }

        Some((min, max))
    }
}

/// Great-circle distance between two coordinates in kilometres.
pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(0.0, 1.0);

        // 2 * pi * 6371 / 360 ~= 111.19 km
        let d = haversine_km(a, b);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn zero_distance_for_identical_points() {
        let p = LatLon::new(51.5, -0.1);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = LatLon::new(48.8566, 2.3522);
        let b = LatLon::new(45.764, 4.8357);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn fallback_is_two_points_tagged_fallback() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(0.0, 1.0);

        let geom = RouteGeometry::fallback_between(a, b);

        assert_eq!(geom.points, vec![a, b]);
        assert_eq!(geom.source, GeometrySource::Fallback);
        assert!((geom.distance_meters - 111_190.0).abs() < 100.0);
        // ~111.2 km at 80 km/h ~= 1.39 h
        assert!((geom.duration_seconds / 3600.0 - 1.39).abs() < 0.01);
    }

    #[test]
    fn bounds_cover_all_points() {
        let geom = RouteGeometry::routed(
            vec![
                LatLon::new(1.0, 5.0),
                LatLon::new(-2.0, 7.0),
                LatLon::new(0.5, 6.0),
            ],
            0.0,
            0.0,
        );

        let (min, max) = geom.bounds().unwrap();
        assert_eq!(min.lat, -2.0);
        assert_eq!(min.lon, 5.0);
        assert_eq!(max.lat, 1.0);
        assert_eq!(max.lon, 7.0);
    }

    #[test]
    fn bounds_empty_path() {
        let geom = RouteGeometry::routed(Vec::new(), 0.0, 0.0);
        assert!(geom.bounds().is_none());
    }
}
