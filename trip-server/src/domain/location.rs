//! Coordinates and resolved locations.

use std::fmt;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A successfully geocoded location.
///
/// Produced by the location resolver and consumed immediately by the
/// distance engine and the GPX exporter. A failed geocode is represented
/// as the absence of this value, never as a partially filled one.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// The free-text query that resolved to this location.
    pub name: String,

    /// The resolved coordinate.
    pub coord: LatLon,
}

impl Location {
    /// Create a location from a query string and its resolved coordinate.
    pub fn new(name: impl Into<String>, coord: LatLon) -> Self {
        Self {
            name: name.into(),
            coord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let coord = LatLon::new(48.8566, 2.3522);
        assert_eq!(format!("{}", coord), "(48.8566, 2.3522)");
    }

    #[test]
    fn location_carries_query() {
        let loc = Location::new("Paris", LatLon::new(48.8566, 2.3522));
        assert_eq!(loc.name, "Paris");
        assert_eq!(loc.coord.lat, 48.8566);
    }
}
