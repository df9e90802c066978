//! Bulk-replace payload resolution.
//!
//! Clients send the replacement waypoint list either as a native JSON
//! array or as that same array serialized into a string. The ambiguity is
//! resolved exactly once, here at the boundary; everything past this
//! module works with structured entries only.

use serde::Deserialize;

use super::sequencer::WaypointError;

/// One waypoint in a bulk-replace payload, in travel order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaypointInput {
    pub lat: f64,
    pub lon: f64,

    #[serde(default)]
    pub name: String,
}

/// The bulk-replace input as it arrives over the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WaypointPayload {
    /// Already-structured array of entries.
    Entries(Vec<WaypointInput>),

    /// The same array as a JSON string, parsed lazily.
    Text(String),
}

impl WaypointPayload {
    /// Resolve the payload to ordered entries.
    ///
    /// A `Text` payload that does not parse as an entry array is an
    /// invalid-format error; the caller must not have mutated anything
    /// yet when it calls this.
    pub fn into_entries(self) -> Result<Vec<WaypointInput>, WaypointError> {
        match self {
            WaypointPayload::Entries(entries) => Ok(entries),
            WaypointPayload::Text(text) => {
                serde_json::from_str(&text).map_err(|_| WaypointError::InvalidFormat)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_array() {
        let payload: WaypointPayload =
            serde_json::from_str(r#"[{"lat": 47.0, "lon": 2.0, "name": "Bourges"}]"#).unwrap();

        let entries = payload.into_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Bourges");
    }

    #[test]
    fn stringified_array() {
        let payload: WaypointPayload =
            serde_json::from_str(r#""[{\"lat\": 47.0, \"lon\": 2.0}]""#).unwrap();

        let entries = payload.into_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].lat, 47.0);
        assert_eq!(entries[0].name, "");
    }

    #[test]
    fn empty_array_is_valid() {
        let payload: WaypointPayload = serde_json::from_str("[]").unwrap();
        assert!(payload.into_entries().unwrap().is_empty());
    }

    #[test]
    fn malformed_text_is_invalid_format() {
        let payload = WaypointPayload::Text("not json at all".into());
        assert_eq!(
            payload.into_entries().unwrap_err(),
            WaypointError::InvalidFormat
        );
    }

    #[test]
    fn text_with_wrong_shape_is_invalid_format() {
        let payload = WaypointPayload::Text(r#"{"lat": 1.0}"#.into());
        assert_eq!(
            payload.into_entries().unwrap_err(),
            WaypointError::InvalidFormat
        );
    }
}
