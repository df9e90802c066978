//! Geocoding client error types.

/// Errors from the geocoding HTTP client.
///
/// These never escape the resolver: every variant is logged there and
/// collapsed into "unresolved".
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("geocoder returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider returned a coordinate that does not parse as a float
    #[error("invalid coordinate in geocoder response: {0}")]
    BadCoordinate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "geocoder returned status 503: unavailable");

        let err = GeocodeError::BadCoordinate("48,8566".into());
        assert!(err.to_string().contains("invalid coordinate"));
    }
}
