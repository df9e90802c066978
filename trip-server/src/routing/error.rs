//! Routing client error types.

/// Errors from the routing HTTP clients.
///
/// These are absorbed by [`super::RoutingClient`]'s fallback policy and
/// never reach the distance engine as faults.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("routing provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider answered but produced no route between the coordinates
    #[error("provider returned no route")]
    NoRoute,

    /// A route needs at least a start and an end coordinate
    #[error("at least two coordinates are required")]
    TooFewCoordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::NoRoute;
        assert_eq!(err.to_string(), "provider returned no route");

        let err = RoutingError::Api {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(
            err.to_string(),
            "routing provider returned status 429: rate limited"
        );
    }
}
