//! Per-operation geocode memoization.
//!
//! One cache lives for the duration of a single logical operation (one
//! request, one batch recompute) inside its `LocationResolver`. It is not
//! shared across requests and needs no locking.

use std::collections::HashMap;

use crate::domain::Location;

/// Memoized geocode lookups keyed by the raw query string.
///
/// Stores negative results as well: a query the provider could not
/// resolve (or that failed in transit) is remembered as `None`, so
/// repeated occurrences of the same input within one operation cost one
/// provider call at most.
#[derive(Debug, Default)]
pub struct GeoCache {
    entries: HashMap<String, Option<Location>>,
}

impl GeoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a query.
    ///
    /// Outer `None` means "never seen"; `Some(None)` is a cached
    /// negative result.
    pub fn get(&self, query: &str) -> Option<&Option<Location>> {
        self.entries.get(query)
    }

    /// Record the outcome of a lookup, positive or negative.
    pub fn insert(&mut self, query: impl Into<String>, result: Option<Location>) {
        self.entries.insert(query.into(), result);
    }

    /// Number of memoized queries (including negative entries).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LatLon;

    #[test]
    fn miss_vs_negative_hit() {
        let mut cache = GeoCache::new();

        assert!(cache.get("Paris").is_none());

        cache.insert("Paris", None);
        assert_eq!(cache.get("Paris"), Some(&None));
    }

    #[test]
    fn positive_hit() {
        let mut cache = GeoCache::new();
        let loc = Location::new("Lyon", LatLon::new(45.764, 4.8357));

        cache.insert("Lyon", Some(loc.clone()));

        assert_eq!(cache.get("Lyon"), Some(&Some(loc)));
        assert_eq!(cache.len(), 1);
    }
}
