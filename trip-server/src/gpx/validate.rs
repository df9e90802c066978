//! Structural self-validation of emitted GPX.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::export::{GPX_NAMESPACE, GPX_VERSION};

/// Re-parse a GPX document and collect structural failures.
///
/// Checks the invariants every document we emit must satisfy: root
/// element `gpx`, version 1.1, the GPX 1.1 namespace, and at least one
/// of `wpt`/`rte`/`trk`. Returns an empty list for a well-formed
/// document. Backs tests and the health check; end users never see this.
pub fn validate(xml: &str) -> Vec<String> {
    let mut failures = Vec::new();

    let mut reader = Reader::from_str(xml);

    let mut saw_root = false;
    let mut root_name = String::new();
    let mut version: Option<String> = None;
    let mut namespace: Option<String> = None;
    let mut has_content = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

                if !saw_root {
                    saw_root = true;
                    root_name = name.clone();

                    for attr in e.attributes().flatten() {
                        let key = attr.key.as_ref();
                        let value = attr
                            .unescape_value()
                            .map(|v| v.into_owned())
                            .unwrap_or_default();
                        match key {
                            b"version" => version = Some(value),
                            b"xmlns" => namespace = Some(value),
                            _ => {}
                        }
                    }
                } else if matches!(name.as_str(), "wpt" | "rte" | "trk") {
                    has_content = true;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                failures.push(format!("XML parse error: {e}"));
                return failures;
            }
        }
    }

    if !saw_root {
        failures.push("document has no root element".to_string());
        return failures;
    }

    if root_name != "gpx" {
        failures.push(format!("root element is <{root_name}>, expected <gpx>"));
    }

    match version.as_deref() {
        Some(GPX_VERSION) => {}
        Some(other) => failures.push(format!("version is \"{other}\", expected \"{GPX_VERSION}\"")),
        None => failures.push("missing version attribute on root".to_string()),
    }

    match namespace.as_deref() {
        Some(GPX_NAMESPACE) => {}
        Some(other) => failures.push(format!("namespace is \"{other}\", expected \"{GPX_NAMESPACE}\"")),
        None => failures.push("missing xmlns attribute on root".to_string()),
    }

    if !has_content {
        failures.push("document contains none of wpt, rte, trk".to_string());
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatLon, Route, RouteGeometry, RouteId, TripId};
    use chrono::{TimeZone, Utc};

    fn route() -> Route {
        Route {
            id: RouteId(1),
            trip_id: TripId(1),
            start: "Paris".into(),
            end: "Lyon".into(),
            datetime: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            duration_hours: Some(2.0),
            distance_km: None,
            avoid_motorways: false,
        }
    }

    #[test]
    fn emitted_full_document_is_valid() {
        let geometry = RouteGeometry::routed(
            vec![LatLon::new(48.85, 2.35), LatLon::new(45.76, 4.84)],
            463_500.0,
            16_000.0,
        );
        let xml = crate::gpx::export(
            &route(),
            LatLon::new(48.85, 2.35),
            LatLon::new(45.76, 4.84),
            Some(&geometry),
        )
        .unwrap();

        assert_eq!(validate(&xml), Vec::<String>::new());
    }

    #[test]
    fn emitted_degraded_document_is_valid() {
        let xml = crate::gpx::export(
            &route(),
            LatLon::new(48.85, 2.35),
            LatLon::new(45.76, 4.84),
            None,
        )
        .unwrap();

        assert_eq!(validate(&xml), Vec::<String>::new());
    }

    #[test]
    fn wrong_root_is_reported() {
        let failures = validate("<kml version=\"1.1\"><wpt/></kml>");
        assert!(failures.iter().any(|f| f.contains("expected <gpx>")));
    }

    #[test]
    fn wrong_version_is_reported() {
        let failures = validate(
            "<gpx version=\"1.0\" xmlns=\"http://www.topografix.com/GPX/1/1\"><wpt/></gpx>",
        );
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("version"));
    }

    #[test]
    fn missing_namespace_is_reported() {
        let failures = validate("<gpx version=\"1.1\"><wpt/></gpx>");
        assert!(failures.iter().any(|f| f.contains("xmlns")));
    }

    #[test]
    fn empty_document_is_reported() {
        let failures = validate(
            "<gpx version=\"1.1\" xmlns=\"http://www.topografix.com/GPX/1/1\"></gpx>",
        );
        assert!(failures.iter().any(|f| f.contains("none of wpt, rte, trk")));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let failures = validate("<gpx><unclosed></gpx>");
        assert!(!failures.is_empty());
    }
}
