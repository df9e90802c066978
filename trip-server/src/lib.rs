//! Route geometry and scheduling engine for a road-trip planner.
//!
//! Turns free-text locations and ordered waypoints into driving
//! distance/duration despite unreliable third-party providers, keeps
//! route time slots within a trip from overlapping, keeps waypoint
//! ordering gap-free under mutation, and exports computed geometry as
//! GPX 1.1.

pub mod domain;
pub mod engine;
pub mod geocode;
pub mod gpx;
pub mod routing;
pub mod schedule;
pub mod store;
pub mod waypoints;
pub mod web;
