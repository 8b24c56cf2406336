//! Shared fixtures for integration tests

#![allow(dead_code)]

use orbit_analytics::core::store::Snapshot;

/// The demo snapshot shipped under `samples/`
pub const DEMO: &str = include_str!("../../samples/demo_snapshot.toml");

/// Parse the demo snapshot
pub fn demo() -> Snapshot {
    Snapshot::from_toml(DEMO).expect("demo snapshot should parse")
}

/// Compare floats produced by additive scoring
pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
