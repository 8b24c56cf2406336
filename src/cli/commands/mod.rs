//! CLI command handlers for `OrbitAnalytics`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command family is implemented in its own submodule.

pub mod analytics;
pub mod config;
pub mod records;
pub mod report;

use orbit_analytics::config::Config;
use orbit_analytics::core::store::Snapshot;
use orbit_analytics::{error, AnalyticsError};
use std::path::PathBuf;

/// Result of a command handler; the error is a ready-to-print message
pub type CommandResult = Result<(), String>;

/// Format an analytics error for the terminal
pub fn failure(err: &AnalyticsError) -> String {
    format!("✗ {err}")
}

/// Load the snapshot named by the configuration
pub fn load_snapshot(config: &Config) -> Result<(Snapshot, PathBuf), String> {
    let path = config.snapshot_path().ok_or_else(|| {
        "✗ No snapshot configured. Set one with `config set snapshot <PATH>` or pass --snapshot"
            .to_string()
    })?;

    let snapshot = Snapshot::load(&path).map_err(|e| {
        error!("Failed to load snapshot {}: {e}", path.display());
        format!("✗ Failed to load snapshot {}: {e}", path.display())
    })?;
    Ok((snapshot, path))
}
