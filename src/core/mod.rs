//! Analytics core: models, the read-only store seam, and the pure analytic operations

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod selection;
pub mod store;
