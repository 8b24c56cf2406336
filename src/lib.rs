//! Shared library for `OrbitAnalytics`
//! Contains the skill/tag analytics core used by the CLI and by embedding services

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use crate::core::error::{AnalyticsError, Result};
pub use shared::get_version;
