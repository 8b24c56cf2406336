//! Re-export the logger API to preserve the `orbit_analytics::shared::logger` path.

pub use crate::logger::{
    current_level, disable_debug, enable_debug, enable_verbose, init_file_logging,
    is_debug_enabled, is_verbose_enabled, set_level, set_level_from_str, Level,
};
