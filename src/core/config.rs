//! Configuration module for `OrbitAnalytics`

use crate::core::error::Result;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the configuration directory
const DIR_VARIABLE: &str = "$ORBIT_ANALYTICS";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Data source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the TOML snapshot holding reference data and student records
    #[serde(default)]
    pub snapshot: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Recommendation limits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsConfig {
    /// Number of minors or courses returned by `recommend`
    #[serde(default)]
    pub limit: usize,
    /// Number of alternatives returned by `recommend --similar-to`
    #[serde(default)]
    pub similar_limit: usize,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Recommendation settings
    #[serde(default)]
    pub recommendations: RecommendationsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override snapshot path
    pub snapshot: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

fn parse_limit(key: &str, value: &str) -> std::result::Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("Invalid number for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$ORBIT_ANALYTICS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/orbitanalytics`
    /// - macOS: `~/Library/Application Support/orbitanalytics`
    /// - Windows: `%APPDATA%\orbitanalytics`
    #[must_use]
    pub fn get_orbitanalytics_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orbitanalytics")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) in the current config and set in
    /// `defaults` are updated, so user settings survive an upgrade.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.data.snapshot.is_empty() && !defaults.data.snapshot.is_empty() {
            self.data.snapshot.clone_from(&defaults.data.snapshot);
            changed = true;
        }

        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        if self.recommendations.limit == 0 && defaults.recommendations.limit > 0 {
            self.recommendations.limit = defaults.recommendations.limit;
            changed = true;
        }
        if self.recommendations.similar_limit == 0 && defaults.recommendations.similar_limit > 0 {
            self.recommendations.similar_limit = defaults.recommendations.similar_limit;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the configuration file is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(snapshot) = &overrides.snapshot {
            self.data.snapshot.clone_from(snapshot);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_orbitanalytics_dir`](Self::get_orbitanalytics_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_orbitanalytics_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ORBIT_ANALYTICS` in a string to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_orbitanalytics_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$ORBIT_ANALYTICS` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.data.snapshot = Self::expand_variables(&config.data.snapshot);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// The defaults differ between debug and release builds:
    /// - Debug: `DefaultCLIConfigDebug.toml`
    /// - Release: `DefaultCLIConfigRelease.toml`
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults,
    ///   save the result when something was added
    /// - On first run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// The saved file looks like:
    /// ```toml
    /// [logging]
    /// level = "info"
    /// file = "$ORBIT_ANALYTICS/logs/orbitanalytics.log"
    /// verbose = false
    ///
    /// [data]
    /// snapshot = "$ORBIT_ANALYTICS/snapshot.toml"
    ///
    /// [paths]
    /// reports_dir = "$ORBIT_ANALYTICS/reports"
    ///
    /// [recommendations]
    /// limit = 5
    /// similar_limit = 3
    /// ```
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written.
    pub fn save(&self) -> Result<()> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Snapshot path as a `PathBuf`, `None` when unset
    #[must_use]
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        (!self.data.snapshot.is_empty()).then(|| PathBuf::from(&self.data.snapshot))
    }

    /// Keys accepted by [`get`](Config::get), [`set`](Config::set) and [`unset`](Config::unset)
    pub const KEYS: [&'static str; 7] = [
        "level",
        "file",
        "verbose",
        "snapshot",
        "reports_dir",
        "limit",
        "similar_limit",
    ];

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`: Logging level ("debug", "info", "warn", "error")
    /// - `file`: Log file path
    /// - `verbose`: Verbose logging boolean
    /// - `snapshot`: Snapshot file path
    /// - `reports_dir`: Reports output directory path
    /// - `limit`: Recommendation count
    /// - `similar_limit`: Alternative-minor count
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "snapshot" => Some(self.data.snapshot.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "limit" => Some(self.recommendations.limit.to_string()),
            "similar_limit" | "similar-limit" => {
                Some(self.recommendations.similar_limit.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g., "maybe" for verbose).
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "level" => self.logging.level = value.parse::<Level>()?.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "snapshot" => self.data.snapshot = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "limit" => self.recommendations.limit = parse_limit(key, value)?,
            "similar_limit" | "similar-limit" => {
                self.recommendations.similar_limit = parse_limit(key, value)?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> std::result::Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "snapshot" => self.data.snapshot.clone_from(&defaults.data.snapshot),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "limit" => self.recommendations.limit = defaults.recommendations.limit,
            "similar_limit" | "similar-limit" => {
                self.recommendations.similar_limit = defaults.recommendations.similar_limit;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<()> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[data]")?;
        writeln!(f, "  snapshot = \"{}\"", self.data.snapshot)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[recommendations]")?;
        writeln!(f, "  limit = {}", self.recommendations.limit)?;
        writeln!(f, "  similar_limit = {}", self.recommendations.similar_limit)?;

        Ok(())
    }
}
