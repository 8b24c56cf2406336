//! CLI argument definitions for `OrbitAnalytics`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use orbit_analytics::config::ConfigOverrides;
use orbit_analytics::core::models::{CourseId, MinorId, SpecializationId, StudentId};
use orbit_analytics::shared::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Where and how a report is written
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Report format: markdown (md) or json
    #[arg(short, long, value_name = "FORMAT", default_value = "md")]
    pub format: String,

    /// Output file path (optional; prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the report under the configured reports directory
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `snapshot`, `limit`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum MinorSubcommand {
    /// Select a minor, archiving the current selection
    Select {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,
        /// Minor identifier
        #[arg(value_name = "MINOR")]
        minor: MinorId,
    },
    /// Complete the selected minor and accrue its target skills
    Complete {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,
        /// Minor identifier
        #[arg(value_name = "MINOR")]
        minor: MinorId,
    },
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// Complete an enrolled or in-progress course and accrue its skills
    Complete {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,
        /// Course identifier
        #[arg(value_name = "COURSE")]
        course: CourseId,
        /// Final grade
        #[arg(long, value_name = "GRADE")]
        grade: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SkillsSubcommand {
    /// Show the skill hierarchy
    Tree {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Recommend minors (or courses) for a student.
    ///
    /// Minors are ranked by how well their tags match the student's completed
    /// courses. With `--similar-to` the ranking looks for alternatives to a
    /// minor; with `--courses` it suggests courses that close skill gaps.
    Recommend {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,

        /// Number of results (defaults to config `limit` or `similar_limit`)
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,

        /// Find alternatives to this minor
        #[arg(long, value_name = "MINOR", conflicts_with = "courses")]
        similar_to: Option<MinorId>,

        /// Recommend courses instead of minors
        #[arg(long)]
        courses: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Analyze skill gaps against a specialization.
    Gaps {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,

        /// Specialization to compare against (defaults to the student's own)
        #[arg(short, long, value_name = "SPECIALIZATION")]
        specialization: Option<SpecializationId>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Simulate switching to another specialization.
    WhatIf {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,

        /// Specialization to simulate
        #[arg(value_name = "SPECIALIZATION")]
        specialization: SpecializationId,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show progress through the selected minor.
    Orbit {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a student's resume.
    Resume {
        /// Student identifier
        #[arg(value_name = "STUDENT")]
        student: StudentId,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Select or complete minors (updates the snapshot).
    Minor {
        #[command(subcommand)]
        subcommand: MinorSubcommand,
    },
    /// Record course completions (updates the snapshot).
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Inspect the skill hierarchy.
    Skills {
        #[command(subcommand)]
        subcommand: SkillsSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "orbitanalytics",
    about = "OrbitAnalytics command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config snapshot path
    #[arg(long = "config-snapshot", value_name = "PATH")]
    pub config_snapshot: Option<PathBuf>,

    /// Override config snapshot path (short form)
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--snapshot`) take precedence over long-form
    /// flags (e.g., `--config-snapshot`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            snapshot: path_string(self.snapshot.as_ref())
                .or_else(|| path_string(self.config_snapshot.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_snapshot: None,
            snapshot: None,
            config_reports_dir: None,
            reports_dir: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.snapshot.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            snapshot: Some(PathBuf::from("/data/snapshot.toml")),
            reports_dir: Some(PathBuf::from("/output")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.snapshot, Some("/data/snapshot.toml".to_string()));
        assert_eq!(overrides.reports_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_snapshot: Some(PathBuf::from("/long/snapshot.toml")),
            snapshot: Some(PathBuf::from("/short/snapshot.toml")),
            config_reports_dir: Some(PathBuf::from("/long/out")),
            reports_dir: Some(PathBuf::from("/short/out")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.snapshot, Some("/short/snapshot.toml".to_string()));
        assert_eq!(overrides.reports_dir, Some("/short/out".to_string()));
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let cli = Cli {
            config_snapshot: Some(PathBuf::from("/long/snapshot.toml")),
            config_reports_dir: Some(PathBuf::from("/long/out")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.snapshot, Some("/long/snapshot.toml".to_string()));
        assert_eq!(overrides.reports_dir, Some("/long/out".to_string()));
    }

    #[test]
    fn test_parse_recommend_command() {
        let cli = Cli::try_parse_from([
            "orbitanalytics",
            "recommend",
            "3",
            "--similar-to",
            "7",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Recommend {
                student,
                similar_to,
                courses,
                output,
                ..
            } => {
                assert_eq!(student, StudentId(3));
                assert_eq!(similar_to, Some(MinorId(7)));
                assert!(!courses);
                assert_eq!(output.format, "json");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_similar_to_conflicts_with_courses() {
        let parsed = Cli::try_parse_from([
            "orbitanalytics",
            "recommend",
            "3",
            "--similar-to",
            "7",
            "--courses",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_save_conflicts_with_output() {
        let parsed = Cli::try_parse_from(["orbitanalytics", "orbit", "1", "--save", "-o", "x.md"]);
        assert!(parsed.is_err());
    }
}
