//! Command-line interface entry point for `OrbitAnalytics`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use orbit_analytics::config::Config;
use orbit_analytics::info;
use orbit_analytics::shared::logger::{
    enable_debug, enable_verbose, init_file_logging, set_level, Level,
};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Overrides apply to this run; `config` subcommands edit the stored file
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path =
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut stored, &defaults)
        }
        Command::Recommend {
            student,
            limit,
            similar_to,
            courses,
            output,
        } => commands::analytics::recommend(student, limit, similar_to, courses, &output, &config),
        Command::Gaps {
            student,
            specialization,
            output,
        } => commands::analytics::gaps(student, specialization, &output, &config),
        Command::WhatIf {
            student,
            specialization,
            output,
        } => commands::analytics::simulate_switch(student, specialization, &output, &config),
        Command::Orbit { student, output } => {
            commands::analytics::show_orbit(student, &output, &config)
        }
        Command::Resume { student, output } => {
            commands::analytics::show_resume(student, &output, &config)
        }
        Command::Minor { subcommand } => commands::records::minor(subcommand, &config),
        Command::Course { subcommand } => commands::records::course(subcommand, &config),
        Command::Skills { subcommand } => commands::analytics::skills(&subcommand, &config),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
