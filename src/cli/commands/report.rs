//! Report output handling
//!
//! Renders an analytics result in the requested format and writes it to
//! stdout, an explicit file, or the configured reports directory.

use crate::args::OutputArgs;
use crate::commands::CommandResult;
use orbit_analytics::config::Config;
use orbit_analytics::core::report::{reporter_for, AnalyticsReport, ReportFormat};
use orbit_analytics::{error, info};
use std::path::PathBuf;
use std::str::FromStr;

/// Resolve where a report should be written; `None` means stdout
fn target_path(
    report: &AnalyticsReport,
    output: &OutputArgs,
    format: ReportFormat,
    config: &Config,
) -> Option<PathBuf> {
    if let Some(path) = &output.output {
        return Some(path.clone());
    }
    output.save.then(|| {
        PathBuf::from(&config.paths.reports_dir)
            .join(format!("{}.{}", report.file_stem(), format.extension()))
    })
}

/// Render and write a report
pub fn emit(report: &AnalyticsReport, output: &OutputArgs, config: &Config) -> CommandResult {
    let format = ReportFormat::from_str(&output.format).map_err(|e| format!("✗ {e}"))?;
    let reporter = reporter_for(format);

    match target_path(report, output, format, config) {
        Some(path) => {
            reporter.generate(report, &path).map_err(|e| {
                error!(
                    "Failed to write {} report to {}: {e}",
                    report.kind(),
                    path.display()
                );
                format!("✗ Failed to write report {}: {e}", path.display())
            })?;
            info!("{format} {} report written to {}", report.kind(), path.display());
            println!("✓ Report generated: {}", path.display());
        }
        None => {
            let content = reporter
                .render(report)
                .map_err(|e| format!("✗ Failed to render report: {e}"))?;
            print!("{content}");
        }
    }
    Ok(())
}
