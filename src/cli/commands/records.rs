//! Commands that change student records
//!
//! The snapshot is loaded, updated in memory and written back to the same
//! file. A failed update leaves the file untouched.

use crate::args::{CourseSubcommand, MinorSubcommand};
use crate::commands::{failure, load_snapshot, CommandResult};
use chrono::Utc;
use orbit_analytics::config::Config;
use orbit_analytics::core::selection::MinorEvent;
use orbit_analytics::core::store::Snapshot;
use orbit_analytics::error;
use std::path::Path;

fn persist(snapshot: &Snapshot, path: &Path) -> CommandResult {
    snapshot.save(path).map_err(|e| {
        error!("Failed to save snapshot {}: {e}", path.display());
        format!("✗ Failed to save snapshot {}: {e}", path.display())
    })
}

/// Select or complete a minor
pub fn minor(subcommand: MinorSubcommand, config: &Config) -> CommandResult {
    let (mut snapshot, path) = load_snapshot(config)?;

    match subcommand {
        MinorSubcommand::Select { student, minor } => {
            let record = snapshot
                .apply_minor_event(student, MinorEvent::Select(minor))
                .map_err(|e| failure(&e))?;
            persist(&snapshot, &path)?;
            println!("✓ Student {student}: minor {minor} is {}", record.status);
        }
        MinorSubcommand::Complete { student, minor } => {
            snapshot
                .apply_minor_event(student, MinorEvent::Complete(minor))
                .map_err(|e| failure(&e))?;
            snapshot
                .apply_minor_completion_skills(student, minor)
                .map_err(|e| failure(&e))?;
            persist(&snapshot, &path)?;
            println!("✓ Student {student}: minor {minor} completed");
        }
    }
    Ok(())
}

/// Record a course completion
pub fn course(subcommand: CourseSubcommand, config: &Config) -> CommandResult {
    let (mut snapshot, path) = load_snapshot(config)?;

    match subcommand {
        CourseSubcommand::Complete {
            student,
            course,
            grade,
        } => {
            let record = snapshot
                .complete_course(student, course, grade, Utc::now())
                .map_err(|e| failure(&e))?;
            persist(&snapshot, &path)?;
            match record.grade {
                Some(grade) => println!(
                    "✓ Student {student}: course {course} completed with grade {grade}"
                ),
                None => println!("✓ Student {student}: course {course} completed"),
            }
        }
    }
    Ok(())
}
