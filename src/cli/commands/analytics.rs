//! Read-only analytics commands
//!
//! Each handler loads the snapshot, runs one analytic operation and hands
//! the result to the report writer.

use crate::args::{OutputArgs, SkillsSubcommand};
use crate::commands::{failure, load_snapshot, report, CommandResult};
use orbit_analytics::config::Config;
use orbit_analytics::core::analytics::{
    build_tree, gap_analysis, orbit, recommend_courses, recommend_minors, resume, similar_minors,
    what_if,
};
use orbit_analytics::core::models::{MinorId, SpecializationId, StudentId};
use orbit_analytics::core::report::AnalyticsReport;
use orbit_analytics::core::store::CatalogStore;
use orbit_analytics::debug;

/// Minor or course recommendations
pub fn recommend(
    student: StudentId,
    limit: Option<usize>,
    similar_to: Option<MinorId>,
    courses: bool,
    output: &OutputArgs,
    config: &Config,
) -> CommandResult {
    let (snapshot, _) = load_snapshot(config)?;

    let result = if courses {
        let limit = limit.unwrap_or(config.recommendations.limit);
        recommend_courses(&snapshot, student, limit).map(AnalyticsReport::CourseRecommendations)
    } else if let Some(current) = similar_to {
        let limit = limit.unwrap_or(config.recommendations.similar_limit);
        similar_minors(&snapshot, student, current, limit)
            .map(AnalyticsReport::MinorRecommendations)
    } else {
        let limit = limit.unwrap_or(config.recommendations.limit);
        recommend_minors(&snapshot, student, limit).map(AnalyticsReport::MinorRecommendations)
    };

    report::emit(&result.map_err(|e| failure(&e))?, output, config)
}

/// Skill gaps against a specialization
pub fn gaps(
    student: StudentId,
    specialization: Option<SpecializationId>,
    output: &OutputArgs,
    config: &Config,
) -> CommandResult {
    let (snapshot, _) = load_snapshot(config)?;
    let gaps = gap_analysis(&snapshot, student, specialization).map_err(|e| failure(&e))?;
    debug!(
        "Student {student}: {} of {} required skills satisfied",
        gaps.analysis.satisfied, gaps.analysis.considered
    );
    report::emit(&AnalyticsReport::Gaps(gaps), output, config)
}

/// Specialization switch simulation
pub fn simulate_switch(
    student: StudentId,
    specialization: SpecializationId,
    output: &OutputArgs,
    config: &Config,
) -> CommandResult {
    let (snapshot, _) = load_snapshot(config)?;
    let report = what_if(&snapshot, student, specialization).map_err(|e| failure(&e))?;
    report::emit(&AnalyticsReport::WhatIf(report), output, config)
}

/// Progress through the selected minor
pub fn show_orbit(student: StudentId, output: &OutputArgs, config: &Config) -> CommandResult {
    let (snapshot, _) = load_snapshot(config)?;
    let outcome = orbit(&snapshot, student).map_err(|e| failure(&e))?;
    report::emit(
        &AnalyticsReport::Orbit {
            student_id: student,
            orbit: outcome,
        },
        output,
        config,
    )
}

/// Aggregated resume
pub fn show_resume(student: StudentId, output: &OutputArgs, config: &Config) -> CommandResult {
    let (snapshot, _) = load_snapshot(config)?;
    let view = resume(&snapshot, student).map_err(|e| failure(&e))?;
    report::emit(&AnalyticsReport::Resume(view), output, config)
}

/// Skill hierarchy commands
pub fn skills(subcommand: &SkillsSubcommand, config: &Config) -> CommandResult {
    match subcommand {
        SkillsSubcommand::Tree { output } => {
            let (snapshot, _) = load_snapshot(config)?;
            let tree = build_tree(snapshot.skills());
            report::emit(&AnalyticsReport::SkillTree(tree), output, config)
        }
    }
}
