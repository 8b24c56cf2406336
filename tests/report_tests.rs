//! Integration tests for Markdown and JSON rendering

mod common;

use common::demo;
use orbit_analytics::core::analytics::{
    build_tree, gap_analysis, orbit, recommend_courses, recommend_minors, resume, what_if,
};
use orbit_analytics::core::models::{SpecializationId, StudentId};
use orbit_analytics::core::report::{
    reporter_for, AnalyticsReport, JsonReporter, MarkdownReporter, ReportFormat, ReportGenerator,
};
use orbit_analytics::core::store::CatalogStore;
use serde_json::Value;
use tempfile::TempDir;

const ADA: StudentId = StudentId(1);

fn all_reports() -> Vec<AnalyticsReport> {
    let snapshot = demo();
    vec![
        AnalyticsReport::MinorRecommendations(recommend_minors(&snapshot, ADA, 5).unwrap()),
        AnalyticsReport::CourseRecommendations(recommend_courses(&snapshot, ADA, 5).unwrap()),
        AnalyticsReport::Gaps(gap_analysis(&snapshot, ADA, None).unwrap()),
        AnalyticsReport::WhatIf(what_if(&snapshot, ADA, SpecializationId(2)).unwrap()),
        AnalyticsReport::Orbit {
            student_id: ADA,
            orbit: orbit(&snapshot, ADA).unwrap(),
        },
        AnalyticsReport::Resume(resume(&snapshot, ADA).unwrap()),
        AnalyticsReport::SkillTree(build_tree(snapshot.skills())),
    ]
}

#[test]
fn test_markdown_fills_every_placeholder() {
    let reporter = MarkdownReporter::new();
    for report in all_reports() {
        let md = reporter.render(&report).unwrap();
        assert!(md.starts_with("# "), "{} should start with a title", report.kind());
        assert!(!md.contains("{{"), "{} left a placeholder", report.kind());
    }
}

#[test]
fn test_json_is_valid_for_every_report() {
    let reporter = JsonReporter::new();
    for report in all_reports() {
        let rendered = reporter.render(&report).unwrap();
        let parsed: Result<Value, _> = serde_json::from_str(&rendered);
        assert!(parsed.is_ok(), "{} produced invalid JSON", report.kind());
    }
}

#[test]
fn test_resume_rendering_is_idempotent() {
    let snapshot = demo();
    for format in [ReportFormat::Markdown, ReportFormat::Json] {
        let reporter = reporter_for(format);
        let first = reporter
            .render(&AnalyticsReport::Resume(resume(&snapshot, ADA).unwrap()))
            .unwrap();
        let second = reporter
            .render(&AnalyticsReport::Resume(resume(&snapshot, ADA).unwrap()))
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_json_scores_rounded_to_two_decimals() {
    let snapshot = demo();
    let report =
        AnalyticsReport::MinorRecommendations(recommend_minors(&snapshot, ADA, 5).unwrap());
    let parsed: Value = serde_json::from_str(&JsonReporter::new().render(&report).unwrap()).unwrap();

    assert_eq!(parsed["recommendations"][0]["score"], serde_json::json!(4.15));
    assert_eq!(parsed["recommendations"][1]["score"], serde_json::json!(3.15));
    assert_eq!(parsed["total_count"], serde_json::json!(2));
}

#[test]
fn test_markdown_orbit_progress() {
    let snapshot = demo();
    let report = AnalyticsReport::Orbit {
        student_id: ADA,
        orbit: orbit(&snapshot, ADA).unwrap(),
    };
    let md = MarkdownReporter::new().render(&report).unwrap();

    assert!(md.contains("# Orbit: Data Analytics"));
    assert!(md.contains("**Progress:** 25.00% (1 of 4 courses)"));
    assert!(md.contains("| Statistics | 2 |"));
}

#[test]
fn test_markdown_skill_tree_nesting() {
    let snapshot = demo();
    let md = MarkdownReporter::new()
        .render(&AnalyticsReport::SkillTree(build_tree(snapshot.skills())))
        .unwrap();

    assert!(md.contains("**Skills:** 10"));
    assert!(md.contains("- Programming (#1, level 0)\n  - Python (#2, level 1)"));
    assert!(md.contains("    - Machine Learning (#6, level 2)"));
}

#[test]
fn test_generate_writes_file() {
    let dir = TempDir::new().expect("temp dir");
    let snapshot = demo();
    let report = AnalyticsReport::Gaps(gap_analysis(&snapshot, ADA, None).unwrap());
    let path = dir
        .path()
        .join("reports")
        .join(format!("{}.{}", report.file_stem(), ReportFormat::Json.extension()));

    JsonReporter::new().generate(&report, &path).unwrap();

    assert!(path.ends_with("student_1_gaps.json"));
    let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["completion_percentage"], serde_json::json!(50.0));
    assert_eq!(parsed["specialization_name"], "Software Engineering");
}
