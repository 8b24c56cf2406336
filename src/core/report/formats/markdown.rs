//! Markdown report generator
//!
//! Renders analytics results as Markdown tables. Each report kind has an
//! embedded template whose `{{placeholders}}` are substituted at render time.
//! These reports render well in GitHub, GitLab, and VS Code.

use crate::core::analytics::{
    CourseRecommendations, GapReport, MinorRecommendations, Orbit, OrbitView, ResumeView,
    SkillTreeNode, WhatIfReport,
};
use crate::core::error::Result;
use crate::core::models::StudentId;
use crate::core::report::{AnalyticsReport, ReportGenerator};
use std::fmt::Write;

const MINORS_TEMPLATE: &str = include_str!("../templates/minors.md");
const COURSES_TEMPLATE: &str = include_str!("../templates/courses.md");
const GAPS_TEMPLATE: &str = include_str!("../templates/gaps.md");
const WHAT_IF_TEMPLATE: &str = include_str!("../templates/what_if.md");
const ORBIT_TEMPLATE: &str = include_str!("../templates/orbit.md");
const RESUME_TEMPLATE: &str = include_str!("../templates/resume.md");
const SKILL_TREE_TEMPLATE: &str = include_str!("../templates/skill_tree.md");

/// Markdown report generator
pub struct MarkdownReporter;

/// Substitute `{{key}}` placeholders in a template
///
/// Single pass over the template: substituted values are never rescanned, and
/// unknown placeholders are left as written.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let resolved = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, value))
        });
        match resolved {
            Some((end, value)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Escape a value for use inside a table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), cell)
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render_minors(report: &MinorRecommendations) -> String {
        let table = if report.recommendations.is_empty() {
            "_No minors to recommend._\n".to_string()
        } else {
            let mut table = String::new();
            table.push_str("| # | Minor | Type | Score | Matching tags | Reason |\n");
            table.push_str("|---|---|---|---|---|---|\n");
            for (rank, rec) in report.recommendations.iter().enumerate() {
                let _ = writeln!(
                    table,
                    "| {} | {} | {} | {:.2} | {} | {} |",
                    rank + 1,
                    cell(&rec.minor_name),
                    or_dash(rec.minor_type.as_deref()),
                    rec.score,
                    cell(&rec.matching_tags.join(", ")),
                    cell(&rec.reason)
                );
            }
            table
        };

        fill(
            MINORS_TEMPLATE,
            &[
                ("student_id", report.student_id.to_string()),
                ("total_count", report.total_count.to_string()),
                ("recommendations", table),
            ],
        )
    }

    fn render_courses(report: &CourseRecommendations) -> String {
        let table = if report.recommended_courses.is_empty() {
            "_No courses to recommend._\n".to_string()
        } else {
            let mut table = String::new();
            table.push_str("| Priority | Course | Covers | Deficit covered | Reason |\n");
            table.push_str("|---|---|---|---|---|\n");
            for rec in &report.recommended_courses {
                let covers = if rec.missing_skills.is_empty() {
                    "-".to_string()
                } else {
                    cell(&rec.missing_skills.join(", "))
                };
                let _ = writeln!(
                    table,
                    "| {} | {} ({}) | {covers} | {} | {} |",
                    rec.priority,
                    cell(&rec.course_name),
                    rec.course_id,
                    rec.deficit_covered,
                    cell(&rec.reason)
                );
            }
            table
        };

        fill(
            COURSES_TEMPLATE,
            &[
                ("student_id", report.student_id.to_string()),
                (
                    "specialization",
                    report
                        .specialization_name
                        .clone()
                        .unwrap_or_else(|| "none".to_string()),
                ),
                ("courses", table),
            ],
        )
    }

    fn render_gaps(report: &GapReport) -> String {
        let analysis = &report.analysis;
        let table = if analysis.skills.is_empty() {
            "_This specialization has no skill requirements._\n".to_string()
        } else {
            let mut table = String::new();
            table.push_str("| Skill | Current | Required | Gap | Satisfied |\n");
            table.push_str("|---|---|---|---|---|\n");
            for gap in &analysis.skills {
                let _ = writeln!(
                    table,
                    "| {} | {} | {} | {} | {} |",
                    cell(&gap.skill_name),
                    gap.current_level,
                    gap.required_level,
                    gap.gap,
                    mark(gap.satisfied)
                );
            }
            table
        };

        fill(
            GAPS_TEMPLATE,
            &[
                ("student_name", cell(&report.student_name)),
                ("student_id", report.student_id.to_string()),
                ("specialization", cell(&report.specialization_name)),
                (
                    "completion",
                    format!("{:.2}", analysis.completion_percentage),
                ),
                ("satisfied", analysis.satisfied.to_string()),
                ("considered", analysis.considered.to_string()),
                ("skills", table),
            ],
        )
    }

    fn render_what_if(report: &WhatIfReport) -> String {
        let comparison = &report.comparison;
        let mut table = String::new();
        table.push_str("| Skill | Current | Required now | Required after | Satisfied after |\n");
        table.push_str("|---|---|---|---|---|\n");
        for skill in &comparison.skills {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} |",
                cell(&skill.skill_name),
                skill.current_level,
                skill.old_required_level,
                skill.new_required_level,
                mark(skill.will_satisfy)
            );
        }

        fill(
            WHAT_IF_TEMPLATE,
            &[
                ("new_specialization", cell(&report.new_specialization_name)),
                ("student_name", cell(&report.student_name)),
                ("student_id", report.student_id.to_string()),
                (
                    "current_specialization",
                    or_dash(report.current_specialization_name.as_deref()),
                ),
                (
                    "current_completion",
                    format!("{:.2}", comparison.current_completion_percentage),
                ),
                (
                    "new_completion",
                    format!("{:.2}", comparison.new_completion_percentage),
                ),
                ("courses_to_keep", report.courses_to_keep.to_string()),
                (
                    "total_completed_courses",
                    report.total_completed_courses.to_string(),
                ),
                ("skills", table),
            ],
        )
    }

    fn render_orbit_view(view: &OrbitView) -> String {
        let targets = if view.target_skills.is_empty() {
            "_No target skills._\n".to_string()
        } else {
            let mut table = String::new();
            table.push_str("| Skill | Target level | Description |\n");
            table.push_str("|---|---|---|\n");
            for target in &view.target_skills {
                let _ = writeln!(
                    table,
                    "| {} | {} | {} |",
                    cell(&target.skill_name),
                    target.required_level,
                    or_dash(target.skill_description.as_deref())
                );
            }
            table
        };

        let courses = if view.courses.is_empty() {
            "_No courses._\n".to_string()
        } else {
            let mut table = String::new();
            table.push_str("| Order | Course | Credits | Semester | Required | Completed | Tags |\n");
            table.push_str("|---|---|---|---|---|---|---|\n");
            for course in &view.courses {
                let tags: Vec<&str> = course.tags.iter().map(|t| t.name.as_str()).collect();
                let _ = writeln!(
                    table,
                    "| {} | {} ({}) | {} | {} | {} | {} | {} |",
                    course.order.map_or_else(|| "-".to_string(), |o| o.to_string()),
                    cell(&course.course_name),
                    course.course_id,
                    course.credits,
                    course.semester.map_or_else(|| "-".to_string(), |s| s.to_string()),
                    if course.is_required { "yes" } else { "no" },
                    mark(course.is_completed),
                    cell(&tags.join(", "))
                );
            }
            table
        };

        fill(
            ORBIT_TEMPLATE,
            &[
                ("minor_name", cell(&view.minor_name)),
                (
                    "description",
                    view.minor_description
                        .clone()
                        .unwrap_or_else(|| "_No description._".to_string()),
                ),
                ("student_id", view.student_id.to_string()),
                ("minor_type", or_dash(view.minor_type.as_deref())),
                ("progress", format!("{:.2}", view.progress_percentage)),
                ("completed_courses", view.completed_courses.to_string()),
                ("total_courses", view.total_courses.to_string()),
                ("target_skills", targets),
                ("courses", courses),
            ],
        )
    }

    fn render_orbit(student_id: StudentId, orbit: &Orbit) -> String {
        match orbit {
            Orbit::Active(view) => Self::render_orbit_view(view),
            Orbit::NoActiveMinor => {
                format!("# Orbit\n\nStudent {student_id} has no active minor.\n")
            }
        }
    }

    fn render_resume(view: &ResumeView) -> String {
        let skills = if view.skills.is_empty() {
            "_No skills recorded._\n".to_string()
        } else {
            let mut table = String::new();
            table.push_str("| Skill | Level | Source | Acquired from |\n");
            table.push_str("|---|---|---|---|\n");
            for skill in &view.skills {
                let _ = writeln!(
                    table,
                    "| {} | {} | {} | {} |",
                    cell(&skill.name),
                    skill.level,
                    skill.source,
                    or_dash(skill.acquired_from.as_deref())
                );
            }
            table
        };

        let minors = if view.minors.is_empty() {
            "_No minors._\n".to_string()
        } else {
            let mut list = String::new();
            for minor in &view.minors {
                let _ = write!(list, "- **{}** ({})", minor.minor_name, minor.status);
                if !minor.skills_gained.is_empty() {
                    let _ = write!(list, ": {}", minor.skills_gained.join(", "));
                }
                list.push('\n');
            }
            list
        };

        let education = &view.education;
        let mut edu = String::new();
        let _ = writeln!(edu, "- Completed courses: {}", education.completed_courses);
        let _ = writeln!(edu, "- Total credits: {}", education.total_credits);
        if let Some(avg) = education.average_grade {
            let _ = writeln!(edu, "- Average grade: {avg:.2}");
        }
        if let Some(last) = education.last_completed_at {
            let _ = writeln!(edu, "- Last completed: {}", last.format("%Y-%m-%d"));
        }

        let achievements = if view.achievements.is_empty() {
            "_None yet._\n".to_string()
        } else {
            view.achievements
                .iter()
                .fold(String::new(), |mut out, a| {
                    let _ = writeln!(out, "- {a}");
                    out
                })
        };

        fill(
            RESUME_TEMPLATE,
            &[
                ("name", view.personal.name.clone()),
                ("email", view.personal.email.clone()),
                ("specialization", or_dash(view.personal.specialization.as_deref())),
                ("skills", skills),
                ("minors", minors),
                ("education", edu),
                ("achievements", achievements),
            ],
        )
    }

    fn write_tree(out: &mut String, node: &SkillTreeNode, depth: usize) {
        let _ = writeln!(
            out,
            "{}- {} (#{}, level {})",
            "  ".repeat(depth),
            node.name,
            node.id,
            node.level
        );
        for child in &node.children {
            Self::write_tree(out, child, depth + 1);
        }
    }

    fn render_skill_tree(roots: &[SkillTreeNode]) -> String {
        let mut tree = String::new();
        for root in roots {
            Self::write_tree(&mut tree, root, 0);
        }
        if tree.is_empty() {
            tree.push_str("_No skills._\n");
        }
        let count: usize = roots.iter().map(SkillTreeNode::size).sum();

        fill(
            SKILL_TREE_TEMPLATE,
            &[("skill_count", count.to_string()), ("tree", tree)],
        )
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, report: &AnalyticsReport) -> Result<String> {
        Ok(match report {
            AnalyticsReport::MinorRecommendations(r) => Self::render_minors(r),
            AnalyticsReport::CourseRecommendations(r) => Self::render_courses(r),
            AnalyticsReport::Gaps(r) => Self::render_gaps(r),
            AnalyticsReport::WhatIf(r) => Self::render_what_if(r),
            AnalyticsReport::Orbit { student_id, orbit } => Self::render_orbit(*student_id, orbit),
            AnalyticsReport::Resume(r) => Self::render_resume(r),
            AnalyticsReport::SkillTree(nodes) => Self::render_skill_tree(nodes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::{GapAnalysis, MinorRecommendation, SkillGap};
    use crate::core::models::{MinorId, SkillId, SpecializationId};

    #[test]
    fn test_fill_replaces_all_occurrences() {
        let out = fill("{{a}} and {{a}} but {{b}}", &[("a", "x".into()), ("b", "y".into())]);
        assert_eq!(out, "x and x but y");
    }

    #[test]
    fn test_fill_does_not_expand_substituted_values() {
        let out = fill(
            "# {{name}} ({{count}}) {{missing}}",
            &[("name", "{{count}} Club".into()), ("count", "3".into())],
        );
        assert_eq!(out, "# {{count}} Club (3) {{missing}}");
    }

    #[test]
    fn test_cell_escapes_pipes() {
        assert_eq!(cell("a|b"), "a\\|b");
    }

    #[test]
    fn test_minor_scores_rounded() {
        let report = MinorRecommendations {
            student_id: StudentId(1),
            recommendations: vec![MinorRecommendation {
                minor_id: MinorId(2),
                minor_name: "Data Science".to_string(),
                description: None,
                minor_type: None,
                score: 1.666_666,
                matching_tags: vec!["python".to_string()],
                reason: "Matching tags: python".to_string(),
            }],
            total_count: 4,
        };
        let md = MarkdownReporter::new()
            .render(&AnalyticsReport::MinorRecommendations(report))
            .unwrap();

        assert!(md.contains("| 1 | Data Science | - | 1.67 | python | Matching tags: python |"));
        assert!(md.contains("**Candidates considered:** 4"));
        assert!(!md.contains("{{"));
    }

    #[test]
    fn test_gap_report_table() {
        let report = GapReport {
            student_id: StudentId(1),
            student_name: "Ada".to_string(),
            specialization_id: SpecializationId(1),
            specialization_name: "Backend".to_string(),
            analysis: GapAnalysis {
                skills: vec![SkillGap {
                    skill_id: SkillId(3),
                    skill_name: "SQL".to_string(),
                    current_level: 1,
                    required_level: 3,
                    gap: 2,
                    satisfied: false,
                }],
                considered: 3,
                satisfied: 2,
                completion_percentage: 200.0 / 3.0,
            },
        };
        let md = MarkdownReporter::new()
            .render(&AnalyticsReport::Gaps(report))
            .unwrap();

        assert!(md.contains("**Completion:** 66.67% (2 of 3 skills satisfied)"));
        assert!(md.contains("| SQL | 1 | 3 | 2 | ✗ |"));
    }

    #[test]
    fn test_no_active_minor() {
        let md = MarkdownReporter::new()
            .render(&AnalyticsReport::Orbit {
                student_id: StudentId(9),
                orbit: Orbit::NoActiveMinor,
            })
            .unwrap();
        assert_eq!(md, "# Orbit\n\nStudent 9 has no active minor.\n");
    }
}
