//! Report generation for analytics results
//!
//! Every analytic operation produces a plain data value. This module wraps
//! those values in [`AnalyticsReport`] and renders them as Markdown or JSON.
//! Floating point values are rounded to two decimals here and nowhere else.

pub mod formats;

use crate::core::analytics::{
    CourseRecommendations, GapReport, MinorRecommendations, Orbit, ResumeView, SkillTreeNode,
    WhatIfReport,
};
use crate::core::error::Result;
use crate::core::models::StudentId;
use std::fs;
use std::path::Path;

pub use formats::{JsonReporter, MarkdownReporter, ReportFormat};

/// Decimal places kept in rendered output
pub const DECIMALS: i32 = 2;

/// Round a value for presentation
#[must_use]
pub fn round2(value: f64) -> f64 {
    let factor = 10f64.powi(DECIMALS);
    (value * factor).round() / factor
}

/// A renderable analytics result
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsReport {
    /// Minors ranked for a student
    MinorRecommendations(MinorRecommendations),
    /// Courses ranked by the deficits they cover
    CourseRecommendations(CourseRecommendations),
    /// Skill gaps against a specialization
    Gaps(GapReport),
    /// Specialization switch simulation
    WhatIf(WhatIfReport),
    /// Progress through the selected minor
    Orbit {
        /// Student the view belongs to
        student_id: StudentId,
        /// Orbit outcome
        orbit: Orbit,
    },
    /// Aggregated resume
    Resume(ResumeView),
    /// Skill hierarchy
    SkillTree(Vec<SkillTreeNode>),
}

impl AnalyticsReport {
    /// Short name used in default output file names
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MinorRecommendations(_) => "minors",
            Self::CourseRecommendations(_) => "courses",
            Self::Gaps(_) => "gaps",
            Self::WhatIf(_) => "what_if",
            Self::Orbit { .. } => "orbit",
            Self::Resume(_) => "resume",
            Self::SkillTree(_) => "skills",
        }
    }

    /// Student the report is about, if any
    #[must_use]
    pub const fn student_id(&self) -> Option<StudentId> {
        match self {
            Self::MinorRecommendations(r) => Some(r.student_id),
            Self::CourseRecommendations(r) => Some(r.student_id),
            Self::Gaps(r) => Some(r.student_id),
            Self::WhatIf(r) => Some(r.student_id),
            Self::Orbit { student_id, .. } => Some(*student_id),
            Self::Resume(r) => Some(r.student_id),
            Self::SkillTree(_) => None,
        }
    }

    /// File stem for saving this report, e.g. `student_3_gaps`
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.student_id().map_or_else(
            || self.kind().to_string(),
            |id| format!("student_{id}_{}", self.kind()),
        )
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if the report cannot be serialized
    fn render(&self, report: &AnalyticsReport) -> Result<String>;

    /// Generate a report to a file, creating parent directories as needed
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, report: &AnalyticsReport, output_path: &Path) -> Result<()> {
        let content = self.render(report)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
