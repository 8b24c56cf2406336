//! Skill-gap analysis against a required-skill map

use crate::core::error::{AnalyticsError, Result};
use crate::core::models::{RequirementMap, SkillId, SkillLevels, SpecializationId, StudentId};
use crate::core::store::{CatalogStore, SkillLookup};
use crate::warn;
use serde::Serialize;

/// Deficit for one required skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGap {
    /// Skill identifier
    pub skill_id: SkillId,
    /// Skill name from reference data
    pub skill_name: String,
    /// Student's level (0 when never acquired)
    pub current_level: u32,
    /// Level the requirement map asks for
    pub required_level: u32,
    /// `max(0, required - current)`
    pub gap: u32,
    /// `current >= required`
    pub satisfied: bool,
}

/// Per-skill deficits plus overall completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysis {
    /// Gaps, largest first; equal gaps keep skill-id order
    pub skills: Vec<SkillGap>,
    /// Requirements with a known skill
    pub considered: usize,
    /// Requirements already met
    pub satisfied: usize,
    /// `satisfied / considered * 100`, 0 when nothing was considered
    pub completion_percentage: f64,
}

/// Percentage of `part` in `whole`, 0 for an empty whole
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Compare current levels with a requirement map
///
/// Requirements naming a skill absent from reference data are skipped and do
/// not count toward the totals.
pub fn analyze_gaps(
    required: &RequirementMap,
    current: &SkillLevels,
    skills: &impl SkillLookup,
) -> GapAnalysis {
    let mut gaps = Vec::with_capacity(required.len());

    for (&skill_id, &required_level) in required {
        let Some(skill) = skills.skill(skill_id) else {
            warn!("Skipping requirement on unknown skill {skill_id}");
            continue;
        };
        let current_level = current.get(&skill_id).copied().unwrap_or(0);
        gaps.push(SkillGap {
            skill_id,
            skill_name: skill.name.clone(),
            current_level,
            required_level,
            gap: required_level.saturating_sub(current_level),
            satisfied: current_level >= required_level,
        });
    }

    // Stable sort keeps BTreeMap (skill id) order among equal gaps.
    gaps.sort_by(|a, b| b.gap.cmp(&a.gap));

    let considered = gaps.len();
    let satisfied = gaps.iter().filter(|g| g.satisfied).count();
    GapAnalysis {
        skills: gaps,
        considered,
        satisfied,
        completion_percentage: percentage(satisfied, considered),
    }
}

/// Gap analysis for one student, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapReport {
    /// Student analysed
    pub student_id: StudentId,
    /// Student name
    pub student_name: String,
    /// Target specialization
    pub specialization_id: SpecializationId,
    /// Target specialization name
    pub specialization_name: String,
    /// The analysis itself
    #[serde(flatten)]
    pub analysis: GapAnalysis,
}

/// Analyse a student against a specialization
///
/// An explicit `specialization` wins over the student's own one.
///
/// # Errors
/// Returns `NotFound` if the student is unknown, if neither an explicit nor a
/// student specialization exists, or if the resolved specialization is unknown.
pub fn gap_analysis(
    store: &impl CatalogStore,
    student_id: StudentId,
    specialization: Option<SpecializationId>,
) -> Result<GapReport> {
    let student = store.require_student(student_id)?;
    let spec_id = specialization.or(student.specialization).ok_or_else(|| {
        AnalyticsError::not_found("specialization", format!("for student {student_id}"))
    })?;
    let spec = store.require_specialization(spec_id)?;

    let analysis = analyze_gaps(&spec.requirement_map(), &student.skill_levels(), store);
    Ok(GapReport {
        student_id,
        student_name: student.name.clone(),
        specialization_id: spec.id,
        specialization_name: spec.name.clone(),
        analysis,
    })
}
