//! Minor and course recommendations
//!
//! Minors are ranked by tag-profile similarity; courses by the skill deficits
//! they cover. The two rankings use unrelated scales and are never mixed.

use super::gap::analyze_gaps;
use super::similarity::{self, Similarity};
use super::tag_profile::{minor_profile, student_profile, TagProfile};
use crate::core::error::Result;
use crate::core::models::{CourseId, Minor, MinorId, SkillId, SpecializationId, Student, StudentId};
use crate::core::store::CatalogStore;
use crate::debug;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Weight given to the current minor's profile when looking for alternatives
pub const INTENT_WEIGHT: f64 = 0.5;

const REASON_TAGS: usize = 3;
const SIMILAR_REASON_TAGS: usize = 2;
const MISSING_SKILLS_SHOWN: usize = 3;

/// A ranked minor with its explanation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinorRecommendation {
    /// Minor identifier
    pub minor_id: MinorId,
    /// Minor name
    pub minor_name: String,
    /// Minor description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minor type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_type: Option<String>,
    /// Unrounded similarity score
    pub score: f64,
    /// Tags shared with the student's profile
    pub matching_tags: Vec<String>,
    /// Human-readable explanation
    pub reason: String,
}

/// Top minors plus the number of candidates before truncation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinorRecommendations {
    /// Student
    pub student_id: StudentId,
    /// Ranked minors, best first
    pub recommendations: Vec<MinorRecommendation>,
    /// Candidates considered
    pub total_count: usize,
}

fn match_reason(tags: &[String]) -> String {
    if tags.is_empty() {
        return "A new direction to broaden your skills".to_string();
    }
    let shown = tags
        .iter()
        .take(REASON_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() > REASON_TAGS {
        format!("Matching tags: {shown} and {} more", tags.len() - REASON_TAGS)
    } else {
        format!("Matching tags: {shown}")
    }
}

fn similar_reason(tags: &[String]) -> String {
    if tags.is_empty() {
        "Alternative direction".to_string()
    } else {
        let shown: Vec<&str> = tags
            .iter()
            .take(SIMILAR_REASON_TAGS)
            .map(String::as_str)
            .collect();
        format!("Similar direction: {}", shown.join(", "))
    }
}

/// Active minors the student has not selected or completed
fn candidates<'a>(
    store: &'a impl CatalogStore,
    student: &Student,
    exclude: Option<MinorId>,
) -> Vec<&'a Minor> {
    let engaged = student.engaged_minor_ids();
    store
        .minors()
        .iter()
        .filter(|m| m.active && !engaged.contains(&m.id) && Some(m.id) != exclude)
        .collect()
}

fn rank(
    store: &impl CatalogStore,
    student_id: StudentId,
    reference: &TagProfile,
    minors: Vec<&Minor>,
    limit: usize,
    reason: fn(&[String]) -> String,
) -> MinorRecommendations {
    let mut ranked: Vec<MinorRecommendation> = minors
        .into_iter()
        .map(|minor| {
            // Candidate minor is the second argument: novelty is credited to it.
            let Similarity {
                score,
                matching_tags,
            } = similarity::score(reference, &minor_profile(minor, store));
            MinorRecommendation {
                minor_id: minor.id,
                minor_name: minor.name.clone(),
                description: minor.description.clone(),
                minor_type: minor.minor_type.clone(),
                score,
                reason: reason(&matching_tags),
                matching_tags,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.minor_id.cmp(&b.minor_id))
    });
    let total_count = ranked.len();
    ranked.truncate(limit);
    debug!(
        "Ranked {total_count} minors for student {student_id}, keeping {}",
        ranked.len()
    );

    MinorRecommendations {
        student_id,
        recommendations: ranked,
        total_count,
    }
}

/// Rank active minors against the student's completed-course profile
///
/// # Errors
/// Returns `NotFound` if the student does not exist.
pub fn recommend_minors(
    store: &impl CatalogStore,
    student_id: StudentId,
    limit: usize,
) -> Result<MinorRecommendations> {
    let student = store.require_student(student_id)?;
    let profile = student_profile(student, store);
    Ok(rank(
        store,
        student_id,
        &profile,
        candidates(store, student, None),
        limit,
        match_reason,
    ))
}

/// Alternatives to `current_minor` for a student thinking of switching
///
/// The reference profile is the student's own plus the current minor's at
/// [`INTENT_WEIGHT`]. The current minor itself is never suggested.
///
/// # Errors
/// Returns `NotFound` if the student or `current_minor` does not exist.
pub fn similar_minors(
    store: &impl CatalogStore,
    student_id: StudentId,
    current_minor: MinorId,
    limit: usize,
) -> Result<MinorRecommendations> {
    let student = store.require_student(student_id)?;
    let current = store.require_minor(current_minor)?;
    let combined = student_profile(student, store)
        .merge(&minor_profile(current, store).scaled(INTENT_WEIGHT));
    Ok(rank(
        store,
        student_id,
        &combined,
        candidates(store, student, Some(current_minor)),
        limit,
        similar_reason,
    ))
}

/// A course suggested to close skill deficits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecommendation {
    /// Course identifier
    pub course_id: CourseId,
    /// Course name
    pub course_name: String,
    /// Human-readable explanation
    pub reason: String,
    /// 1 when the course covers a deficit, otherwise 2
    pub priority: u8,
    /// Up to three deficit skills the course grants
    pub missing_skills: Vec<String>,
    /// Sum of the deficits of all granted deficit skills
    pub deficit_covered: u32,
}

/// Course suggestions within the student's specialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecommendations {
    /// Student
    pub student_id: StudentId,
    /// Student's specialization, if resolvable
    pub specialization_id: Option<SpecializationId>,
    /// Specialization name
    pub specialization_name: Option<String>,
    /// Suggestions, highest priority first
    pub recommended_courses: Vec<CourseRecommendation>,
}

/// Suggest uncompleted courses of the student's specialization
///
/// A student without a (known) specialization gets an empty list.
///
/// # Errors
/// Returns `NotFound` if the student does not exist.
pub fn recommend_courses(
    store: &impl CatalogStore,
    student_id: StudentId,
    limit: usize,
) -> Result<CourseRecommendations> {
    let student = store.require_student(student_id)?;
    let Some(spec) = student
        .specialization
        .and_then(|id| store.specialization(id))
    else {
        return Ok(CourseRecommendations {
            student_id,
            specialization_id: None,
            specialization_name: None,
            recommended_courses: Vec::new(),
        });
    };

    let deficits: BTreeMap<SkillId, (u32, String)> =
        analyze_gaps(&spec.requirement_map(), &student.skill_levels(), store)
            .skills
            .into_iter()
            .filter(|g| g.gap > 0)
            .map(|g| (g.skill_id, (g.gap, g.skill_name)))
            .collect();
    let completed = student.completed_course_ids();

    let mut recommended: Vec<CourseRecommendation> = store
        .courses()
        .iter()
        .filter(|c| c.specialization == Some(spec.id) && !completed.contains(&c.id))
        .map(|course| {
            let granted: BTreeSet<SkillId> = course
                .skills
                .iter()
                .map(|cs| cs.skill)
                .filter(|id| deficits.contains_key(id))
                .collect();
            let deficit_covered = granted.iter().map(|id| deficits[id].0).sum();
            let missing_skills: Vec<String> = granted
                .iter()
                .take(MISSING_SKILLS_SHOWN)
                .map(|id| deficits[id].1.clone())
                .collect();
            let (priority, reason) = if missing_skills.is_empty() {
                (2, "Recommended course for your specialization")
            } else {
                (1, "Covers a skill deficit")
            };
            CourseRecommendation {
                course_id: course.id,
                course_name: course.name.clone(),
                reason: reason.to_string(),
                priority,
                missing_skills,
                deficit_covered,
            }
        })
        .collect();

    recommended.sort_by_key(|r| (r.priority, Reverse(r.deficit_covered), r.course_id));
    recommended.truncate(limit);

    Ok(CourseRecommendations {
        student_id,
        specialization_id: Some(spec.id),
        specialization_name: Some(spec.name.clone()),
        recommended_courses: recommended,
    })
}
