//! Orbit view: the currently selected minor's goals and course progress
//!
//! The view carries target levels only. A student's current skill levels are
//! never part of it.

use super::gap::percentage;
use crate::core::error::Result;
use crate::core::models::{CourseId, CourseTag, MinorId, SkillId, StudentId};
use crate::core::store::CatalogStore;
use crate::warn;
use serde::Serialize;

/// A skill the minor aims for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSkill {
    /// Skill identifier
    pub skill_id: SkillId,
    /// Skill name
    pub skill_name: String,
    /// Skill description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_description: Option<String>,
    /// Level the minor targets
    pub required_level: u32,
}

/// A member course annotated with the student's completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitCourse {
    /// Course identifier
    pub course_id: CourseId,
    /// Course name
    pub course_name: String,
    /// Credits
    pub credits: u32,
    /// Recommended semester
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
    /// Position within the minor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Required within the minor
    pub is_required: bool,
    /// Completed by this student
    pub is_completed: bool,
    /// Course tags
    pub tags: Vec<CourseTag>,
}

/// Goals and progress of the active minor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitView {
    /// Student
    pub student_id: StudentId,
    /// Selected minor
    pub minor_id: MinorId,
    /// Minor name
    pub minor_name: String,
    /// Minor description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_description: Option<String>,
    /// Minor type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_type: Option<String>,
    /// Target skills, ordered by skill id
    pub target_skills: Vec<TargetSkill>,
    /// Member courses in minor order
    pub courses: Vec<OrbitCourse>,
    /// Member courses found in the catalog
    pub total_courses: usize,
    /// Member courses the student completed
    pub completed_courses: usize,
    /// `completed / total * 100`, 0 for a minor without courses
    pub progress_percentage: f64,
}

/// Orbit outcome for a student
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Orbit {
    /// The student has a selected minor
    Active(OrbitView),
    /// No minor is currently selected
    NoActiveMinor,
}

/// Build the orbit view for a student
///
/// Target skills and member courses missing from reference data are left out.
///
/// # Errors
/// Returns `NotFound` if the student, or the minor their selection points at,
/// does not exist.
pub fn orbit(store: &impl CatalogStore, student_id: StudentId) -> Result<Orbit> {
    let student = store.require_student(student_id)?;
    let Some(selected) = student.selected_minor() else {
        return Ok(Orbit::NoActiveMinor);
    };
    let minor = store.require_minor(selected.minor)?;

    let target_skills = minor
        .target_map()
        .into_iter()
        .filter_map(|(skill_id, required_level)| {
            let Some(skill) = store.skill(skill_id) else {
                warn!("Minor {} targets unknown skill {skill_id}", minor.id);
                return None;
            };
            Some(TargetSkill {
                skill_id,
                skill_name: skill.name.clone(),
                skill_description: skill.description.clone(),
                required_level,
            })
        })
        .collect();

    let completed = student.completed_course_ids();
    let courses: Vec<OrbitCourse> = minor
        .ordered_courses()
        .into_iter()
        .filter_map(|mc| {
            let Some(course) = store.course(mc.course) else {
                warn!("Minor {} lists unknown course {}", minor.id, mc.course);
                return None;
            };
            Some(OrbitCourse {
                course_id: course.id,
                course_name: course.name.clone(),
                credits: course.credits,
                semester: course.semester,
                order: mc.order,
                is_required: mc.required,
                is_completed: completed.contains(&course.id),
                tags: course.tags.clone(),
            })
        })
        .collect();

    let total_courses = courses.len();
    let completed_courses = courses.iter().filter(|c| c.is_completed).count();

    Ok(Orbit::Active(OrbitView {
        student_id,
        minor_id: minor.id,
        minor_name: minor.name.clone(),
        minor_description: minor.description.clone(),
        minor_type: minor.minor_type.clone(),
        target_skills,
        courses,
        total_courses,
        completed_courses,
        progress_percentage: percentage(completed_courses, total_courses),
    }))
}
