//! Resume view: every skill and every minor a student has touched

use crate::core::error::Result;
use crate::core::models::{MinorStatus, SkillId, SkillSource, StudentId};
use crate::core::store::CatalogStore;
use crate::warn;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Skill count at which the "skills mastered" achievement is granted
pub const SKILLS_ACHIEVEMENT: usize = 10;
/// Course count at which the "courses completed" achievement is granted
pub const COURSES_ACHIEVEMENT: usize = 20;

/// Identity block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumePersonal {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Specialization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// One skill with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeSkill {
    /// Skill identifier
    pub skill_id: SkillId,
    /// Skill name
    pub name: String,
    /// Accumulated level
    pub level: u32,
    /// Core or orbit
    pub source: SkillSource,
    /// Minor marker for orbit skills, specialization name for core skills
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquired_from: Option<String>,
}

/// One entry of the minor history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeMinor {
    /// Minor name
    pub minor_name: String,
    /// Status of the history record
    pub status: MinorStatus,
    /// Names of the minor's target skills
    pub skills_gained: Vec<String>,
}

/// Course statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeEducation {
    /// Completed course count
    pub completed_courses: usize,
    /// Credits of completed courses
    pub total_credits: u32,
    /// Mean grade over graded completed courses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_grade: Option<f64>,
    /// Most recent completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Full resume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeView {
    /// Student
    pub student_id: StudentId,
    /// Identity block
    pub personal: ResumePersonal,
    /// Skills ordered by id
    pub skills: Vec<ResumeSkill>,
    /// Minor history in ledger order
    pub minors: Vec<ResumeMinor>,
    /// Course statistics
    pub education: ResumeEducation,
    /// Earned achievements
    pub achievements: Vec<String>,
}

/// Build the resume for a student
///
/// Skills are de-duplicated by id (highest level wins) and ordered by id.
/// Minors follow ledger order and include archived ones.
///
/// # Errors
/// Returns `NotFound` if the student does not exist.
pub fn resume(store: &impl CatalogStore, student_id: StudentId) -> Result<ResumeView> {
    let student = store.require_student(student_id)?;
    let specialization = student
        .specialization
        .and_then(|id| store.specialization(id))
        .map(|s| s.name.clone());

    let mut merged: BTreeMap<SkillId, (u32, Option<&str>)> = BTreeMap::new();
    for ss in &student.skills {
        let entry = merged
            .entry(ss.skill)
            .or_insert((ss.level, ss.acquired_from.as_deref()));
        if ss.level > entry.0 {
            *entry = (ss.level, ss.acquired_from.as_deref());
        }
    }

    let skills = merged
        .into_iter()
        .map(|(skill_id, (level, acquired_from))| {
            let source = SkillSource::from_acquired(acquired_from);
            let acquired_from = match source {
                SkillSource::Orbit => acquired_from.map(str::to_string),
                SkillSource::Core => specialization.clone(),
            };
            ResumeSkill {
                skill_id,
                name: store
                    .skill(skill_id)
                    .map_or_else(|| format!("skill #{skill_id}"), |s| s.name.clone()),
                level,
                source,
                acquired_from,
            }
        })
        .collect::<Vec<_>>();

    let minors = student
        .minor_history()
        .into_iter()
        .filter_map(|um| {
            let Some(minor) = store.minor(um.minor) else {
                warn!(
                    "Student {student_id} history references unknown minor {}",
                    um.minor
                );
                return None;
            };
            let skills_gained = minor
                .target_map()
                .keys()
                .filter_map(|&id| store.skill(id).map(|s| s.name.clone()))
                .collect();
            Some(ResumeMinor {
                minor_name: minor.name.clone(),
                status: um.status,
                skills_gained,
            })
        })
        .collect::<Vec<_>>();

    let completed: Vec<_> = student.completed_courses().collect();
    let total_credits = completed
        .iter()
        .filter_map(|r| store.course(r.course))
        .map(|c| c.credits)
        .sum();
    let grades: Vec<f64> = completed
        .iter()
        .filter_map(|r| r.grade.map(f64::from))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let average_grade =
        (!grades.is_empty()).then(|| grades.iter().sum::<f64>() / grades.len() as f64);
    let education = ResumeEducation {
        completed_courses: completed.len(),
        total_credits,
        average_grade,
        last_completed_at: completed.iter().filter_map(|r| r.completed_at).max(),
    };

    let earned = achievements(minors.len(), skills.len(), education.completed_courses);

    Ok(ResumeView {
        student_id,
        personal: ResumePersonal {
            name: student.name.clone(),
            email: student.email.clone(),
            specialization,
        },
        skills,
        minors,
        education,
        achievements: earned,
    })
}

fn achievements(minors: usize, skills: usize, courses: usize) -> Vec<String> {
    let mut list = Vec::new();
    if minors > 0 {
        list.push(format!("Explored {minors} additional tracks"));
    }
    if skills >= SKILLS_ACHIEVEMENT {
        list.push(format!("Mastered {skills} skills"));
    }
    if courses >= COURSES_ACHIEVEMENT {
        list.push(format!("Completed more than {COURSES_ACHIEVEMENT} courses"));
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_thresholds() {
        assert!(achievements(0, 9, 19).is_empty());
        assert_eq!(
            achievements(2, 10, 20),
            vec![
                "Explored 2 additional tracks".to_string(),
                "Mastered 10 skills".to_string(),
                "Completed more than 20 courses".to_string(),
            ]
        );
    }
}
