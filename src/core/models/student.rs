//! Student model: course history, accumulated skills and minor history

use super::{
    CourseId, MinorId, MinorStatus, SkillLevels, SpecializationId, StudentId, StudentSkill,
    UserMinor,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Status of a course enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Enrolled, not started
    Enrolled,
    /// Under way
    InProgress,
    /// Finished
    Completed,
    /// Withdrawn
    Dropped,
}

/// A student's enrollment in a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// The course
    pub course: CourseId,
    /// Enrollment status
    pub status: CourseStatus,
    /// Difficulty tier chosen by the student
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Final grade, when completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u32>,
    /// Completion timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

const fn default_difficulty() -> u32 {
    1
}

impl CourseRecord {
    /// A completed course record at base difficulty
    #[must_use]
    pub const fn completed(course: CourseId) -> Self {
        Self {
            course,
            status: CourseStatus::Completed,
            difficulty: 1,
            grade: None,
            completed_at: None,
        }
    }
}

/// A read-only view of one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student identifier
    pub id: StudentId,

    /// Full name
    pub name: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Chosen specialization, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<SpecializationId>,

    /// Enrollment history
    #[serde(default)]
    pub courses: Vec<CourseRecord>,

    /// Accumulated skills
    #[serde(default)]
    pub skills: Vec<StudentSkill>,

    /// Minor history (selected, completed, archived)
    #[serde(default)]
    pub minors: Vec<UserMinor>,
}

impl Student {
    /// Create a student with an empty history
    #[must_use]
    pub const fn new(id: StudentId, name: String) -> Self {
        Self {
            id,
            name,
            email: String::new(),
            specialization: None,
            courses: Vec::new(),
            skills: Vec::new(),
            minors: Vec::new(),
        }
    }

    /// Ids of completed courses
    #[must_use]
    pub fn completed_course_ids(&self) -> BTreeSet<CourseId> {
        self.completed_courses().map(|r| r.course).collect()
    }

    /// Completed course records
    pub fn completed_courses(&self) -> impl Iterator<Item = &CourseRecord> {
        self.courses
            .iter()
            .filter(|r| r.status == CourseStatus::Completed)
    }

    /// Current level per skill; duplicated rows keep the highest level
    #[must_use]
    pub fn skill_levels(&self) -> SkillLevels {
        let mut levels = SkillLevels::new();
        for ss in &self.skills {
            let entry = levels.entry(ss.skill).or_insert(ss.level);
            *entry = (*entry).max(ss.level);
        }
        levels
    }

    /// The currently selected minor record, if any
    #[must_use]
    pub fn selected_minor(&self) -> Option<&UserMinor> {
        self.minors
            .iter()
            .find(|um| um.status == MinorStatus::Selected)
    }

    /// Minors the student has selected or completed (excluded from recommendations)
    #[must_use]
    pub fn engaged_minor_ids(&self) -> BTreeSet<MinorId> {
        self.minors
            .iter()
            .filter(|um| matches!(um.status, MinorStatus::Selected | MinorStatus::Completed))
            .map(|um| um.minor)
            .collect()
    }

    /// Minor history in ledger order
    #[must_use]
    pub fn minor_history(&self) -> Vec<UserMinor> {
        let mut history = self.minors.clone();
        history.sort_by_key(|um| (um.seq, um.minor));
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SkillId;

    fn record(course: u32, status: CourseStatus) -> CourseRecord {
        CourseRecord {
            course: CourseId(course),
            status,
            difficulty: 1,
            grade: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_completed_course_ids_ignore_other_statuses() {
        let mut student = Student::new(StudentId(1), "Ada".to_string());
        student.courses = vec![
            record(1, CourseStatus::Completed),
            record(2, CourseStatus::Enrolled),
            record(3, CourseStatus::Dropped),
            record(4, CourseStatus::Completed),
        ];

        let ids: Vec<CourseId> = student.completed_course_ids().into_iter().collect();
        assert_eq!(ids, vec![CourseId(1), CourseId(4)]);
    }

    #[test]
    fn test_skill_levels_collapse_duplicates() {
        let mut student = Student::new(StudentId(1), "Ada".to_string());
        student.skills = vec![
            StudentSkill {
                skill: SkillId(1),
                level: 2,
                acquired_from: None,
            },
            StudentSkill {
                skill: SkillId(1),
                level: 5,
                acquired_from: None,
            },
        ];

        assert_eq!(student.skill_levels()[&SkillId(1)], 5);
    }

    #[test]
    fn test_selected_and_engaged_minors() {
        let mut student = Student::new(StudentId(1), "Ada".to_string());
        student.minors = vec![
            UserMinor {
                minor: MinorId(1),
                status: MinorStatus::Archived,
                seq: 1,
            },
            UserMinor {
                minor: MinorId(2),
                status: MinorStatus::Completed,
                seq: 2,
            },
            UserMinor {
                minor: MinorId(3),
                status: MinorStatus::Selected,
                seq: 3,
            },
        ];

        assert_eq!(student.selected_minor().map(|um| um.minor), Some(MinorId(3)));
        let engaged: Vec<MinorId> = student.engaged_minor_ids().into_iter().collect();
        assert_eq!(engaged, vec![MinorId(2), MinorId(3)]);
    }

    #[test]
    fn test_course_status_serializes_snake_case() {
        let json = serde_json::to_string(&CourseStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
