//! TOML-backed snapshot of reference data and student records
//!
//! A snapshot file looks like:
//! ```toml
//! [[skills]]
//! id = 1
//! name = "Programming"
//!
//! [[courses]]
//! id = 10
//! name = "Introduction to Python"
//! tags = [{ name = "python", weight = 3.0 }]
//! skills = [{ skill = 1, difficulty = 1, weight = 2 }]
//!
//! [[students]]
//! id = 1
//! name = "Ada"
//! courses = [{ course = 10, status = "completed" }]
//! ```
//! Timestamps are RFC 3339 strings.

use super::{CatalogStore, SkillLookup, TagSource};
use crate::core::analytics::{accrual, skill_tree};
use crate::core::error::{AnalyticsError, Result};
use crate::core::models::{
    Course, CourseId, CourseRecord, CourseStatus, CourseTag, Minor, MinorId, MinorStatus, Skill,
    SkillId, Specialization, SpecializationId, Student, StudentId, UserMinor,
};
use crate::core::selection::{self, MinorEvent};
use crate::{debug, info};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::hash::Hash;
use std::path::Path;

/// Position of each entity in its table
#[derive(Debug, Clone, Default)]
struct SnapshotIndex {
    skills: HashMap<SkillId, usize>,
    courses: HashMap<CourseId, usize>,
    specializations: HashMap<SpecializationId, usize>,
    minors: HashMap<MinorId, usize>,
    students: HashMap<StudentId, usize>,
}

/// In-memory snapshot of everything the analytics core reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Skill hierarchy
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Course catalog with tags and granted skills
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Specializations with required-skill maps
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    /// Minor definitions
    #[serde(default)]
    pub minors: Vec<Minor>,
    /// Student records
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(skip)]
    index: SnapshotIndex,
}

fn index_by<T, K: Eq + Hash + std::fmt::Display>(
    table: &'static str,
    rows: &[T],
    key: impl Fn(&T) -> K,
) -> Result<HashMap<K, usize>> {
    let mut index = HashMap::with_capacity(rows.len());
    for (pos, row) in rows.iter().enumerate() {
        let id = key(row);
        if index.contains_key(&id) {
            return Err(AnalyticsError::InvalidSnapshot(format!(
                "duplicate {table} id {id}"
            )));
        }
        index.insert(id, pos);
    }
    Ok(index)
}

impl Snapshot {
    /// Build a snapshot from its tables, indexing and validating it
    ///
    /// # Errors
    /// Returns [`AnalyticsError::InvalidSnapshot`] on duplicate ids or broken invariants.
    pub fn from_parts(
        skills: Vec<Skill>,
        courses: Vec<Course>,
        specializations: Vec<Specialization>,
        minors: Vec<Minor>,
        students: Vec<Student>,
    ) -> Result<Self> {
        let mut snapshot = Self {
            skills,
            courses,
            specializations,
            minors,
            students,
            index: SnapshotIndex::default(),
        };
        snapshot.reindex()?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse a snapshot from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or the data violates an invariant.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let mut snapshot: Self = toml::from_str(toml_str)?;
        snapshot.reindex()?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Load a snapshot file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_toml(&content)?;
        info!(
            "Snapshot loaded from {} ({} students, {} courses, {} minors)",
            path.display(),
            snapshot.students.len(),
            snapshot.courses.len(),
            snapshot.minors.len()
        );
        Ok(snapshot)
    }

    /// Serialize the snapshot to TOML
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the snapshot to a file, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        debug!("Snapshot written to {}", path.display());
        Ok(())
    }

    /// Rebuild the id lookup index after editing the tables directly
    ///
    /// # Errors
    /// Returns [`AnalyticsError::InvalidSnapshot`] on duplicate ids.
    pub fn reindex(&mut self) -> Result<()> {
        self.index = SnapshotIndex {
            skills: index_by("skill", &self.skills, |s| s.id)?,
            courses: index_by("course", &self.courses, |c| c.id)?,
            specializations: index_by("specialization", &self.specializations, |s| s.id)?,
            minors: index_by("minor", &self.minors, |m| m.id)?,
            students: index_by("student", &self.students, |s| s.id)?,
        };
        Ok(())
    }

    /// Check reference-data invariants
    ///
    /// Stale skill references inside requirement maps are tolerated here; the
    /// analyzers skip them.
    ///
    /// # Errors
    /// Returns [`AnalyticsError::InvalidSnapshot`] when the skill hierarchy is
    /// broken, a tag weight is out of range, a minor lists a course twice, or
    /// a student has more than one selected minor.
    pub fn validate(&self) -> Result<()> {
        skill_tree::validate_hierarchy(&self.skills)?;

        for course in &self.courses {
            if let Some(tag) = course.tags.iter().find(|t| !t.has_valid_weight()) {
                return Err(AnalyticsError::InvalidSnapshot(format!(
                    "course {} tag '{}' has weight {} outside [0, {}]",
                    course.id,
                    tag.name,
                    tag.weight,
                    CourseTag::MAX_WEIGHT
                )));
            }
        }

        for minor in &self.minors {
            let mut seen = HashSet::with_capacity(minor.courses.len());
            if let Some(dup) = minor.course_ids().find(|id| !seen.insert(*id)) {
                return Err(AnalyticsError::InvalidSnapshot(format!(
                    "minor {} lists course {dup} more than once",
                    minor.id
                )));
            }
        }

        for student in &self.students {
            let selected = student
                .minors
                .iter()
                .filter(|um| um.status == MinorStatus::Selected)
                .count();
            if selected > 1 {
                return Err(AnalyticsError::InvalidSnapshot(format!(
                    "student {} has {selected} selected minors",
                    student.id
                )));
            }
        }
        Ok(())
    }

    /// Mutable access to a student record
    pub fn student_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        let pos = *self.index.students.get(&id)?;
        self.students.get_mut(pos)
    }

    fn next_minor_seq(&self) -> u64 {
        self.students
            .iter()
            .flat_map(|s| s.minors.iter().map(|um| um.seq))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Apply a minor selection/completion event to a student's history
    ///
    /// Archiving the previous selection and recording the new one happen in a
    /// single step under the exclusive borrow.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown student or minor and
    /// `InvalidTransition` when the event is not allowed.
    pub fn apply_minor_event(
        &mut self,
        student_id: StudentId,
        event: MinorEvent,
    ) -> Result<UserMinor> {
        self.require_minor(event.minor())?;
        let seq = self.next_minor_seq();
        let student = self
            .student_mut(student_id)
            .ok_or_else(|| AnalyticsError::not_found("student", student_id))?;

        let outcome = selection::transition(&student.minors, event, seq)?;
        student.minors = outcome.history;
        info!("Student {student_id}: {event} -> {}", outcome.record.status);
        Ok(outcome.record)
    }

    /// Raise a student's skills to a completed minor's targets
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown student or minor.
    pub fn apply_minor_completion_skills(
        &mut self,
        student_id: StudentId,
        minor_id: MinorId,
    ) -> Result<()> {
        let minor = self.require_minor(minor_id)?.clone();
        let student = self
            .student_mut(student_id)
            .ok_or_else(|| AnalyticsError::not_found("student", student_id))?;
        student.skills = accrual::accrue_minor_completion(&student.skills, &minor);
        Ok(())
    }

    /// Mark an enrolled or in-progress course as completed
    ///
    /// Skills the course grants up to the record's difficulty are accrued.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown student or course, or when the
    /// student has no open enrollment in the course.
    pub fn complete_course(
        &mut self,
        student_id: StudentId,
        course_id: CourseId,
        grade: Option<u32>,
        at: DateTime<Utc>,
    ) -> Result<CourseRecord> {
        let course = self.require_course(course_id)?.clone();
        let student = self
            .student_mut(student_id)
            .ok_or_else(|| AnalyticsError::not_found("student", student_id))?;

        let record = student
            .courses
            .iter_mut()
            .find(|r| {
                r.course == course_id
                    && matches!(r.status, CourseStatus::Enrolled | CourseStatus::InProgress)
            })
            .ok_or_else(|| {
                AnalyticsError::not_found(
                    "enrollment",
                    format!("{course_id} for student {student_id}"),
                )
            })?;
        record.status = CourseStatus::Completed;
        record.grade = grade;
        record.completed_at = Some(at);
        let completed = record.clone();

        student.skills =
            accrual::accrue_course_completion(&student.skills, &course, completed.difficulty);
        info!("Student {student_id} completed course {course_id}");
        Ok(completed)
    }
}

impl TagSource for Snapshot {
    fn course_tags(&self, course: CourseId) -> &[CourseTag] {
        self.course(course).map_or(&[], |c| c.tags.as_slice())
    }
}

impl SkillLookup for Snapshot {
    fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.index.skills.get(&id).map(|&pos| &self.skills[pos])
    }
}

impl CatalogStore for Snapshot {
    fn skills(&self) -> &[Skill] {
        &self.skills
    }

    fn course(&self, id: CourseId) -> Option<&Course> {
        self.index.courses.get(&id).map(|&pos| &self.courses[pos])
    }

    fn courses(&self) -> &[Course] {
        &self.courses
    }

    fn specialization(&self, id: SpecializationId) -> Option<&Specialization> {
        self.index
            .specializations
            .get(&id)
            .map(|&pos| &self.specializations[pos])
    }

    fn minor(&self, id: MinorId) -> Option<&Minor> {
        self.index.minors.get(&id).map(|&pos| &self.minors[pos])
    }

    fn minors(&self) -> &[Minor] {
        &self.minors
    }

    fn student(&self, id: StudentId) -> Option<&Student> {
        self.index.students.get(&id).map(|&pos| &self.students[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[skills]]
id = 1
name = "Programming"

[[skills]]
id = 2
name = "Python"
parent = 1
level = 1

[[courses]]
id = 10
name = "Introduction to Python"
credits = 4
tags = [{ name = "python", weight = 3.0 }, { name = "programming", weight = 2.0 }]
skills = [{ skill = 2, difficulty = 1, weight = 2 }]

[[specializations]]
id = 1
name = "Data Science"
required_skills = [{ skill = 2, level = 3 }]

[[minors]]
id = 5
name = "ML Engineering"
courses = [{ course = 10, order = 1 }]

[[students]]
id = 1
name = "Ada"
email = "ada@example.edu"
specialization = 1
courses = [{ course = 10, status = "completed", completed_at = "2024-05-01T10:00:00Z" }]
skills = [{ skill = 2, level = 2, acquired_from = "course_10" }]
"#;

    #[test]
    fn test_parse_and_lookup() {
        let snapshot = Snapshot::from_toml(SAMPLE).expect("sample should parse");

        assert_eq!(snapshot.skill(SkillId(2)).map(|s| s.name.as_str()), Some("Python"));
        assert_eq!(snapshot.course_tags(CourseId(10)).len(), 2);
        assert!(snapshot.course_tags(CourseId(99)).is_empty());
        assert!(snapshot.minor(MinorId(5)).is_some_and(|m| m.active));
        assert_eq!(
            snapshot
                .student(StudentId(1))
                .and_then(|s| s.specialization),
            Some(SpecializationId(1))
        );
        assert!(snapshot.require_specialization(SpecializationId(9)).is_err());
    }

    #[test]
    fn test_toml_round_trip_preserves_data() {
        let snapshot = Snapshot::from_toml(SAMPLE).unwrap();
        let reparsed = Snapshot::from_toml(&snapshot.to_toml().unwrap()).unwrap();

        assert_eq!(reparsed.students, snapshot.students);
        assert_eq!(reparsed.courses, snapshot.courses);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml_str = r#"
[[skills]]
id = 1
name = "A"

[[skills]]
id = 1
name = "B"
"#;
        let err = Snapshot::from_toml(toml_str).unwrap_err();
        assert!(err.to_string().contains("duplicate skill id 1"));
    }

    #[test]
    fn test_duplicate_minor_course_rejected() {
        let toml_str = SAMPLE.replace(
            "courses = [{ course = 10, order = 1 }]",
            "courses = [{ course = 10, order = 1 }, { course = 10, order = 2 }]",
        );
        let err = Snapshot::from_toml(&toml_str).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSnapshot(_)));
        assert!(err.to_string().contains("minor 5 lists course 10 more than once"));
    }

    #[test]
    fn test_reindex_sees_new_rows() {
        let mut snapshot = Snapshot::from_toml(SAMPLE).unwrap();
        snapshot
            .students
            .push(Student::new(StudentId(2), "Grace".to_string()));
        assert!(snapshot.student(StudentId(2)).is_none());

        snapshot.reindex().unwrap();
        assert_eq!(
            snapshot.student(StudentId(2)).map(|s| s.name.as_str()),
            Some("Grace")
        );

        snapshot
            .students
            .push(Student::new(StudentId(2), "Again".to_string()));
        assert!(snapshot.reindex().is_err());
    }

    #[test]
    fn test_out_of_range_tag_rejected() {
        let toml_str = r#"
[[courses]]
id = 1
name = "Heavy"
tags = [{ name = "x", weight = 4.0 }]
"#;
        assert!(matches!(
            Snapshot::from_toml(toml_str),
            Err(AnalyticsError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_two_selected_minors_rejected() {
        let toml_str = r#"
[[minors]]
id = 1
name = "A"

[[minors]]
id = 2
name = "B"

[[students]]
id = 1
name = "Ada"
minors = [{ minor = 1, status = "selected", seq = 1 }, { minor = 2, status = "selected", seq = 2 }]
"#;
        assert!(Snapshot::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_apply_minor_event_requires_known_minor() {
        let mut snapshot = Snapshot::from_toml(SAMPLE).unwrap();
        let err = snapshot
            .apply_minor_event(StudentId(1), MinorEvent::Select(MinorId(77)))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_complete_course_accrues_skills() {
        let toml_str = SAMPLE.replace(
            r#"status = "completed", completed_at = "2024-05-01T10:00:00Z""#,
            r#"status = "in_progress""#,
        );
        let mut snapshot = Snapshot::from_toml(&toml_str).unwrap();
        let at = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let record = snapshot
            .complete_course(StudentId(1), CourseId(10), Some(91), at)
            .unwrap();

        assert_eq!(record.status, CourseStatus::Completed);
        assert_eq!(record.grade, Some(91));
        assert_eq!(record.completed_at, Some(at));
        let student = snapshot.student(StudentId(1)).unwrap();
        assert_eq!(student.skills[0].level, 4);
        assert!(student.completed_course_ids().contains(&CourseId(10)));
    }

    #[test]
    fn test_complete_course_requires_open_enrollment() {
        let mut snapshot = Snapshot::from_toml(SAMPLE).unwrap();
        let err = snapshot
            .complete_course(StudentId(1), CourseId(10), None, Utc::now())
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("enrollment"));
    }

    #[test]
    fn test_apply_minor_event_records_selection() {
        let mut snapshot = Snapshot::from_toml(SAMPLE).unwrap();
        let record = snapshot
            .apply_minor_event(StudentId(1), MinorEvent::Select(MinorId(5)))
            .unwrap();

        assert_eq!(record.status, MinorStatus::Selected);
        assert_eq!(record.seq, 1);
        assert_eq!(
            snapshot
                .student(StudentId(1))
                .and_then(Student::selected_minor)
                .map(|um| um.minor),
            Some(MinorId(5))
        );
    }
}
