//! Read-only store seam for the analytics core
//!
//! The core never touches persistence directly. Surrounding services hand it
//! something implementing [`CatalogStore`]; the bundled implementation is the
//! TOML-backed [`Snapshot`].

pub mod snapshot;

pub use snapshot::Snapshot;

use crate::core::error::{AnalyticsError, Result};
use crate::core::models::{
    Course, CourseId, CourseTag, Minor, MinorId, Skill, SkillId, Specialization, SpecializationId,
    Student, StudentId,
};
use std::collections::BTreeMap;

/// Source of course tags for profile building
pub trait TagSource {
    /// Tags attached to a course; empty for unknown courses
    fn course_tags(&self, course: CourseId) -> &[CourseTag];
}

/// Skill reference data lookup
pub trait SkillLookup {
    /// Resolve a skill by id
    fn skill(&self, id: SkillId) -> Option<&Skill>;
}

/// Read-only view over reference data and student records
pub trait CatalogStore: TagSource + SkillLookup {
    /// All skills
    fn skills(&self) -> &[Skill];

    /// Resolve a course by id
    fn course(&self, id: CourseId) -> Option<&Course>;

    /// All courses
    fn courses(&self) -> &[Course];

    /// Resolve a specialization by id
    fn specialization(&self, id: SpecializationId) -> Option<&Specialization>;

    /// Resolve a minor by id
    fn minor(&self, id: MinorId) -> Option<&Minor>;

    /// All minors
    fn minors(&self) -> &[Minor];

    /// Resolve a student by id
    fn student(&self, id: StudentId) -> Option<&Student>;

    /// Resolve a student or fail with `NotFound`
    ///
    /// # Errors
    /// Returns [`AnalyticsError::NotFound`] if the student does not exist.
    fn require_student(&self, id: StudentId) -> Result<&Student> {
        self.student(id)
            .ok_or_else(|| AnalyticsError::not_found("student", id))
    }

    /// Resolve a specialization or fail with `NotFound`
    ///
    /// # Errors
    /// Returns [`AnalyticsError::NotFound`] if the specialization does not exist.
    fn require_specialization(&self, id: SpecializationId) -> Result<&Specialization> {
        self.specialization(id)
            .ok_or_else(|| AnalyticsError::not_found("specialization", id))
    }

    /// Resolve a course or fail with `NotFound`
    ///
    /// # Errors
    /// Returns [`AnalyticsError::NotFound`] if the course does not exist.
    fn require_course(&self, id: CourseId) -> Result<&Course> {
        self.course(id)
            .ok_or_else(|| AnalyticsError::not_found("course", id))
    }

    /// Resolve a minor or fail with `NotFound`
    ///
    /// # Errors
    /// Returns [`AnalyticsError::NotFound`] if the minor does not exist.
    fn require_minor(&self, id: MinorId) -> Result<&Minor> {
        self.minor(id)
            .ok_or_else(|| AnalyticsError::not_found("minor", id))
    }
}

impl TagSource for BTreeMap<CourseId, Vec<CourseTag>> {
    fn course_tags(&self, course: CourseId) -> &[CourseTag] {
        self.get(&course).map_or(&[], Vec::as_slice)
    }
}

impl SkillLookup for BTreeMap<SkillId, Skill> {
    fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.get(&id)
    }
}
