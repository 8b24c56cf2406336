//! Data models for `OrbitAnalytics`

pub mod course;
pub mod ids;
pub mod minor;
pub mod skill;
pub mod specialization;
pub mod student;

pub use course::{Course, CourseSkill, CourseTag};
pub use ids::{CourseId, MinorId, SkillId, SpecializationId, StudentId};
pub use minor::{Minor, MinorCourse, MinorStatus, UserMinor};
pub use skill::{RequirementMap, Skill, SkillLevels, SkillRequirement, SkillSource, StudentSkill};
pub use specialization::Specialization;
pub use student::{CourseRecord, CourseStatus, Student};
