//! Minor model and the per-student minor history

use super::{CourseId, MinorId, RequirementMap, SkillRequirement};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supplementary curriculum track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minor {
    /// Minor identifier
    pub id: MinorId,

    /// Minor name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Kind of track (deepening, field change, soft skills, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_type: Option<String>,

    /// Inactive minors are never recommended
    #[serde(default = "default_active")]
    pub active: bool,

    /// Target skills a graduate of this minor should reach
    #[serde(default)]
    pub target_skills: Vec<SkillRequirement>,

    /// Member courses
    #[serde(default)]
    pub courses: Vec<MinorCourse>,
}

const fn default_active() -> bool {
    true
}

/// A course belonging to a minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorCourse {
    /// Member course
    pub course: CourseId,
    /// Suggested position within the minor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Required (true) or elective (false) within the minor
    #[serde(default = "default_active")]
    pub required: bool,
}

impl Minor {
    /// Create an active minor with no courses or targets
    #[must_use]
    pub const fn new(id: MinorId, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            minor_type: None,
            active: true,
            target_skills: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Target-skill map keyed by skill id
    #[must_use]
    pub fn target_map(&self) -> RequirementMap {
        SkillRequirement::to_map(&self.target_skills)
    }

    /// Member course ids
    pub fn course_ids(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.courses.iter().map(|mc| mc.course)
    }

    /// Member courses ordered by `order` (unordered last), then by course id
    #[must_use]
    pub fn ordered_courses(&self) -> Vec<MinorCourse> {
        let mut courses = self.courses.clone();
        courses.sort_by_key(|mc| (mc.order.is_none(), mc.order, mc.course));
        courses
    }

    /// Provenance marker written on skills gained from this minor
    #[must_use]
    pub fn provenance(&self) -> String {
        format!("minor_{}", self.name)
    }
}

/// Status of a student's minor record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinorStatus {
    /// The student's current minor (at most one)
    Selected,
    /// Finished; permanent history
    Completed,
    /// Replaced by a later selection; permanent history
    Archived,
}

impl MinorStatus {
    /// Allowed record transitions: selected -> archived | completed.
    /// Completed and archived are terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Selected, Self::Archived | Self::Completed)
        )
    }
}

impl fmt::Display for MinorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected => write!(f, "selected"),
            Self::Completed => write!(f, "completed"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// One entry of a student's minor history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMinor {
    /// The minor
    pub minor: MinorId,
    /// Current status of this record
    pub status: MinorStatus,
    /// Ledger sequence number; orders the history totally
    #[serde(default)]
    pub seq: u64,
}
