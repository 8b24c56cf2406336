//! Skill model

use super::SkillId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Required level per skill (a specialization's or minor's requirement map)
pub type RequirementMap = BTreeMap<SkillId, u32>;

/// Current level per skill for one student
pub type SkillLevels = BTreeMap<SkillId, u32>;

/// A node in the skill hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill identifier
    pub id: SkillId,

    /// Skill name (e.g., "Python")
    pub name: String,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent skill; `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<SkillId>,

    /// Depth in the hierarchy (roots are 0)
    #[serde(default)]
    pub level: u32,
}

impl Skill {
    /// Create a root skill
    #[must_use]
    pub const fn new(id: SkillId, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            parent: None,
            level: 0,
        }
    }

    /// Create a child skill one level below its parent
    #[must_use]
    pub const fn child_of(id: SkillId, name: String, parent: &Self) -> Self {
        Self {
            id,
            name,
            description: None,
            parent: Some(parent.id),
            level: parent.level + 1,
        }
    }
}

/// One entry of a requirement map as stored in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    /// Required skill
    pub skill: SkillId,
    /// Required level
    pub level: u32,
}

impl SkillRequirement {
    /// Collapse a list of requirements into a map; duplicated skills keep the highest level
    #[must_use]
    pub fn to_map(requirements: &[Self]) -> RequirementMap {
        let mut map = RequirementMap::new();
        for req in requirements {
            let entry = map.entry(req.skill).or_insert(req.level);
            *entry = (*entry).max(req.level);
        }
        map
    }
}

/// A skill a student has accumulated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSkill {
    /// Skill identifier
    pub skill: SkillId,

    /// Accumulated level (running sum of granted weights)
    pub level: u32,

    /// Provenance marker (e.g., `course_12`, `minor_Data Science`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquired_from: Option<String>,
}

/// Where a skill on the resume came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillSource {
    /// Primary specialization (course work)
    Core,
    /// A minor ("orbit")
    Orbit,
}

impl SkillSource {
    /// Marker substring identifying minor-derived provenance
    pub const MINOR_MARKER: &'static str = "minor_";

    /// Classify a provenance marker
    #[must_use]
    pub fn from_acquired(acquired_from: Option<&str>) -> Self {
        match acquired_from {
            Some(marker) if marker.contains(Self::MINOR_MARKER) => Self::Orbit,
            _ => Self::Core,
        }
    }
}

impl fmt::Display for SkillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Orbit => write!(f, "orbit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_level_follows_parent() {
        let root = Skill::new(SkillId(1), "Programming".to_string());
        let child = Skill::child_of(SkillId(2), "Python".to_string(), &root);

        assert_eq!(child.parent, Some(SkillId(1)));
        assert_eq!(child.level, 1);
    }

    #[test]
    fn test_requirement_map_keeps_highest_duplicate() {
        let reqs = [
            SkillRequirement {
                skill: SkillId(3),
                level: 1,
            },
            SkillRequirement {
                skill: SkillId(3),
                level: 2,
            },
            SkillRequirement {
                skill: SkillId(1),
                level: 3,
            },
        ];

        let map = SkillRequirement::to_map(&reqs);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&SkillId(3)], 2);
        assert_eq!(map[&SkillId(1)], 3);
    }

    #[test]
    fn test_skill_source_from_marker() {
        assert_eq!(SkillSource::from_acquired(None), SkillSource::Core);
        assert_eq!(
            SkillSource::from_acquired(Some("course_4")),
            SkillSource::Core
        );
        assert_eq!(
            SkillSource::from_acquired(Some("minor_Data Science")),
            SkillSource::Orbit
        );
        assert_eq!(SkillSource::Orbit.to_string(), "orbit");
    }
}
