//! Specialization model

use super::{RequirementMap, SkillId, SkillRequirement, SpecializationId};
use serde::{Deserialize, Serialize};

/// A primary study track with a required-skill map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    /// Specialization identifier
    pub id: SpecializationId,

    /// Specialization name (e.g., "Data Science")
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Program length in years
    #[serde(default = "default_duration")]
    pub duration_years: u32,

    /// Required skills; no ordering among them
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
}

const fn default_duration() -> u32 {
    2
}

impl Specialization {
    /// Create a specialization with no requirements
    #[must_use]
    pub const fn new(id: SpecializationId, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            duration_years: default_duration(),
            required_skills: Vec::new(),
        }
    }

    /// Required-skill map keyed by skill id
    #[must_use]
    pub fn requirement_map(&self) -> RequirementMap {
        SkillRequirement::to_map(&self.required_skills)
    }

    /// Add a requirement
    pub fn require(&mut self, skill: SkillId, level: u32) {
        self.required_skills.push(SkillRequirement { skill, level });
    }
}
