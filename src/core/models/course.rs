//! Course model

use super::{CourseId, SkillId, SpecializationId};
use serde::{Deserialize, Serialize};

/// Represents a course in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier
    pub id: CourseId,

    /// Course name (e.g., "Introduction to Python")
    pub name: String,

    /// Optional course description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Credits awarded on completion
    #[serde(default = "default_credits")]
    pub credits: u32,

    /// Recommended semester
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,

    /// Whether the course is an elective
    #[serde(default)]
    pub elective: bool,

    /// Owning specialization, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<SpecializationId>,

    /// Topic tags with centrality weights in [0, 3]
    #[serde(default)]
    pub tags: Vec<CourseTag>,

    /// Skills granted, per difficulty tier
    #[serde(default)]
    pub skills: Vec<CourseSkill>,
}

const fn default_credits() -> u32 {
    3
}

/// A weighted topic tag attached to a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTag {
    /// Tag name (e.g., "python")
    pub name: String,
    /// Centrality of the tag for the course, in [0, 3]
    pub weight: f64,
}

impl CourseTag {
    /// Highest allowed tag weight
    pub const MAX_WEIGHT: f64 = 3.0;

    /// Create a tag
    #[must_use]
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }

    /// Whether the weight lies in the accepted `[0, 3]` range
    #[must_use]
    pub fn has_valid_weight(&self) -> bool {
        (0.0..=Self::MAX_WEIGHT).contains(&self.weight)
    }
}

/// A skill granted by a course at a given difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSkill {
    /// Granted skill
    pub skill: SkillId,
    /// Difficulty tier (1 = base, 2 = advanced, ...)
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Skill units granted at this tier
    #[serde(default = "default_weight")]
    pub weight: u32,
}

const fn default_difficulty() -> u32 {
    1
}

const fn default_weight() -> u32 {
    1
}

impl Course {
    /// Create a new course with no tags or skills
    ///
    /// # Arguments
    /// * `id` - Course identifier
    /// * `name` - Full course name
    /// * `credits` - Credits awarded on completion
    #[must_use]
    pub const fn new(id: CourseId, name: String, credits: u32) -> Self {
        Self {
            id,
            name,
            description: None,
            credits,
            semester: None,
            elective: false,
            specialization: None,
            tags: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Attach a tag; a repeated tag name replaces the earlier weight
    pub fn add_tag(&mut self, name: &str, weight: f64) {
        if let Some(existing) = self.tags.iter_mut().find(|t| t.name == name) {
            existing.weight = weight;
        } else {
            self.tags.push(CourseTag::new(name, weight));
        }
    }

    /// Attach a granted skill at a difficulty tier
    pub fn add_skill(&mut self, skill: SkillId, difficulty: u32, weight: u32) {
        self.skills.push(CourseSkill {
            skill,
            difficulty,
            weight,
        });
    }

    /// Skills granted when the course is completed at `difficulty`
    pub fn skills_up_to(&self, difficulty: u32) -> impl Iterator<Item = &CourseSkill> {
        self.skills.iter().filter(move |cs| cs.difficulty <= difficulty)
    }
}
