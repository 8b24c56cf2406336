//! Weighted tag profiles for students and curriculum units

use crate::core::models::{CourseId, Minor, SpecializationId, Student};
use crate::core::store::{CatalogStore, TagSource};
use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated relevance per topic tag
///
/// Keys are unique and iteration is in tag-name order, so anything derived
/// from a profile is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagProfile(BTreeMap<String, f64>);

impl TagProfile {
    /// Empty profile
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of a tag, if present
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<f64> {
        self.0.get(tag).copied()
    }

    /// Whether the tag is present
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    /// Add `weight` to a tag's accumulated value
    pub fn add(&mut self, tag: &str, weight: f64) {
        *self.0.entry(tag.to_string()).or_insert(0.0) += weight;
    }

    /// Tags and weights in tag-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(tag, &w)| (tag.as_str(), w))
    }

    /// Number of distinct tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the profile has no tags
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Component-wise sum of two profiles
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        for (tag, weight) in other.iter() {
            self.add(tag, weight);
        }
        self
    }

    /// Every weight multiplied by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(tag, &w)| (tag.clone(), w * factor))
                .collect(),
        )
    }
}

impl<'a> FromIterator<(&'a str, f64)> for TagProfile {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut profile = Self::new();
        for (tag, weight) in iter {
            profile.add(tag, weight);
        }
        profile
    }
}

/// Sum tag weights over a set of courses
///
/// A tag attached to several input courses accumulates all of their weights.
/// Unknown courses contribute nothing.
pub fn build_profile<I>(course_ids: I, tags: &impl TagSource) -> TagProfile
where
    I: IntoIterator<Item = CourseId>,
{
    course_ids
        .into_iter()
        .flat_map(|id| tags.course_tags(id))
        .map(|tag| (tag.name.as_str(), tag.weight))
        .collect()
}

/// Profile of a student's completed courses
pub fn student_profile(student: &Student, tags: &impl TagSource) -> TagProfile {
    build_profile(student.completed_course_ids(), tags)
}

/// Profile of a minor's member courses
pub fn minor_profile(minor: &Minor, tags: &impl TagSource) -> TagProfile {
    build_profile(minor.course_ids(), tags)
}

/// Profile of the courses owned by a specialization
pub fn specialization_profile(id: SpecializationId, store: &impl CatalogStore) -> TagProfile {
    let owned: Vec<CourseId> = store
        .courses()
        .iter()
        .filter(|c| c.specialization == Some(id))
        .map(|c| c.id)
        .collect();
    build_profile(owned, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseTag;

    fn tag_table() -> BTreeMap<CourseId, Vec<CourseTag>> {
        let mut table = BTreeMap::new();
        table.insert(
            CourseId(1),
            vec![CourseTag::new("python", 1.0), CourseTag::new("sql", 2.0)],
        );
        table.insert(CourseId(2), vec![CourseTag::new("python", 2.0)]);
        table.insert(CourseId(3), vec![CourseTag::new("python", 0.5)]);
        table
    }

    #[test]
    fn test_weights_accumulate_across_courses() {
        let profile = build_profile([CourseId(1), CourseId(2), CourseId(3)], &tag_table());

        assert_eq!(profile.len(), 2);
        assert!((profile.get("python").unwrap() - 3.5).abs() < 1e-9);
        assert!((profile.get("sql").unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_gives_empty_profile() {
        let profile = build_profile(Vec::new(), &tag_table());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_unknown_course_contributes_nothing() {
        let profile = build_profile([CourseId(42)], &tag_table());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_profile_of_union_is_merge_of_parts() {
        let table = tag_table();
        let whole = build_profile([CourseId(1), CourseId(2), CourseId(3)], &table);
        let parts = build_profile([CourseId(1)], &table)
            .merge(&build_profile([CourseId(2), CourseId(3)], &table));

        assert_eq!(whole.len(), parts.len());
        for (tag, weight) in whole.iter() {
            let other = parts.get(tag).unwrap();
            assert!((weight - other).abs() < 1e-9, "{tag}: {weight} vs {other}");
        }
    }

    #[test]
    fn test_merge_and_scale() {
        let a: TagProfile = [("ml", 2.0), ("python", 1.0)].into_iter().collect();
        let b: TagProfile = [("ml", 4.0)].into_iter().collect();

        let combined = a.merge(&b.scaled(0.5));
        assert!((combined.get("ml").unwrap() - 4.0).abs() < 1e-9);
        assert!((combined.get("python").unwrap() - 1.0).abs() < 1e-9);
    }
}
