//! What-if simulation of a specialization switch

use super::gap::{analyze_gaps, percentage};
use crate::core::error::Result;
use crate::core::models::{RequirementMap, SkillId, SkillLevels, SpecializationId, StudentId};
use crate::core::store::{CatalogStore, SkillLookup};
use crate::warn;
use serde::Serialize;
use std::collections::BTreeSet;

/// How one skill fares under the old and new requirement maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillComparison {
    /// Skill identifier
    pub skill_id: SkillId,
    /// Skill name
    pub skill_name: String,
    /// Student's level
    pub current_level: u32,
    /// Required by the current specialization (0 if not required)
    pub old_required_level: u32,
    /// Required by the new specialization (0 if not required)
    pub new_required_level: u32,
    /// Whether the current level meets the new requirement
    pub will_satisfy: bool,
}

/// Pure comparison of two requirement maps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfComparison {
    /// One entry per skill in either map, ordered by skill id
    pub skills: Vec<SkillComparison>,
    /// Completion against the current map
    pub current_completion_percentage: f64,
    /// Completion against the new map
    pub new_completion_percentage: f64,
}

/// Compare current levels against an old and a new requirement map
///
/// `old` is empty for a student without a specialization. Skills unknown to
/// reference data are left out of both the comparison and the percentages.
pub fn simulate(
    current: &SkillLevels,
    old: &RequirementMap,
    new: &RequirementMap,
    skills: &impl SkillLookup,
) -> WhatIfComparison {
    let union: BTreeSet<SkillId> = old.keys().chain(new.keys()).copied().collect();

    let mut comparison = Vec::with_capacity(union.len());
    for skill_id in union {
        let Some(skill) = skills.skill(skill_id) else {
            warn!("Skipping comparison for unknown skill {skill_id}");
            continue;
        };
        let current_level = current.get(&skill_id).copied().unwrap_or(0);
        let new_required_level = new.get(&skill_id).copied().unwrap_or(0);
        comparison.push(SkillComparison {
            skill_id,
            skill_name: skill.name.clone(),
            current_level,
            old_required_level: old.get(&skill_id).copied().unwrap_or(0),
            new_required_level,
            will_satisfy: new_required_level == 0 || current_level >= new_required_level,
        });
    }

    let new_considered: Vec<&SkillComparison> = comparison
        .iter()
        .filter(|c| c.new_required_level > 0)
        .collect();
    let new_satisfied = new_considered.iter().filter(|c| c.will_satisfy).count();

    WhatIfComparison {
        current_completion_percentage: analyze_gaps(old, current, skills).completion_percentage,
        new_completion_percentage: percentage(new_satisfied, new_considered.len()),
        skills: comparison,
    }
}

/// What-if report for one student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfReport {
    /// Student analysed
    pub student_id: StudentId,
    /// Student name
    pub student_name: String,
    /// Current specialization, if any
    pub current_specialization_id: Option<SpecializationId>,
    /// Current specialization name, if any
    pub current_specialization_name: Option<String>,
    /// Hypothetical specialization
    pub new_specialization_id: SpecializationId,
    /// Hypothetical specialization name
    pub new_specialization_name: String,
    /// Per-skill comparison and completion percentages
    #[serde(flatten)]
    pub comparison: WhatIfComparison,
    /// Completed courses that remain counted after the switch
    pub courses_to_keep: usize,
    /// All completed courses
    pub total_completed_courses: usize,
}

/// Simulate switching a student to `new_specialization`
///
/// Completed courses are never invalidated by a switch, so `courses_to_keep`
/// always equals `total_completed_courses`.
///
/// # Errors
/// Returns `NotFound` if the student or the target specialization is unknown.
pub fn what_if(
    store: &impl CatalogStore,
    student_id: StudentId,
    new_specialization: SpecializationId,
) -> Result<WhatIfReport> {
    let student = store.require_student(student_id)?;
    let target = store.require_specialization(new_specialization)?;
    let current = student
        .specialization
        .and_then(|id| store.specialization(id));

    let old_map = current.map(|s| s.requirement_map()).unwrap_or_default();
    let comparison = simulate(
        &student.skill_levels(),
        &old_map,
        &target.requirement_map(),
        store,
    );
    let completed = student.completed_courses().count();

    Ok(WhatIfReport {
        student_id,
        student_name: student.name.clone(),
        current_specialization_id: current.map(|s| s.id),
        current_specialization_name: current.map(|s| s.name.clone()),
        new_specialization_id: target.id,
        new_specialization_name: target.name.clone(),
        comparison,
        courses_to_keep: completed,
        total_completed_courses: completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Skill;
    use std::collections::BTreeMap;

    fn catalog(ids: &[u32]) -> BTreeMap<SkillId, Skill> {
        ids.iter()
            .map(|&id| (SkillId(id), Skill::new(SkillId(id), format!("skill{id}"))))
            .collect()
    }

    fn map(entries: &[(u32, u32)]) -> BTreeMap<SkillId, u32> {
        entries.iter().map(|&(s, l)| (SkillId(s), l)).collect()
    }

    #[test]
    fn test_union_lists_each_skill_once() {
        let old = map(&[(1, 2), (2, 1)]);
        let new = map(&[(2, 3), (3, 1)]);
        let result = simulate(&map(&[(2, 1)]), &old, &new, &catalog(&[1, 2, 3]));

        let ids: Vec<u32> = result.skills.iter().map(|c| c.skill_id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let only_old = &result.skills[0];
        assert_eq!(only_old.new_required_level, 0);
        assert!(only_old.will_satisfy);

        let only_new = &result.skills[2];
        assert_eq!(only_new.old_required_level, 0);
        assert!(!only_new.will_satisfy);
    }

    #[test]
    fn test_completion_percentages() {
        let old = map(&[(1, 1), (2, 1)]);
        let new = map(&[(1, 1), (3, 2), (4, 0)]);
        let current = map(&[(1, 1)]);
        let result = simulate(&current, &old, &new, &catalog(&[1, 2, 3, 4]));

        assert!((result.current_completion_percentage - 50.0).abs() < 1e-9);
        assert!((result.new_completion_percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_fresh_start_baseline() {
        let result = simulate(
            &SkillLevels::new(),
            &RequirementMap::new(),
            &map(&[(1, 1)]),
            &catalog(&[1]),
        );
        assert!(result.current_completion_percentage.abs() < f64::EPSILON);
        assert!(result.new_completion_percentage.abs() < f64::EPSILON);
        assert_eq!(result.skills.len(), 1);
    }
}
