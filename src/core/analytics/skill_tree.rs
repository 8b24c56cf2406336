//! Skill hierarchy: validation and tree building

use crate::core::error::{AnalyticsError, Result};
use crate::core::models::{Skill, SkillId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A skill with its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTreeNode {
    /// Skill identifier
    pub id: SkillId,
    /// Skill name
    pub name: String,
    /// Depth in the hierarchy
    pub level: u32,
    /// Child skills, ordered by id
    pub children: Vec<SkillTreeNode>,
}

impl SkillTreeNode {
    /// Number of skills in this subtree, including the node itself
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }
}

/// Check the hierarchy invariants
///
/// Parents must exist, parent chains must not loop, roots sit at level 0 and
/// every child sits exactly one level below its parent.
///
/// # Errors
/// Returns [`AnalyticsError::InvalidSnapshot`] naming the first offending skill.
pub fn validate_hierarchy(skills: &[Skill]) -> Result<()> {
    let by_id: HashMap<SkillId, &Skill> = skills.iter().map(|s| (s.id, s)).collect();

    for skill in skills {
        let mut seen = HashSet::from([skill.id]);
        let mut cursor = skill.parent;
        while let Some(parent_id) = cursor {
            if !seen.insert(parent_id) {
                return Err(AnalyticsError::InvalidSnapshot(format!(
                    "skill {} is part of a parent cycle",
                    skill.id
                )));
            }
            cursor = by_id.get(&parent_id).and_then(|p| p.parent);
        }

        match skill.parent {
            None if skill.level != 0 => {
                return Err(AnalyticsError::InvalidSnapshot(format!(
                    "root skill {} has level {}, expected 0",
                    skill.id, skill.level
                )));
            }
            None => {}
            Some(parent_id) => {
                let parent = by_id.get(&parent_id).ok_or_else(|| {
                    AnalyticsError::InvalidSnapshot(format!(
                        "skill {} references missing parent {parent_id}",
                        skill.id
                    ))
                })?;
                let expected = parent.level.checked_add(1).ok_or_else(|| {
                    AnalyticsError::InvalidSnapshot(format!(
                        "skill {} has parent {parent_id} at maximum level",
                        skill.id
                    ))
                })?;
                if skill.level != expected {
                    return Err(AnalyticsError::InvalidSnapshot(format!(
                        "skill {} has level {}, expected {expected}",
                        skill.id, skill.level
                    )));
                }
            }
        }
    }
    Ok(())
}

type ChildIndex<'a> = BTreeMap<Option<SkillId>, Vec<&'a Skill>>;

fn attach(skill: &Skill, children: &ChildIndex<'_>) -> SkillTreeNode {
    SkillTreeNode {
        id: skill.id,
        name: skill.name.clone(),
        level: skill.level,
        children: children
            .get(&Some(skill.id))
            .map(|kids| kids.iter().map(|k| attach(k, children)).collect())
            .unwrap_or_default(),
    }
}

/// Arrange skills into trees rooted at parentless skills
#[must_use]
pub fn build_tree(skills: &[Skill]) -> Vec<SkillTreeNode> {
    let mut children = ChildIndex::new();
    for skill in skills {
        children.entry(skill.parent).or_default().push(skill);
    }
    for list in children.values_mut() {
        list.sort_by_key(|s| s.id);
    }

    children
        .get(&None)
        .map(|roots| roots.iter().map(|r| attach(r, &children)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> Vec<Skill> {
        let programming = Skill::new(SkillId(1), "Programming".to_string());
        let python = Skill::child_of(SkillId(3), "Python".to_string(), &programming);
        let rust = Skill::child_of(SkillId(2), "Rust".to_string(), &programming);
        let pandas = Skill::child_of(SkillId(4), "Pandas".to_string(), &python);
        let math = Skill::new(SkillId(5), "Mathematics".to_string());
        vec![pandas, programming, python, rust, math]
    }

    #[test]
    fn test_valid_hierarchy() {
        assert!(validate_hierarchy(&hierarchy()).is_ok());
    }

    #[test]
    fn test_cycle_rejected() {
        let mut a = Skill::new(SkillId(1), "A".to_string());
        let mut b = Skill::new(SkillId(2), "B".to_string());
        a.parent = Some(SkillId(2));
        a.level = 1;
        b.parent = Some(SkillId(1));
        b.level = 1;

        let err = validate_hierarchy(&[a, b]).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_wrong_level_rejected() {
        let root = Skill::new(SkillId(1), "Root".to_string());
        let mut child = Skill::child_of(SkillId(2), "Child".to_string(), &root);
        child.level = 2;
        assert!(validate_hierarchy(&[root, child]).is_err());
    }

    #[test]
    fn test_parent_at_maximum_level_rejected() {
        let mut child = Skill::new(SkillId(2), "Child".to_string());
        child.parent = Some(SkillId(1));
        let mut root = Skill::new(SkillId(1), "Root".to_string());
        root.level = u32::MAX;

        let err = validate_hierarchy(&[child, root]).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSnapshot(_)));
        assert!(err.to_string().contains("maximum level"));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut orphan = Skill::new(SkillId(2), "Orphan".to_string());
        orphan.parent = Some(SkillId(9));
        orphan.level = 1;
        let err = validate_hierarchy(&[orphan]).unwrap_err();
        assert!(err.to_string().contains("missing parent 9"));
    }

    #[test]
    fn test_build_tree_orders_children() {
        let tree = build_tree(&hierarchy());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Programming");
        let kids: Vec<&str> = tree[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(kids, vec!["Rust", "Python"]);
        assert_eq!(tree[0].children[1].children[0].name, "Pandas");
        assert_eq!(tree[0].size(), 4);
        assert_eq!(tree[1].size(), 1);
    }
}
