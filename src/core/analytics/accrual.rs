//! Skill accrual after completion events
//!
//! These functions compute the new `StudentSkill` rows; applying them to a
//! store is the caller's job. Levels only ever go up.

use crate::core::models::{Course, Minor, StudentSkill};

/// Marker fragment of provenance that a minor may take over
const CORE_MARKER: &str = "core";

/// Skills after completing `course` at `difficulty`
///
/// Every granted skill with a tier at or below `difficulty` adds its weight to
/// the student's level. New rows are tagged `course_<id>`.
#[must_use]
pub fn accrue_course_completion(
    skills: &[StudentSkill],
    course: &Course,
    difficulty: u32,
) -> Vec<StudentSkill> {
    let mut next = skills.to_vec();
    for granted in course.skills_up_to(difficulty) {
        if let Some(existing) = next.iter_mut().find(|ss| ss.skill == granted.skill) {
            existing.level = existing.level.saturating_add(granted.weight);
        } else {
            next.push(StudentSkill {
                skill: granted.skill,
                level: granted.weight,
                acquired_from: Some(format!("course_{}", course.id)),
            });
        }
    }
    next
}

/// Skills after completing `minor`
///
/// Each target skill is raised to at least its target level. Provenance moves
/// to the minor when it was empty or core-derived.
#[must_use]
pub fn accrue_minor_completion(skills: &[StudentSkill], minor: &Minor) -> Vec<StudentSkill> {
    let mut next = skills.to_vec();
    let provenance = minor.provenance();

    for (skill, target) in minor.target_map() {
        if let Some(existing) = next.iter_mut().find(|ss| ss.skill == skill) {
            existing.level = existing.level.max(target);
            let takes_over = existing
                .acquired_from
                .as_deref()
                .map_or(true, |from| from.contains(CORE_MARKER));
            if takes_over {
                existing.acquired_from = Some(provenance.clone());
            }
        } else {
            next.push(StudentSkill {
                skill,
                level: target,
                acquired_from: Some(provenance.clone()),
            });
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseId, MinorId, SkillId, SkillRequirement};

    fn row(skill: u32, level: u32, from: Option<&str>) -> StudentSkill {
        StudentSkill {
            skill: SkillId(skill),
            level,
            acquired_from: from.map(str::to_string),
        }
    }

    #[test]
    fn test_course_completion_adds_tier_weights() {
        let mut course = Course::new(CourseId(7), "Databases".to_string(), 4);
        course.add_skill(SkillId(1), 1, 1);
        course.add_skill(SkillId(1), 2, 1);
        course.add_skill(SkillId(2), 3, 2);

        let skills = accrue_course_completion(&[row(1, 1, Some("course_3"))], &course, 2);

        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].level, 3);
        assert_eq!(skills[0].acquired_from.as_deref(), Some("course_3"));

        let advanced = accrue_course_completion(&[], &course, 3);
        assert_eq!(advanced.len(), 2);
        assert_eq!(advanced[1], row(2, 2, Some("course_7")));
    }

    #[test]
    fn test_minor_completion_never_lowers_levels() {
        let mut minor = Minor::new(MinorId(3), "Data Science".to_string());
        minor.target_skills = vec![
            SkillRequirement {
                skill: SkillId(1),
                level: 2,
            },
            SkillRequirement {
                skill: SkillId(2),
                level: 3,
            },
            SkillRequirement {
                skill: SkillId(4),
                level: 1,
            },
        ];
        let current = [row(1, 5, Some("course_2")), row(2, 1, None)];

        let skills = accrue_minor_completion(&current, &minor);

        assert_eq!(skills[0], row(1, 5, Some("course_2")));
        assert_eq!(skills[1], row(2, 3, Some("minor_Data Science")));
        assert_eq!(skills[2], row(4, 1, Some("minor_Data Science")));
    }

    #[test]
    fn test_minor_takes_over_core_provenance() {
        let mut minor = Minor::new(MinorId(1), "Cloud".to_string());
        minor.target_skills = vec![SkillRequirement {
            skill: SkillId(9),
            level: 1,
        }];

        let skills = accrue_minor_completion(&[row(9, 2, Some("core_backend"))], &minor);
        assert_eq!(skills[0].acquired_from.as_deref(), Some("minor_Cloud"));
        assert_eq!(skills[0].level, 2);
    }
}
