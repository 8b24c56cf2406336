//! Pure analytic operations over a [`CatalogStore`](crate::core::store::CatalogStore)
//!
//! Every function here reads its inputs and returns a value; nothing mutates
//! the store. Scores and percentages are unrounded, rounding belongs to the
//! renderers.

pub mod accrual;
pub mod gap;
pub mod orbit;
pub mod recommend;
pub mod resume;
pub mod similarity;
pub mod skill_tree;
pub mod tag_profile;
pub mod what_if;

pub use gap::{analyze_gaps, gap_analysis, GapAnalysis, GapReport, SkillGap};
pub use orbit::{orbit, Orbit, OrbitCourse, OrbitView, TargetSkill};
pub use recommend::{
    recommend_courses, recommend_minors, similar_minors, CourseRecommendation,
    CourseRecommendations, MinorRecommendation, MinorRecommendations,
};
pub use resume::{resume, ResumeView};
pub use similarity::{score, Similarity, NOVELTY_BONUS};
pub use skill_tree::{build_tree, validate_hierarchy, SkillTreeNode};
pub use tag_profile::{build_profile, TagProfile};
pub use what_if::{simulate, what_if, SkillComparison, WhatIfComparison, WhatIfReport};
