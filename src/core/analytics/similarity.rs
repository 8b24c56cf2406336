//! Relevance scoring between two tag profiles

use super::tag_profile::TagProfile;
use serde::Serialize;

/// Bonus factor for tags only the candidate carries
pub const NOVELTY_BONUS: f64 = 0.3;

/// Score and explanation for one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Similarity {
    /// Unrounded relevance score
    pub score: f64,
    /// Tags present in both profiles, in tag-name order
    pub matching_tags: Vec<String>,
}

/// Score candidate profile `b` against reference profile `a`
///
/// Shared tags contribute `min(a, b)`. Tags only in `b` add
/// [`NOVELTY_BONUS`] times their weight; tags only in `a` add nothing, so the
/// score is not symmetric. Callers pass the student (or combined intent) as
/// `a` and the curriculum under consideration as `b`.
#[must_use]
pub fn score(a: &TagProfile, b: &TagProfile) -> Similarity {
    let mut total = 0.0;
    let mut matching_tags = Vec::new();

    for (tag, weight_b) in b.iter() {
        match a.get(tag) {
            Some(weight_a) => {
                total += weight_a.min(weight_b);
                matching_tags.push(tag.to_string());
            }
            None => total += NOVELTY_BONUS * weight_b,
        }
    }

    Similarity {
        score: total,
        matching_tags,
    }
}
