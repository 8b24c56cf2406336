//! Typed identifiers
//!
//! Each entity gets its own newtype so a skill id can never be used to key a
//! course lookup by accident. All ids serialize as bare integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Skill identifier
    SkillId
);
entity_id!(
    /// Course identifier
    CourseId
);
entity_id!(
    /// Minor identifier
    MinorId
);
entity_id!(
    /// Specialization identifier
    SpecializationId
);
entity_id!(
    /// Student identifier
    StudentId
);
