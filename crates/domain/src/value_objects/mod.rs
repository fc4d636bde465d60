//! Value objects - Immutable objects defined by their attributes

mod attributes;
mod dice;
mod difficulty_rating;
mod hit_points;

pub use attributes::{AttributeSet, SkillState};
pub use dice::{roll, DiceFormula, DiceOperator, RollOutcome, MAX_DICE};
pub use difficulty_rating::DifficultyRating;
pub use hit_points::HitPoints;
