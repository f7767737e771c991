use serde::{Deserialize, Serialize};

mod store;

pub use store::RatingStore;

/// A user's opinion of a single item.
///
/// The ratings document overloads `0` as "has not rated"; key absence means
/// the same thing. This enum makes that sentinel explicit so boundary values
/// cannot be mistaken for real ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    /// No opinion recorded (absent key or the `0` sentinel)
    Unrated,
    /// A real rating with a nonzero numeric value
    Rated(f64),
}

impl Rating {
    /// Classifies a raw value from the ratings document
    pub fn from_value(value: f64) -> Self {
        if value == 0.0 {
            Rating::Unrated
        } else {
            Rating::Rated(value)
        }
    }

    /// Returns true when a real rating is present
    pub fn is_rated(&self) -> bool {
        matches!(self, Rating::Rated(_))
    }
}

/// Another user paired with their Pearson similarity to the target user.
/// Scores fall in [-1.0, 1.0], with 0.0 doubling as "undefined" (no shared
/// items, or zero variance over the shared set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub user: String,
    pub score: f64,
}

/// A candidate item paired with its normalized recommendation score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: String,
    pub score: f64,
}

/// Result of recommendation aggregation.
///
/// "No candidates" is a distinct status rather than an empty list so callers
/// can tell "nothing qualified" apart from a degenerate ranking.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    /// Candidate items sorted by descending normalized score
    Ranked(Vec<Recommendation>),
    /// Every candidate neighbor had similarity <= 0, or contributed no items
    NoCandidates,
}
