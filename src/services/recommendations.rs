use std::collections::HashMap;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{RatingStore, Recommendation, RecommendationOutcome, SimilarityResult},
};

/// Per-item accumulator for the weighted aggregation
struct ItemAccumulator {
    item: String,
    weighted_total: f64,
    similarity_sum: f64,
}

/// Aggregates neighbors' ratings into a ranked recommendation list for `user`.
///
/// Each neighbor with positive similarity contributes, for every item the
/// target has not rated (absent key or the `0` sentinel):
///
///   weighted_total[item] += rating * similarity
///   similarity_sum[item] += similarity
///
/// summed across all contributing neighbors. The final score per item is
/// `weighted_total / similarity_sum`, so an item loved only by the closest
/// neighbors outranks one lukewarmly rated by many distant ones.
///
/// Neighbors with similarity <= 0 are skipped entirely; if nothing
/// qualifies the outcome is `NoCandidates` rather than an empty ranking.
pub fn recommend(
    store: &RatingStore,
    user: &str,
    neighbors: &[SimilarityResult],
) -> AppResult<RecommendationOutcome> {
    if !store.contains_user(user) {
        return Err(AppError::UnknownUser(user.to_string()));
    }

    // Validate every neighbor reference before aggregating anything, so an
    // unknown user never yields partial output
    for neighbor in neighbors {
        if !store.contains_user(&neighbor.user) {
            return Err(AppError::UnknownUser(neighbor.user.clone()));
        }
    }

    let start = Instant::now();

    // Accumulators keyed by item, in first-seen order for stable tie-breaks
    let mut accumulators: Vec<ItemAccumulator> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    let mut contributing = 0usize;
    for neighbor in neighbors {
        if neighbor.score <= 0.0 {
            continue;
        }
        contributing += 1;

        let ratings = store
            .ratings_of(&neighbor.user)
            .ok_or_else(|| AppError::UnknownUser(neighbor.user.clone()))?;

        for (item, &value) in ratings {
            if store.rating(user, item).is_rated() {
                continue;
            }

            let idx = *index_of.entry(item.clone()).or_insert_with(|| {
                accumulators.push(ItemAccumulator {
                    item: item.clone(),
                    weighted_total: 0.0,
                    similarity_sum: 0.0,
                });
                accumulators.len() - 1
            });

            accumulators[idx].weighted_total += value * neighbor.score;
            accumulators[idx].similarity_sum += neighbor.score;
        }
    }

    if accumulators.is_empty() {
        tracing::debug!(
            user = %user,
            neighbors = neighbors.len(),
            contributing,
            "No recommendation candidates"
        );
        return Ok(RecommendationOutcome::NoCandidates);
    }

    let mut ranked: Vec<Recommendation> = accumulators
        .into_iter()
        .map(|acc| Recommendation {
            item: acc.item,
            score: acc.weighted_total / acc.similarity_sum,
        })
        .collect();

    // Stable sort: exact score ties keep first-seen order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(
        user = %user,
        neighbors = neighbors.len(),
        contributing,
        candidates = ranked.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Recommendation aggregation completed"
    );

    Ok(RecommendationOutcome::Ranked(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(user: &str, score: f64) -> SimilarityResult {
        SimilarityResult {
            user: user.to_string(),
            score,
        }
    }

    fn test_store() -> RatingStore {
        RatingStore::from_json_str(
            r#"{
                "Alice": {"M1": 5.0, "M2": 3.0},
                "Bob":   {"M1": 5.0, "M2": 3.0, "M3": 4.0},
                "Carol": {"M1": 1.0, "M2": 1.0, "M3": 1.0},
                "Dave":  {"M3": 2.0, "M4": 8.0}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_single_neighbor_scenario() {
        // Bob's only item Alice hasn't rated is M3, weighted 4.0 * 1.0 / 1.0
        let store = test_store();
        let outcome = recommend(&store, "Alice", &[neighbor("Bob", 1.0)]).unwrap();

        match outcome {
            RecommendationOutcome::Ranked(ranked) => {
                assert_eq!(ranked.len(), 1);
                assert_eq!(ranked[0].item, "M3");
                assert_eq!(ranked[0].score, 4.0);
            }
            RecommendationOutcome::NoCandidates => panic!("expected a ranking"),
        }
    }

    #[test]
    fn test_accumulates_across_neighbors() {
        // The aggregation sums contributions per item (the collaborative
        // filtering formula), it does not keep only the last neighbor's
        let store = test_store();
        let outcome =
            recommend(&store, "Alice", &[neighbor("Bob", 1.0), neighbor("Dave", 0.5)]).unwrap();

        let RecommendationOutcome::Ranked(ranked) = outcome else {
            panic!("expected a ranking");
        };

        // M3: (4.0 * 1.0 + 2.0 * 0.5) / (1.0 + 0.5)
        let m3 = ranked.iter().find(|r| r.item == "M3").unwrap();
        assert_eq!(m3.score, 5.0 / 1.5);

        // M4 comes only from Dave: 8.0 * 0.5 / 0.5
        let m4 = ranked.iter().find(|r| r.item == "M4").unwrap();
        assert_eq!(m4.score, 8.0);
        assert_eq!(ranked[0].item, "M4");
    }

    #[test]
    fn test_never_proposes_items_already_rated() {
        let store = test_store();
        let outcome = recommend(&store, "Alice", &[neighbor("Bob", 1.0)]).unwrap();

        let RecommendationOutcome::Ranked(ranked) = outcome else {
            panic!("expected a ranking");
        };
        assert!(ranked.iter().all(|r| r.item != "M1" && r.item != "M2"));
    }

    #[test]
    fn test_zero_rated_item_is_a_candidate() {
        // Target stored M3 as 0, which means "unrated", so it still qualifies
        let store = RatingStore::from_json_str(
            r#"{
                "Alice": {"M1": 5.0, "M3": 0.0},
                "Bob":   {"M1": 5.0, "M3": 4.0}
            }"#,
        )
        .unwrap();

        let outcome = recommend(&store, "Alice", &[neighbor("Bob", 1.0)]).unwrap();
        let RecommendationOutcome::Ranked(ranked) = outcome else {
            panic!("expected a ranking");
        };
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item, "M3");
    }

    #[test]
    fn test_nonpositive_neighbors_contribute_nothing() {
        let store = test_store();
        let outcome =
            recommend(&store, "Alice", &[neighbor("Bob", 0.0), neighbor("Dave", -0.8)]).unwrap();
        assert_eq!(outcome, RecommendationOutcome::NoCandidates);
    }

    #[test]
    fn test_empty_neighbor_list() {
        let store = test_store();
        let outcome = recommend(&store, "Alice", &[]).unwrap();
        assert_eq!(outcome, RecommendationOutcome::NoCandidates);
    }

    #[test]
    fn test_score_ties_keep_first_seen_order() {
        // Both of Bob's unseen items carry the same rating, so their scores
        // tie exactly; the stable sort keeps neighbor-map iteration order
        let store = RatingStore::from_json_str(
            r#"{
                "Alice": {"M1": 5.0},
                "Bob":   {"M1": 5.0, "M2": 4.0, "M3": 4.0}
            }"#,
        )
        .unwrap();

        let outcome = recommend(&store, "Alice", &[neighbor("Bob", 1.0)]).unwrap();
        let RecommendationOutcome::Ranked(ranked) = outcome else {
            panic!("expected a ranking");
        };
        assert_eq!(ranked[0].item, "M2");
        assert_eq!(ranked[1].item, "M3");
    }

    #[test]
    fn test_unknown_target_errors() {
        let store = test_store();
        let err = recommend(&store, "Nobody", &[neighbor("Bob", 1.0)]).unwrap_err();
        assert!(matches!(err, AppError::UnknownUser(ref who) if who == "Nobody"));
    }

    #[test]
    fn test_unknown_neighbor_errors_even_when_skippable() {
        // The nonpositive neighbor would be skipped, but a dangling user
        // reference is still an error, never partial output
        let store = test_store();
        let err = recommend(&store, "Alice", &[neighbor("Ghost", -1.0)]).unwrap_err();
        assert!(matches!(err, AppError::UnknownUser(ref who) if who == "Ghost"));
    }
}
