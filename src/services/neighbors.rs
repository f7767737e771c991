use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{RatingStore, SimilarityResult},
    services::similarity::pearson_score,
};

/// Ranks every other user in the store by Pearson similarity to `user` and
/// returns the top `k`.
///
/// Results are sorted by descending score with a stable sort, so exact ties
/// keep the store's lexicographic user order. `k` larger than the population
/// returns everyone; `k == 0` returns an empty list.
pub fn find_similar(store: &RatingStore, user: &str, k: usize) -> AppResult<Vec<SimilarityResult>> {
    if !store.contains_user(user) {
        return Err(AppError::UnknownUser(user.to_string()));
    }

    let start = Instant::now();

    let mut scores: Vec<SimilarityResult> = store
        .users()
        .filter(|&other| other != user)
        .map(|other| {
            pearson_score(store, user, other).map(|score| SimilarityResult {
                user: other.to_string(),
                score,
            })
        })
        .collect::<AppResult<_>>()?;

    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores.truncate(k);

    tracing::debug!(
        user = %user,
        k,
        returned = scores.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Neighbor ranking completed"
    );

    Ok(scores)
}
