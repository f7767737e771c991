use crate::{
    error::{AppError, AppResult},
    models::RatingStore,
};

/// Computes the Pearson correlation between two users' ratings, restricted
/// to the items both have in their rating maps.
///
/// Returns a coefficient in [-1.0, 1.0]. Two degenerate cases collapse to
/// 0.0 rather than erroring: an empty shared-item set, and zero variance in
/// either vector over the shared set (which would divide by zero).
///
/// The score is symmetric: `pearson_score(s, a, b) == pearson_score(s, b, a)`.
pub fn pearson_score(store: &RatingStore, user_a: &str, user_b: &str) -> AppResult<f64> {
    let ratings_a = store
        .ratings_of(user_a)
        .ok_or_else(|| AppError::UnknownUser(user_a.to_string()))?;
    let ratings_b = store
        .ratings_of(user_b)
        .ok_or_else(|| AppError::UnknownUser(user_b.to_string()))?;

    // Intersection by key presence; a stored 0 participates with value 0.0
    let shared: Vec<(f64, f64)> = ratings_a
        .iter()
        .filter_map(|(item, &a)| ratings_b.get(item).map(|&b| (a, b)))
        .collect();

    let n = shared.len() as f64;
    if shared.is_empty() {
        return Ok(0.0);
    }

    let sum_a: f64 = shared.iter().map(|(a, _)| a).sum();
    let sum_b: f64 = shared.iter().map(|(_, b)| b).sum();
    let sum_aa: f64 = shared.iter().map(|(a, _)| a * a).sum();
    let sum_bb: f64 = shared.iter().map(|(_, b)| b * b).sum();
    let sum_ab: f64 = shared.iter().map(|(a, b)| a * b).sum();

    let sxy = sum_ab - sum_a * sum_b / n;
    let sxx = sum_aa - sum_a * sum_a / n;
    let syy = sum_bb - sum_b * sum_b / n;

    // Exact-equality guard, not an epsilon: zero variance in either vector
    if sxx * syy == 0.0 {
        return Ok(0.0);
    }

    Ok(sxy / (sxx * syy).sqrt())
}
