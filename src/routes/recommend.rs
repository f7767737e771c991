use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Recommendation, RecommendationOutcome},
    routes::AppState,
    services::{neighbors, recommendations},
};

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    /// Number of neighbors feeding the aggregation; defaults from configuration
    pub neighbors: Option<usize>,
    /// Number of items per list in the response; defaults from configuration
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub user: String,
    /// True when no neighbor could contribute any candidate item
    pub no_candidates: bool,
    /// Highest-ranked unseen items, best first
    pub recommended: Vec<Recommendation>,
    /// Lowest-ranked unseen items, still in ranking order
    pub avoid: Vec<Recommendation>,
}

/// Handler for the recommendations endpoint.
///
/// Runs the full pipeline: top-K neighbor ranking, then weighted
/// aggregation. The response reports the tail of the ranking too, as an
/// "avoid" list.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user): Path<String>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<RecommendResponse>> {
    let k = params.neighbors.unwrap_or(state.config.default_neighbors);
    let count = params.count.unwrap_or(state.config.default_results);

    tracing::info!(
        request_id = %request_id,
        user = %user,
        neighbors = k,
        count,
        "Generating recommendations"
    );

    let similar = neighbors::find_similar(&state.store, &user, k)?;
    let outcome = recommendations::recommend(&state.store, &user, &similar)?;

    let response = match outcome {
        RecommendationOutcome::Ranked(ranked) => {
            let (recommended, avoid) = split_top_bottom(&ranked, count);
            RecommendResponse {
                user,
                no_candidates: false,
                recommended,
                avoid,
            }
        }
        RecommendationOutcome::NoCandidates => {
            tracing::info!(request_id = %request_id, "No recommendations available");
            RecommendResponse {
                user,
                no_candidates: true,
                recommended: Vec::new(),
                avoid: Vec::new(),
            }
        }
    };

    Ok(Json(response))
}

/// Splits a ranking into its head and tail without letting the two lists
/// overlap when the ranking is short
fn split_top_bottom(
    ranked: &[Recommendation],
    count: usize,
) -> (Vec<Recommendation>, Vec<Recommendation>) {
    let top: Vec<Recommendation> = ranked.iter().take(count).cloned().collect();
    let tail_start = ranked.len().saturating_sub(count).max(top.len());
    let bottom: Vec<Recommendation> = ranked[tail_start..].to_vec();
    (top, bottom)
}
