use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::SimilarityResult,
    routes::AppState,
    services::neighbors,
};

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    /// Number of similar users to return; defaults from configuration
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub user: String,
    pub neighbors: Vec<SimilarityResult>,
}

/// Handler for the similar-users endpoint
pub async fn similar(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user): Path<String>,
    Query(params): Query<SimilarQuery>,
) -> AppResult<Json<SimilarResponse>> {
    let k = params.k.unwrap_or(state.config.default_neighbors);

    tracing::info!(
        request_id = %request_id,
        user = %user,
        k,
        "Ranking similar users"
    );

    let neighbors = neighbors::find_similar(&state.store, &user, k)?;

    Ok(Json(SimilarResponse { user, neighbors }))
}
