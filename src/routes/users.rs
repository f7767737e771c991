use std::sync::Arc;

use axum::{extract::State, Json};

use crate::routes::AppState;

/// Handler listing every user known to the rating store
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let users: Vec<String> = state.store.users().map(str::to_string).collect();
    Json(users)
}
