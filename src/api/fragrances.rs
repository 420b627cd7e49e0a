//! Fragrance price endpoints for the development server.
//!
//! Thin extractors over [`crate::services::catalog`]; the serverless entry
//! points call the same operations.

use axum::{
    body::Bytes,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::response::ApiResponse;
use crate::server::state::AppState;
use crate::services::catalog;

#[derive(Debug, Default, Deserialize)]
pub struct FragranceQuery {
    pub fragrance_name: Option<String>,
}

/// GET /fragrances?fragrance_name=...
pub async fn get_fragrance(
    State(state): State<AppState>,
    Query(query): Query<FragranceQuery>,
) -> ApiResponse {
    catalog::get_by_name(state.store.as_ref(), query.fragrance_name.as_deref()).await
}

/// GET /fragrances/all
pub async fn get_all_fragrances(State(state): State<AppState>) -> ApiResponse {
    catalog::get_all(state.store.as_ref()).await
}

/// POST /fragrances/seed
pub async fn seed_fragrances(State(state): State<AppState>) -> ApiResponse {
    catalog::seed(state.store.as_ref()).await
}

/// POST|PUT /fragrances
pub async fn update_fragrance(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    catalog::upsert(state.store.as_ref(), &body).await
}
