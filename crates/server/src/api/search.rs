//! Search session API handlers.
//!
//! The search session is server-side state: starting a search or loading a
//! page returns the snapshot the session settled on, and the current
//! snapshot can be read back at any time.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use cinescout_core::SearchSnapshot;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/v1/search
///
/// Start a new search, superseding any search in flight. An empty term is
/// rejected up front; catalog failures are reported through the snapshot's
/// phase and error fields.
pub async fn start_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchSnapshot>, (StatusCode, Json<ErrorResponse>)> {
    if body.term.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "search term cannot be empty".to_string(),
            }),
        ));
    }

    let snapshot = state.coordinator().start_search(&body.term).await;
    Ok(Json(snapshot))
}

/// POST /api/v1/search/more
///
/// Fetch the next page for the current term. A no-op when a request is in
/// flight or the last page has been reached.
pub async fn load_more(State(state): State<Arc<AppState>>) -> Json<SearchSnapshot> {
    let snapshot = state.coordinator().load_more().await;
    Json(snapshot)
}

/// GET /api/v1/search
///
/// The current search snapshot.
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> Json<SearchSnapshot> {
    Json(state.coordinator().snapshot())
}
