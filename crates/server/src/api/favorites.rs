//! Favorites API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use cinescout_core::Movie;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub movie_id: i64,
    pub favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/favorites
///
/// List favorite movies in the order they were added.
pub async fn list_favorites(State(state): State<Arc<AppState>>) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        favorites: state.coordinator().favorites(),
    })
}

/// POST /api/v1/favorites/toggle
///
/// Toggle a movie's favorite status. The body carries the full movie so an
/// unseen movie can be favorited directly from search results.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Result<Json<ToggleResponse>, impl IntoResponse> {
    match state.coordinator().toggle_favorite(&movie) {
        Ok(favorite) => Ok(Json(ToggleResponse {
            movie_id: movie.id,
            favorite,
        })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
