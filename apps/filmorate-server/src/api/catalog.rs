//! MPA rating and genre endpoints.

use std::sync::Arc;

use axum::extract::State;
use entities::{Genre, GenreId, Mpa, MpaId};
use film_store::Store;

use crate::api::extract::{Json, Path};
use crate::error::ServerResult;
use crate::state::AppState;

/// Lists all MPA ratings.
pub async fn find_all_mpa<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Mpa>>> {
    Ok(Json(state.catalog.find_all_mpa().await?))
}

/// Gets an MPA rating by ID.
pub async fn find_mpa_by_id<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<MpaId>,
) -> ServerResult<Json<Mpa>> {
    Ok(Json(state.catalog.find_mpa_by_id(id).await?))
}

/// Lists all genres.
pub async fn find_all_genres<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Genre>>> {
    Ok(Json(state.catalog.find_all_genres().await?))
}

/// Gets a genre by ID.
pub async fn find_genre_by_id<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<GenreId>,
) -> ServerResult<Json<Genre>> {
    Ok(Json(state.catalog.find_genre_by_id(id).await?))
}
