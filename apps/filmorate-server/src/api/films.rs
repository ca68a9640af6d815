//! Film API endpoints.

use std::sync::Arc;

use axum::extract::State;
use entities::{Film, FilmId, UserId, ValidationError};
use film_store::Store;
use serde::Deserialize;

use crate::api::extract::{Json, Path, Query};
use crate::error::ServerResult;
use crate::state::AppState;

/// Number of films returned by `/films/popular` when `count` is omitted.
pub const DEFAULT_POPULAR_COUNT: i64 = 10;

/// Query parameters for `/films/popular`.
#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

/// Lists all films.
pub async fn find_all<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Film>>> {
    Ok(Json(state.films.find_all().await?))
}

/// Creates a new film.
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(film): Json<Film>,
) -> ServerResult<Json<Film>> {
    Ok(Json(state.films.create(film).await?))
}

/// Replaces the film identified by the body's `id`.
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(film): Json<Film>,
) -> ServerResult<Json<Film>> {
    Ok(Json(state.films.update(film).await?))
}

/// Gets a film by ID.
pub async fn find_by_id<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<FilmId>,
) -> ServerResult<Json<Film>> {
    Ok(Json(state.films.find_film_by_id(id).await?))
}

/// Deletes a film.
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<FilmId>,
) -> ServerResult<()> {
    state.films.delete(id).await
}

/// Adds a user's like to a film.
pub async fn add_like<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, user_id)): Path<(FilmId, UserId)>,
) -> ServerResult<()> {
    state.films.add_like(user_id, id).await
}

/// Removes a user's like from a film.
pub async fn delete_like<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, user_id)): Path<(FilmId, UserId)>,
) -> ServerResult<()> {
    state.films.delete_like(user_id, id).await
}

/// Lists the most liked films.
pub async fn find_top_films<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<PopularQuery>,
) -> ServerResult<Json<Vec<Film>>> {
    let count = query.count.unwrap_or(DEFAULT_POPULAR_COUNT);
    let count = usize::try_from(count)
        .ok()
        .filter(|&c| c > 0)
        .ok_or(ValidationError::NonPositiveCount(count))?;

    Ok(Json(state.films.find_top_films(count).await?))
}
