//! User API endpoints.

use std::sync::Arc;

use axum::extract::State;
use entities::{User, UserId};
use film_store::Store;

use crate::api::extract::{Json, Path};
use crate::error::ServerResult;
use crate::state::AppState;

/// Lists all users.
pub async fn find_all<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<User>>> {
    Ok(Json(state.users.find_all().await?))
}

/// Creates a new user.
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(user): Json<User>,
) -> ServerResult<Json<User>> {
    Ok(Json(state.users.create(user).await?))
}

/// Replaces the user identified by the body's `id`.
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(user): Json<User>,
) -> ServerResult<Json<User>> {
    Ok(Json(state.users.update(user).await?))
}

/// Gets a user by ID.
pub async fn find_by_id<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<UserId>,
) -> ServerResult<Json<User>> {
    Ok(Json(state.users.get_user_by_id(id).await?))
}

/// Deletes a user.
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<UserId>,
) -> ServerResult<()> {
    state.users.delete(id).await
}

/// Sends a friend request.
pub async fn add_friend<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> ServerResult<()> {
    state.users.add_friend(id, friend_id).await
}

/// Removes a friend.
pub async fn delete_friend<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> ServerResult<()> {
    state.users.delete_friend(id, friend_id).await
}

/// Lists a user's friends.
pub async fn get_friends<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<UserId>,
) -> ServerResult<Json<Vec<User>>> {
    Ok(Json(state.users.get_friends_list(id).await?))
}

/// Lists the friends two users have in common.
pub async fn get_common_friends<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, other_id)): Path<(UserId, UserId)>,
) -> ServerResult<Json<Vec<User>>> {
    Ok(Json(state.users.get_common_friends(id, other_id).await?))
}
