//! User operations: CRUD and friendships.

use std::{collections::BTreeSet, sync::Arc};

use entities::{User, UserId, ValidationError, validate_user};
use film_store::Store;

use super::validated;
use crate::error::{ServerError, ServerResult};

/// Service for managing users and friendships.
pub struct UserService<S> {
    store: Arc<S>,
}

impl<S: Store> UserService<S> {
    /// Creates a new user service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists all users.
    pub async fn find_all(&self) -> ServerResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    /// Validates and stores a new user. A blank name is replaced by the login.
    pub async fn create(&self, mut user: User) -> ServerResult<User> {
        validated(validate_user(&mut user))?;

        let user = self.store.create_user(user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Validates and replaces an existing user.
    pub async fn update(&self, mut user: User) -> ServerResult<User> {
        validated(validate_user(&mut user))?;
        self.ensure_user(user.id).await?;

        let user = self.store.update_user(user).await?;
        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Deletes a user along with their likes and friendships.
    pub async fn delete(&self, id: UserId) -> ServerResult<()> {
        self.ensure_user(id).await?;
        self.store.delete_user(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Sends a friend request from `user_id` to `friend_id`, confirming the
    /// friendship if the request was already reciprocated.
    pub async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> ServerResult<()> {
        self.ensure_user(user_id).await?;
        self.ensure_user(friend_id).await?;
        if user_id == friend_id {
            validated(Err(ValidationError::SelfFriendship(user_id)))?;
        }

        let status = self.store.add_friend(user_id, friend_id).await?;
        tracing::info!(user_id, friend_id, status = status.as_str(), "Friend added");
        Ok(())
    }

    /// Ends the friendship between the two users, whichever of them sent the
    /// request. No-op if there is none.
    pub async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> ServerResult<()> {
        self.ensure_user(user_id).await?;
        self.ensure_user(friend_id).await?;

        self.store.remove_friend(user_id, friend_id).await?;
        tracing::info!(user_id, friend_id, "Friend removed");
        Ok(())
    }

    /// Lists the user's friends.
    pub async fn get_friends_list(&self, user_id: UserId) -> ServerResult<Vec<User>> {
        self.ensure_user(user_id).await?;
        Ok(self.store.list_friends(user_id).await?)
    }

    /// Lists users who are friends of both `user_id` and `other_id`.
    pub async fn get_common_friends(
        &self,
        user_id: UserId,
        other_id: UserId,
    ) -> ServerResult<Vec<User>> {
        let user = self.get_user_by_id(user_id).await?;
        let other = self.get_user_by_id(other_id).await?;

        let common: BTreeSet<UserId> = user.friends.intersection(&other.friends).copied().collect();
        if common.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .store
            .list_friends(user_id)
            .await?
            .into_iter()
            .filter(|friend| common.contains(&friend.id))
            .collect())
    }

    /// Gets a user by ID.
    pub async fn get_user_by_id(&self, id: UserId) -> ServerResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or(ServerError::UserNotFound(id))
    }

    async fn ensure_user(&self, id: UserId) -> ServerResult<()> {
        if self.store.contains_user(id).await? {
            Ok(())
        } else {
            Err(ServerError::UserNotFound(id))
        }
    }
}
