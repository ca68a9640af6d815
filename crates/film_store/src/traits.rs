//! Storage port definitions.
//!
//! Lookups return `Option` and leave it to the caller to decide whether a
//! missing entity is an error. Entities returned from any operation carry
//! their `likes`/`friends` sets as currently recorded.

use async_trait::async_trait;
use entities::{
    Film, FilmId, Friendship, FriendshipStatus, Genre, GenreId, Mpa, MpaId, User, UserId,
};

use crate::StoreResult;

/// Persistence of films.
#[async_trait]
pub trait FilmStorage: Send + Sync {
    /// Lists all films in id order.
    async fn list_films(&self) -> StoreResult<Vec<Film>>;

    /// Stores a new film, assigning it a fresh id.
    async fn create_film(&self, film: Film) -> StoreResult<Film>;

    /// Replaces the film with the same id.
    async fn update_film(&self, film: Film) -> StoreResult<Film>;

    /// Gets a film by ID.
    async fn get_film(&self, id: FilmId) -> StoreResult<Option<Film>>;

    /// Returns true if a film with this id exists.
    async fn contains_film(&self, id: FilmId) -> StoreResult<bool>;

    /// Deletes a film together with its likes and genre links.
    async fn delete_film(&self, id: FilmId) -> StoreResult<()>;

    /// Lists up to `count` films by descending like count. Ties keep id order.
    async fn top_films(&self, count: usize) -> StoreResult<Vec<Film>>;
}

/// Persistence of users.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Lists all users in id order.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Stores a new user, assigning it a fresh id.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Replaces the user with the same id.
    async fn update_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Returns true if a user with this id exists.
    async fn contains_user(&self, id: UserId) -> StoreResult<bool>;

    /// Deletes a user together with their likes and friendship edges.
    async fn delete_user(&self, id: UserId) -> StoreResult<()>;
}

/// User-likes-film associations.
#[async_trait]
pub trait LikeStorage: Send + Sync {
    /// Records a like. Adding an existing like changes nothing.
    async fn add_like(&self, user_id: UserId, film_id: FilmId) -> StoreResult<()>;

    /// Removes a like if present.
    async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> StoreResult<()>;

    /// Number of users who liked the film.
    async fn like_count(&self, film_id: FilmId) -> StoreResult<usize>;
}

/// Directed friendship edges with a pending/confirmed status.
#[async_trait]
pub trait FriendshipStorage: Send + Sync {
    /// Records the edge `user_id -> friend_id` and returns its status.
    ///
    /// If the reverse edge exists both become confirmed. Adding an existing
    /// edge changes nothing.
    async fn add_friend(&self, user_id: UserId, friend_id: UserId)
        -> StoreResult<FriendshipStatus>;

    /// Ends the friendship between the two users, removing the edges in
    /// both directions. No-op if there are none.
    async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> StoreResult<()>;

    /// Gets the edge `user_id -> friend_id`.
    async fn get_friendship(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> StoreResult<Option<Friendship>>;

    /// Lists users sharing an edge with `user_id` in either direction, in id
    /// order.
    async fn list_friends(&self, user_id: UserId) -> StoreResult<Vec<User>>;
}

/// Read-only MPA and genre catalog.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Lists all MPA ratings in id order.
    async fn list_mpa(&self) -> StoreResult<Vec<Mpa>>;

    /// Gets an MPA rating by ID.
    async fn get_mpa(&self, id: MpaId) -> StoreResult<Option<Mpa>>;

    /// Lists all genres in id order.
    async fn list_genres(&self) -> StoreResult<Vec<Genre>>;

    /// Gets a genre by ID.
    async fn get_genre(&self, id: GenreId) -> StoreResult<Option<Genre>>;
}

/// Everything the service layer needs from a backing store.
pub trait Store:
    FilmStorage + UserStorage + LikeStorage + FriendshipStorage + CatalogStorage
{
}

impl<T> Store for T where
    T: FilmStorage + UserStorage + LikeStorage + FriendshipStorage + CatalogStorage
{
}
