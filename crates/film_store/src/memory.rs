//! In-memory film store, used when no database is configured and in tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use async_trait::async_trait;
use entities::{
    Film, FilmId, Friendship, FriendshipStatus, Genre, GenreId, Mpa, MpaId, User, UserId,
};
use tokio::sync::RwLock;

use crate::{
    catalog, CatalogStorage, FilmStorage, FriendshipStorage, IdGenerator, LikeStorage,
    StoreError, StoreResult, UserStorage,
};

type FriendshipEdges = BTreeMap<(UserId, UserId), FriendshipStatus>;

/// In-memory film store.
///
/// Tables are `BTreeMap`s keyed by id, so iteration follows creation order.
/// Locks are always taken in the order films, users, likes, friendships.
#[derive(Debug)]
pub struct MemoryStore {
    films: Arc<RwLock<BTreeMap<FilmId, Film>>>,
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
    /// `(film_id, user_id)` pairs.
    likes: Arc<RwLock<BTreeSet<(FilmId, UserId)>>>,
    /// Directed edges `(user_id, friend_id)`.
    friendships: Arc<RwLock<FriendshipEdges>>,
    mpa: BTreeMap<MpaId, Mpa>,
    genres: BTreeMap<GenreId, Genre>,
    film_ids: IdGenerator,
    user_ids: IdGenerator,
}

impl MemoryStore {
    /// Creates an empty store with the standard catalog.
    pub fn new() -> Self {
        Self {
            films: Arc::default(),
            users: Arc::default(),
            likes: Arc::default(),
            friendships: Arc::default(),
            mpa: catalog::seed_mpa().into_iter().map(|m| (m.id, m)).collect(),
            genres: catalog::seed_genres()
                .into_iter()
                .map(|g| (g.id, g))
                .collect(),
            film_ids: IdGenerator::new(),
            user_ids: IdGenerator::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn likes_of(likes: &BTreeSet<(FilmId, UserId)>, film_id: FilmId) -> BTreeSet<UserId> {
    likes
        .range((film_id, UserId::MIN)..=(film_id, UserId::MAX))
        .map(|&(_, user_id)| user_id)
        .collect()
}

fn friends_of(edges: &FriendshipEdges, user_id: UserId) -> BTreeSet<UserId> {
    edges
        .keys()
        .filter_map(|&(from, to)| {
            if from == user_id {
                Some(to)
            } else if to == user_id {
                Some(from)
            } else {
                None
            }
        })
        .collect()
}

fn with_likes(film: &Film, likes: &BTreeSet<(FilmId, UserId)>) -> Film {
    let mut film = film.clone();
    film.likes = likes_of(likes, film.id);
    film
}

fn with_friends(user: &User, edges: &FriendshipEdges) -> User {
    let mut user = user.clone();
    user.friends = friends_of(edges, user.id);
    user
}

#[async_trait]
impl FilmStorage for MemoryStore {
    async fn list_films(&self) -> StoreResult<Vec<Film>> {
        let films = self.films.read().await;
        let likes = self.likes.read().await;
        Ok(films.values().map(|f| with_likes(f, &likes)).collect())
    }

    async fn create_film(&self, mut film: Film) -> StoreResult<Film> {
        let mut films = self.films.write().await;
        film.id = self.film_ids.next_id();
        film.likes.clear();
        film.normalize_genres();
        films.insert(film.id, film.clone());
        Ok(film)
    }

    async fn update_film(&self, mut film: Film) -> StoreResult<Film> {
        let mut films = self.films.write().await;
        if !films.contains_key(&film.id) {
            return Err(StoreError::not_found("Film", film.id));
        }
        film.likes.clear();
        film.normalize_genres();
        films.insert(film.id, film.clone());

        let likes = self.likes.read().await;
        Ok(with_likes(&film, &likes))
    }

    async fn get_film(&self, id: FilmId) -> StoreResult<Option<Film>> {
        let films = self.films.read().await;
        let likes = self.likes.read().await;
        Ok(films.get(&id).map(|f| with_likes(f, &likes)))
    }

    async fn contains_film(&self, id: FilmId) -> StoreResult<bool> {
        Ok(self.films.read().await.contains_key(&id))
    }

    async fn delete_film(&self, id: FilmId) -> StoreResult<()> {
        let mut films = self.films.write().await;
        if films.remove(&id).is_none() {
            return Err(StoreError::not_found("Film", id));
        }
        let mut likes = self.likes.write().await;
        likes.retain(|&(film_id, _)| film_id != id);
        Ok(())
    }

    async fn top_films(&self, count: usize) -> StoreResult<Vec<Film>> {
        let films = self.films.read().await;
        let likes = self.likes.read().await;
        let mut result: Vec<Film> = films.values().map(|f| with_likes(f, &likes)).collect();
        // Stable sort, so equal counts stay in id order.
        result.sort_by(|a, b| b.like_count().cmp(&a.like_count()));
        result.truncate(count);
        Ok(result)
    }
}

#[async_trait]
impl UserStorage for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let edges = self.friendships.read().await;
        Ok(users.values().map(|u| with_friends(u, &edges)).collect())
    }

    async fn create_user(&self, mut user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        user.id = self.user_ids.next_id();
        user.friends.clear();
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, mut user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::not_found("User", user.id));
        }
        user.friends.clear();
        users.insert(user.id, user.clone());

        let edges = self.friendships.read().await;
        Ok(with_friends(&user, &edges))
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        let edges = self.friendships.read().await;
        Ok(users.get(&id).map(|u| with_friends(u, &edges)))
    }

    async fn contains_user(&self, id: UserId) -> StoreResult<bool> {
        Ok(self.users.read().await.contains_key(&id))
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            return Err(StoreError::not_found("User", id));
        }
        let mut likes = self.likes.write().await;
        likes.retain(|&(_, user_id)| user_id != id);
        let mut edges = self.friendships.write().await;
        edges.retain(|&(from, to), _| from != id && to != id);
        Ok(())
    }
}

#[async_trait]
impl LikeStorage for MemoryStore {
    async fn add_like(&self, user_id: UserId, film_id: FilmId) -> StoreResult<()> {
        self.likes.write().await.insert((film_id, user_id));
        Ok(())
    }

    async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> StoreResult<()> {
        self.likes.write().await.remove(&(film_id, user_id));
        Ok(())
    }

    async fn like_count(&self, film_id: FilmId) -> StoreResult<usize> {
        let likes = self.likes.read().await;
        Ok(likes_of(&likes, film_id).len())
    }
}

#[async_trait]
impl FriendshipStorage for MemoryStore {
    async fn add_friend(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> StoreResult<FriendshipStatus> {
        let mut edges = self.friendships.write().await;
        if let Some(&status) = edges.get(&(user_id, friend_id)) {
            return Ok(status);
        }

        let status = match edges.get_mut(&(friend_id, user_id)) {
            Some(reverse) => {
                *reverse = FriendshipStatus::Confirmed;
                FriendshipStatus::Confirmed
            }
            None => FriendshipStatus::Pending,
        };
        edges.insert((user_id, friend_id), status);
        Ok(status)
    }

    async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> StoreResult<()> {
        let mut edges = self.friendships.write().await;
        edges.remove(&(user_id, friend_id));
        edges.remove(&(friend_id, user_id));
        Ok(())
    }

    async fn get_friendship(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> StoreResult<Option<Friendship>> {
        let edges = self.friendships.read().await;
        Ok(edges
            .get(&(user_id, friend_id))
            .map(|&status| Friendship {
                user_id,
                friend_id,
                status,
            }))
    }

    async fn list_friends(&self, user_id: UserId) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let edges = self.friendships.read().await;
        Ok(friends_of(&edges, user_id)
            .into_iter()
            .filter_map(|id| users.get(&id))
            .map(|u| with_friends(u, &edges))
            .collect())
    }
}

#[async_trait]
impl CatalogStorage for MemoryStore {
    async fn list_mpa(&self) -> StoreResult<Vec<Mpa>> {
        Ok(self.mpa.values().cloned().collect())
    }

    async fn get_mpa(&self, id: MpaId) -> StoreResult<Option<Mpa>> {
        Ok(self.mpa.get(&id).cloned())
    }

    async fn list_genres(&self) -> StoreResult<Vec<Genre>> {
        Ok(self.genres.values().cloned().collect())
    }

    async fn get_genre(&self, id: GenreId) -> StoreResult<Option<Genre>> {
        Ok(self.genres.get(&id).cloned())
    }
}
