//! SQLite-backed film store.

mod schema;

use std::{
    collections::{BTreeSet, HashMap},
    str::FromStr,
};

use async_trait::async_trait;
use entities::{
    Film, FilmId, Friendship, FriendshipStatus, Genre, GenreId, Mpa, MpaId, User, UserId,
};
pub use schema::SCHEMA_SQL;
use schema::*;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};

use crate::{
    catalog, CatalogStorage, FilmStorage, FriendshipStorage, LikeStorage, StoreError,
    StoreResult, UserStorage,
};

/// Film store persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database at `url`, creating it if needed, and applies the
    /// schema.
    ///
    /// In-memory databases live as long as their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        }
        .connect_with(options)
        .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and applies the schema.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Creates the tables and seeds the reference catalogs.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        for &(id, name, description) in catalog::MPA_RATINGS {
            sqlx::query("INSERT OR IGNORE INTO mpa (mpa_id, name, description) VALUES (?, ?, ?)")
                .bind(id)
                .bind(name)
                .bind(description)
                .execute(&self.pool)
                .await?;
        }

        for &(id, name) in catalog::GENRES {
            sqlx::query("INSERT OR IGNORE INTO genres (genre_id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&self.pool)
                .await?;
        }

        for status in [FriendshipStatus::Pending, FriendshipStatus::Confirmed] {
            sqlx::query(
                "INSERT OR IGNORE INTO friendship_status (friendship_status_id, status) \
                 VALUES (?, ?)",
            )
            .bind(status.id())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        }

        tracing::info!("Database schema ready");
        Ok(())
    }

    async fn genres_of(&self, film_id: FilmId) -> StoreResult<Vec<Genre>> {
        let sql = format!("{FILM_GENRE_SELECT} WHERE fg.film_id = ? ORDER BY g.genre_id");
        let rows: Vec<FilmGenreRow> = sqlx::query_as(&sql)
            .bind(film_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Genre::new(row.genre_id, row.name))
            .collect())
    }

    async fn likes_of(&self, film_id: FilmId) -> StoreResult<BTreeSet<UserId>> {
        let user_ids: Vec<UserId> =
            sqlx::query_scalar("SELECT user_id FROM likes WHERE film_id = ?")
                .bind(film_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(user_ids.into_iter().collect())
    }

    async fn friends_of(&self, user_id: UserId) -> StoreResult<BTreeSet<UserId>> {
        let friend_ids: Vec<UserId> = sqlx::query_scalar(
            "SELECT friend_id FROM user_friends WHERE user_id = ?
             UNION
             SELECT user_id FROM user_friends WHERE friend_id = ?",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friend_ids.into_iter().collect())
    }

    /// Attaches genres and likes to a batch of film rows, keeping row order.
    async fn assemble_films(&self, rows: Vec<FilmRow>) -> StoreResult<Vec<Film>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("{FILM_GENRE_SELECT} ORDER BY fg.film_id, g.genre_id");
        let genre_rows: Vec<FilmGenreRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        let mut genres: HashMap<FilmId, Vec<Genre>> = HashMap::new();
        for row in genre_rows {
            genres
                .entry(row.film_id)
                .or_default()
                .push(Genre::new(row.genre_id, row.name));
        }

        let like_rows: Vec<(FilmId, UserId)> =
            sqlx::query_as("SELECT film_id, user_id FROM likes")
                .fetch_all(&self.pool)
                .await?;
        let mut likes: HashMap<FilmId, BTreeSet<UserId>> = HashMap::new();
        for (film_id, user_id) in like_rows {
            likes.entry(film_id).or_default().insert(user_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let film_id = row.film_id;
                row.into_film(
                    genres.remove(&film_id).unwrap_or_default(),
                    likes.remove(&film_id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// Attaches friend sets to a batch of user rows, keeping row order.
    async fn assemble_users(&self, rows: Vec<UserRow>) -> StoreResult<Vec<User>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let edges: Vec<(UserId, UserId)> =
            sqlx::query_as("SELECT user_id, friend_id FROM user_friends")
                .fetch_all(&self.pool)
                .await?;
        let mut friends: HashMap<UserId, BTreeSet<UserId>> = HashMap::new();
        for (user_id, friend_id) in edges {
            friends.entry(user_id).or_default().insert(friend_id);
            friends.entry(friend_id).or_default().insert(user_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let user_id = row.user_id;
                row.into_user(friends.remove(&user_id).unwrap_or_default())
            })
            .collect())
    }

    async fn fetch_film(&self, id: FilmId) -> StoreResult<Film> {
        self.get_film(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Film", id))
    }

    async fn fetch_user(&self, id: UserId) -> StoreResult<User> {
        self.get_user(id)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id))
    }
}

async fn replace_film_genres(
    tx: &mut Transaction<'_, Sqlite>,
    film_id: FilmId,
    genres: &[Genre],
) -> StoreResult<()> {
    sqlx::query("DELETE FROM film_genres WHERE film_id = ?")
        .bind(film_id)
        .execute(&mut **tx)
        .await?;

    for genre in genres {
        sqlx::query("INSERT OR IGNORE INTO film_genres (film_id, genre_id) VALUES (?, ?)")
            .bind(film_id)
            .bind(genre.id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

async fn edge_status(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: UserId,
    friend_id: UserId,
) -> StoreResult<Option<FriendshipStatus>> {
    let status_id: Option<i64> = sqlx::query_scalar(
        "SELECT friendship_status_id FROM user_friends WHERE user_id = ? AND friend_id = ?",
    )
    .bind(user_id)
    .bind(friend_id)
    .fetch_optional(&mut **tx)
    .await?;

    status_id.map(status_from_id).transpose()
}

fn status_from_id(id: i64) -> StoreResult<FriendshipStatus> {
    FriendshipStatus::from_id(id)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown friendship status id {id}")))
}

async fn set_edge_status(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: UserId,
    friend_id: UserId,
    status: FriendshipStatus,
) -> StoreResult<()> {
    sqlx::query(
        "UPDATE user_friends SET friendship_status_id = ? WHERE user_id = ? AND friend_id = ?",
    )
    .bind(status.id())
    .bind(user_id)
    .bind(friend_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl FilmStorage for SqliteStore {
    async fn list_films(&self) -> StoreResult<Vec<Film>> {
        let sql = format!("{FILM_SELECT} ORDER BY f.film_id");
        let rows: Vec<FilmRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        self.assemble_films(rows).await
    }

    async fn create_film(&self, mut film: Film) -> StoreResult<Film> {
        film.normalize_genres();

        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            "INSERT INTO films (name, description, release_date, duration, mpa_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa.as_ref().map(|m| m.id))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        replace_film_genres(&mut tx, id, &film.genres).await?;
        tx.commit().await?;

        tracing::debug!(film_id = id, "Film inserted");
        self.fetch_film(id).await
    }

    async fn update_film(&self, mut film: Film) -> StoreResult<Film> {
        film.normalize_genres();

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE films
             SET name = ?, description = ?, release_date = ?, duration = ?, mpa_id = ?
             WHERE film_id = ?",
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa.as_ref().map(|m| m.id))
        .bind(film.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Film", film.id));
        }

        replace_film_genres(&mut tx, film.id, &film.genres).await?;
        tx.commit().await?;

        self.fetch_film(film.id).await
    }

    async fn get_film(&self, id: FilmId) -> StoreResult<Option<Film>> {
        let sql = format!("{FILM_SELECT} WHERE f.film_id = ?");
        let row: Option<FilmRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let genres = self.genres_of(id).await?;
        let likes = self.likes_of(id).await?;
        Ok(Some(row.into_film(genres, likes)))
    }

    async fn contains_film(&self, id: FilmId) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films WHERE film_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn delete_film(&self, id: FilmId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM films WHERE film_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Film", id));
        }
        Ok(())
    }

    async fn top_films(&self, count: usize) -> StoreResult<Vec<Film>> {
        let sql = format!(
            "{FILM_SELECT}
             LEFT JOIN likes l ON l.film_id = f.film_id
             GROUP BY f.film_id
             ORDER BY COUNT(l.user_id) DESC, f.film_id ASC
             LIMIT ?"
        );
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        let rows: Vec<FilmRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        self.assemble_films(rows).await
    }
}

#[async_trait]
impl UserStorage for SqliteStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("{USER_SELECT} ORDER BY user_id");
        let rows: Vec<UserRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        self.assemble_users(rows).await
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let id = sqlx::query(
            "INSERT INTO users (email, login, name, birthday) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        tracing::debug!(user_id = id, "User inserted");
        self.fetch_user(id).await
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let result = sqlx::query(
            "UPDATE users SET email = ?, login = ?, name = ?, birthday = ? WHERE user_id = ?",
        )
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("User", user.id));
        }

        self.fetch_user(user.id).await
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let sql = format!("{USER_SELECT} WHERE user_id = ?");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let friends = self.friends_of(id).await?;
                Ok(Some(row.into_user(friends)))
            }
            None => Ok(None),
        }
    }

    async fn contains_user(&self, id: UserId) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("User", id));
        }
        Ok(())
    }
}

#[async_trait]
impl LikeStorage for SqliteStore {
    async fn add_like(&self, user_id: UserId, film_id: FilmId) -> StoreResult<()> {
        sqlx::query("INSERT OR IGNORE INTO likes (user_id, film_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(film_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> StoreResult<()> {
        sqlx::query("DELETE FROM likes WHERE user_id = ? AND film_id = ?")
            .bind(user_id)
            .bind(film_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn like_count(&self, film_id: FilmId) -> StoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE film_id = ?")
            .bind(film_id)
            .fetch_one(&self.pool)
            .await?;

        usize::try_from(count).map_err(|_| StoreError::Corrupt(format!("like count {count}")))
    }
}

#[async_trait]
impl FriendshipStorage for SqliteStore {
    async fn add_friend(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> StoreResult<FriendshipStatus> {
        // Reads then writes, so take the write lock up front.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        if let Some(status) = edge_status(&mut tx, user_id, friend_id).await? {
            return Ok(status);
        }

        let status = match edge_status(&mut tx, friend_id, user_id).await? {
            Some(_) => {
                set_edge_status(&mut tx, friend_id, user_id, FriendshipStatus::Confirmed).await?;
                FriendshipStatus::Confirmed
            }
            None => FriendshipStatus::Pending,
        };

        sqlx::query(
            "INSERT INTO user_friends (user_id, friend_id, friendship_status_id) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(status.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(status)
    }

    async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> StoreResult<()> {
        sqlx::query(
            "DELETE FROM user_friends
             WHERE (user_id = ? AND friend_id = ?) OR (user_id = ? AND friend_id = ?)",
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(friend_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_friendship(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> StoreResult<Option<Friendship>> {
        let status_id: Option<i64> = sqlx::query_scalar(
            "SELECT friendship_status_id FROM user_friends WHERE user_id = ? AND friend_id = ?",
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_optional(&self.pool)
        .await?;

        status_id
            .map(|id| {
                Ok(Friendship {
                    user_id,
                    friend_id,
                    status: status_from_id(id)?,
                })
            })
            .transpose()
    }

    async fn list_friends(&self, user_id: UserId) -> StoreResult<Vec<User>> {
        let sql = format!(
            "{USER_SELECT}
             WHERE user_id IN (
                 SELECT friend_id FROM user_friends WHERE user_id = ?
                 UNION
                 SELECT user_id FROM user_friends WHERE friend_id = ?
             )
             ORDER BY user_id"
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        self.assemble_users(rows).await
    }
}

#[async_trait]
impl CatalogStorage for SqliteStore {
    async fn list_mpa(&self) -> StoreResult<Vec<Mpa>> {
        let rows: Vec<MpaRow> =
            sqlx::query_as("SELECT mpa_id, name, description FROM mpa ORDER BY mpa_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Mpa::from).collect())
    }

    async fn get_mpa(&self, id: MpaId) -> StoreResult<Option<Mpa>> {
        let row: Option<MpaRow> =
            sqlx::query_as("SELECT mpa_id, name, description FROM mpa WHERE mpa_id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Mpa::from))
    }

    async fn list_genres(&self) -> StoreResult<Vec<Genre>> {
        let rows: Vec<GenreRow> =
            sqlx::query_as("SELECT genre_id, name FROM genres ORDER BY genre_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn get_genre(&self, id: GenreId) -> StoreResult<Option<Genre>> {
        let row: Option<GenreRow> =
            sqlx::query_as("SELECT genre_id, name FROM genres WHERE genre_id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Genre::from))
    }
}
