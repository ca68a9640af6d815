use std::collections::BTreeSet;

use chrono::NaiveDate;
use entities::{Film, FilmId, Genre, GenreId, Mpa, MpaId, User, UserId};
use sqlx::FromRow;

/// Database row for Film, joined with its MPA rating
#[derive(Debug, FromRow)]
pub struct FilmRow {
    pub film_id: FilmId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i64,
    pub mpa_id: Option<MpaId>,
    pub mpa_name: Option<String>,
    pub mpa_description: Option<String>,
}

impl FilmRow {
    pub fn into_film(self, genres: Vec<Genre>, likes: BTreeSet<UserId>) -> Film {
        let mpa = self.mpa_id.map(|id| {
            Mpa::new(
                id,
                self.mpa_name.unwrap_or_default(),
                self.mpa_description.unwrap_or_default(),
            )
        });

        Film {
            id: self.film_id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa,
            genres,
            likes,
        }
    }
}

/// Database row for User
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl UserRow {
    pub fn into_user(self, friends: BTreeSet<UserId>) -> User {
        User {
            id: self.user_id,
            email: self.email,
            login: self.login,
            name: self.name,
            birthday: self.birthday,
            friends,
        }
    }
}

/// Database row for Mpa
#[derive(Debug, FromRow)]
pub struct MpaRow {
    pub mpa_id: MpaId,
    pub name: String,
    pub description: String,
}

impl From<MpaRow> for Mpa {
    fn from(row: MpaRow) -> Self {
        Mpa::new(row.mpa_id, row.name, row.description)
    }
}

/// Database row for Genre
#[derive(Debug, FromRow)]
pub struct GenreRow {
    pub genre_id: GenreId,
    pub name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::new(row.genre_id, row.name)
    }
}

/// Genre linked to a film
#[derive(Debug, FromRow)]
pub struct FilmGenreRow {
    pub film_id: FilmId,
    pub genre_id: GenreId,
    pub name: String,
}

pub const FILM_SELECT: &str = "SELECT f.film_id, f.name, f.description, f.release_date, \
     f.duration, f.mpa_id, m.name AS mpa_name, m.description AS mpa_description
     FROM films f
     LEFT JOIN mpa m ON m.mpa_id = f.mpa_id";

pub const USER_SELECT: &str = "SELECT user_id, email, login, name, birthday FROM users";

pub const FILM_GENRE_SELECT: &str = "SELECT fg.film_id, g.genre_id, g.name
     FROM film_genres fg
     JOIN genres g ON g.genre_id = fg.genre_id";

/// Database schema
pub const SCHEMA_SQL: &str = r#"
-- MPA ratings (static catalog)
CREATE TABLE IF NOT EXISTS mpa (
    mpa_id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL
);

-- Genres (static catalog)
CREATE TABLE IF NOT EXISTS genres (
    genre_id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
);

-- Films table
CREATE TABLE IF NOT EXISTS films (
    film_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    release_date TEXT NOT NULL,
    duration INTEGER NOT NULL,
    mpa_id INTEGER REFERENCES mpa(mpa_id)
);

-- Film genres (M:N relationship)
CREATE TABLE IF NOT EXISTS film_genres (
    film_id INTEGER NOT NULL REFERENCES films(film_id) ON DELETE CASCADE,
    genre_id INTEGER NOT NULL REFERENCES genres(genre_id),
    PRIMARY KEY (film_id, genre_id)
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    login TEXT NOT NULL,
    name TEXT NOT NULL,
    birthday TEXT NOT NULL
);

-- Likes (M:N relationship)
CREATE TABLE IF NOT EXISTS likes (
    user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    film_id INTEGER NOT NULL REFERENCES films(film_id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, film_id)
);

-- Friendship statuses (static catalog)
CREATE TABLE IF NOT EXISTS friendship_status (
    friendship_status_id INTEGER PRIMARY KEY NOT NULL,
    status TEXT NOT NULL
);

-- Directed friendship edges
CREATE TABLE IF NOT EXISTS user_friends (
    user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    friend_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    friendship_status_id INTEGER NOT NULL REFERENCES friendship_status(friendship_status_id),
    PRIMARY KEY (user_id, friend_id)
);

-- Indexes for performance
CREATE INDEX IF NOT EXISTS idx_likes_film ON likes(film_id);
CREATE INDEX IF NOT EXISTS idx_user_friends_friend ON user_friends(friend_id);
"#;
