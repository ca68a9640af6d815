//! Film operations: CRUD, likes and the popularity ranking.

use std::sync::Arc;

use entities::{Film, FilmId, UserId, validate_film};
use film_store::Store;

use super::validated;
use crate::error::{ServerError, ServerResult};

/// Service for managing films and their likes.
pub struct FilmService<S> {
    store: Arc<S>,
}

impl<S: Store> FilmService<S> {
    /// Creates a new film service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists all films.
    pub async fn find_all(&self) -> ServerResult<Vec<Film>> {
        Ok(self.store.list_films().await?)
    }

    /// Validates and stores a new film.
    pub async fn create(&self, mut film: Film) -> ServerResult<Film> {
        validated(validate_film(&film))?;
        self.resolve_references(&mut film).await?;

        let film = self.store.create_film(film).await?;
        tracing::info!(film_id = film.id, "Film created");
        Ok(film)
    }

    /// Validates and replaces an existing film.
    pub async fn update(&self, mut film: Film) -> ServerResult<Film> {
        validated(validate_film(&film))?;
        self.ensure_film(film.id).await?;
        self.resolve_references(&mut film).await?;

        let film = self.store.update_film(film).await?;
        tracing::info!(film_id = film.id, "Film updated");
        Ok(film)
    }

    /// Deletes a film along with its likes.
    pub async fn delete(&self, id: FilmId) -> ServerResult<()> {
        self.ensure_film(id).await?;
        self.store.delete_film(id).await?;
        tracing::info!(film_id = id, "Film deleted");
        Ok(())
    }

    /// Records that a user likes a film.
    pub async fn add_like(&self, user_id: UserId, film_id: FilmId) -> ServerResult<()> {
        self.ensure_film(film_id).await?;
        self.ensure_user(user_id).await?;

        self.store.add_like(user_id, film_id).await?;
        tracing::info!(film_id, user_id, "Like added");
        Ok(())
    }

    /// Removes a user's like from a film. Removing an absent like is a no-op.
    pub async fn delete_like(&self, user_id: UserId, film_id: FilmId) -> ServerResult<()> {
        self.ensure_film(film_id).await?;
        self.ensure_user(user_id).await?;

        self.store.remove_like(user_id, film_id).await?;
        tracing::info!(film_id, user_id, "Like removed");
        Ok(())
    }

    /// Lists up to `count` films with the most likes.
    pub async fn find_top_films(&self, count: usize) -> ServerResult<Vec<Film>> {
        Ok(self.store.top_films(count).await?)
    }

    /// Gets a film by ID.
    pub async fn find_film_by_id(&self, id: FilmId) -> ServerResult<Film> {
        self.store
            .get_film(id)
            .await?
            .ok_or(ServerError::FilmNotFound(id))
    }

    async fn ensure_film(&self, id: FilmId) -> ServerResult<()> {
        if self.store.contains_film(id).await? {
            Ok(())
        } else {
            Err(ServerError::FilmNotFound(id))
        }
    }

    async fn ensure_user(&self, id: UserId) -> ServerResult<()> {
        if self.store.contains_user(id).await? {
            Ok(())
        } else {
            Err(ServerError::UserNotFound(id))
        }
    }

    /// Replaces the film's MPA rating and genres with their catalog entries.
    async fn resolve_references(&self, film: &mut Film) -> ServerResult<()> {
        if let Some(mpa) = &film.mpa {
            let id = mpa.id;
            let resolved = self
                .store
                .get_mpa(id)
                .await?
                .ok_or(ServerError::IllegalId { kind: "MPA", id })?;
            film.mpa = Some(resolved);
        }

        film.normalize_genres();
        let mut genres = Vec::with_capacity(film.genres.len());
        for genre in &film.genres {
            let id = genre.id;
            let resolved = self
                .store
                .get_genre(id)
                .await?
                .ok_or(ServerError::IllegalId { kind: "Genre", id })?;
            genres.push(resolved);
        }
        film.genres = genres;

        Ok(())
    }
}
