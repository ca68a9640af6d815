//! MPA rating and genre lookups.

use std::sync::Arc;

use entities::{Genre, GenreId, Mpa, MpaId};
use film_store::Store;

use crate::error::{ServerError, ServerResult};

/// Read-only access to the MPA and genre catalogs.
pub struct CatalogService<S> {
    store: Arc<S>,
}

impl<S: Store> CatalogService<S> {
    /// Creates a new catalog service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists all MPA ratings.
    pub async fn find_all_mpa(&self) -> ServerResult<Vec<Mpa>> {
        Ok(self.store.list_mpa().await?)
    }

    /// Gets an MPA rating by ID.
    pub async fn find_mpa_by_id(&self, id: MpaId) -> ServerResult<Mpa> {
        self.store
            .get_mpa(id)
            .await?
            .ok_or(ServerError::IllegalId { kind: "MPA", id })
    }

    /// Lists all genres.
    pub async fn find_all_genres(&self) -> ServerResult<Vec<Genre>> {
        Ok(self.store.list_genres().await?)
    }

    /// Gets a genre by ID.
    pub async fn find_genre_by_id(&self, id: GenreId) -> ServerResult<Genre> {
        self.store
            .get_genre(id)
            .await?
            .ok_or(ServerError::IllegalId { kind: "Genre", id })
    }
}
