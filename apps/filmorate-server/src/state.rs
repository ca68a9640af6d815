//! Application state.

use std::sync::Arc;

use film_store::Store;

use crate::config::Config;
use crate::services::{CatalogService, FilmService, UserService};

/// Shared application state.
pub struct AppState<S: Store> {
    /// Server configuration.
    pub config: Config,
    /// Film operations.
    pub films: FilmService<S>,
    /// User operations.
    pub users: UserService<S>,
    /// MPA and genre lookups.
    pub catalog: CatalogService<S>,
}

impl<S: Store> AppState<S> {
    /// Creates new application state, sharing one store between services.
    pub fn new(config: Config, store: S) -> Self {
        let store = Arc::new(store);
        Self {
            config,
            films: FilmService::new(store.clone()),
            users: UserService::new(store.clone()),
            catalog: CatalogService::new(store),
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: Store>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
