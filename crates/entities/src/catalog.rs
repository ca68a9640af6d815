//! Reference catalog entities: MPA ratings and genres.
//!
//! Both are static data from the application's point of view. Clients refer to
//! them by id only; the remaining fields are filled in from the catalog.

use serde::{Deserialize, Serialize};

/// Identifier of a genre.
pub type GenreId = i64;

/// Identifier of an MPA rating.
pub type MpaId = i64;

/// A film genre.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    /// Unique identifier.
    pub id: GenreId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Genre {
    /// Creates a new genre.
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A Motion Picture Association content rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mpa {
    /// Unique identifier.
    pub id: MpaId,
    /// Short code, e.g. `PG-13`.
    #[serde(default)]
    pub name: String,
    /// Human readable explanation of the rating.
    #[serde(default)]
    pub description: String,
}

impl Mpa {
    /// Creates a new rating.
    pub fn new(id: MpaId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}
