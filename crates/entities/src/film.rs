//! Film entity definitions.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Genre, Mpa, UserId};

/// Identifier of a film.
pub type FilmId = i64;

/// A film in the catalog.
///
/// Text and date fields are optional on the wire so that missing values reach
/// [`crate::validate_film`] and are reported as validation errors instead of
/// deserialization failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Unique identifier, assigned by storage on creation.
    #[serde(default)]
    pub id: FilmId,
    /// Title.
    pub name: Option<String>,
    /// Free-form description, at most 200 characters.
    pub description: Option<String>,
    /// Release date, never before 1895-12-28.
    pub release_date: Option<NaiveDate>,
    /// Duration in minutes.
    #[serde(default)]
    pub duration: i64,
    /// Content rating.
    #[serde(default)]
    pub mpa: Option<Mpa>,
    /// Genres, kept sorted by id without duplicates.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Users who liked this film. Filled in by storage, ignored on writes.
    #[serde(default)]
    pub likes: BTreeSet<UserId>,
}

impl Film {
    /// Creates a new film without rating, genres or likes.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        release_date: NaiveDate,
        duration: i64,
    ) -> Self {
        Self {
            id: 0,
            name: Some(name.into()),
            description: Some(description.into()),
            release_date: Some(release_date),
            duration,
            mpa: None,
            genres: Vec::new(),
            likes: BTreeSet::new(),
        }
    }

    /// Sets the content rating.
    pub fn with_mpa(mut self, mpa: Mpa) -> Self {
        self.mpa = Some(mpa);
        self
    }

    /// Sets the genres.
    pub fn with_genres(mut self, genres: impl IntoIterator<Item = Genre>) -> Self {
        self.genres = genres.into_iter().collect();
        self.normalize_genres();
        self
    }

    /// Sorts genres by id and drops repeated ids.
    pub fn normalize_genres(&mut self) {
        self.genres.sort_by_key(|g| g.id);
        self.genres.dedup_by_key(|g| g.id);
    }

    /// Number of users who liked this film.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}
