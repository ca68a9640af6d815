//! Seed data for the MPA and genre reference tables.

use entities::{Genre, Mpa};

/// MPA ratings as `(id, name, description)`.
pub const MPA_RATINGS: &[(i64, &str, &str)] = &[
    (1, "G", "General audiences. All ages admitted."),
    (2, "PG", "Parental guidance suggested. Some material may not be suitable for children."),
    (3, "PG-13", "Parents strongly cautioned. Some material may be inappropriate for children under 13."),
    (4, "R", "Restricted. Under 17 requires accompanying parent or adult guardian."),
    (5, "NC-17", "Adults only. No one 17 and under admitted."),
];

/// Genres as `(id, name)`.
pub const GENRES: &[(i64, &str)] = &[
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Animation"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

/// Builds the seeded MPA ratings.
pub fn seed_mpa() -> Vec<Mpa> {
    MPA_RATINGS
        .iter()
        .map(|&(id, name, description)| Mpa::new(id, name, description))
        .collect()
}

/// Builds the seeded genres.
pub fn seed_genres() -> Vec<Genre> {
    GENRES.iter().map(|&(id, name)| Genre::new(id, name)).collect()
}
