//! User-related entity definitions.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a user.
pub type UserId = i64;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by storage on creation.
    #[serde(default)]
    pub id: UserId,
    /// Email address.
    pub email: Option<String>,
    /// Login, without whitespace.
    pub login: Option<String>,
    /// Display name. Defaults to the login during validation.
    #[serde(default)]
    pub name: Option<String>,
    /// Date of birth, never in the future.
    pub birthday: Option<NaiveDate>,
    /// Users sharing a friendship edge with this one. Filled in by storage,
    /// ignored on writes.
    #[serde(default)]
    pub friends: BTreeSet<UserId>,
}

impl User {
    /// Creates a new user without a display name.
    pub fn new(email: impl Into<String>, login: impl Into<String>, birthday: NaiveDate) -> Self {
        Self {
            id: 0,
            email: Some(email.into()),
            login: Some(login.into()),
            name: None,
            birthday: Some(birthday),
            friends: BTreeSet::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
