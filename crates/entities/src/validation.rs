//! Validation rules for films and users.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::{Film, User};

/// Maximum length of a film description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Release date of the first film ever shown to a paying audience.
pub const EARLIEST_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid earliest release date"),
};

/// A rule violated by client supplied data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Film name, description or release date is missing.
    #[error("film name, description and release date are required")]
    MissingFilmFields,

    /// Film name is blank.
    #[error("film name must not be blank")]
    BlankFilmName,

    /// Film description is too long.
    #[error("film description has {length} characters, at most {max} allowed", max = MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong { length: usize },

    /// Film release date precedes the first film ever.
    #[error("release date {0} is before {earliest}", earliest = EARLIEST_RELEASE_DATE)]
    ReleaseDateTooEarly(NaiveDate),

    /// Film duration is negative.
    #[error("film duration must be positive, got {0}")]
    NegativeDuration(i64),

    /// User email, login or birthday is missing.
    #[error("user email, login and birthday are required")]
    MissingUserFields,

    /// Email is blank or has no `@`.
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),

    /// Login is blank or contains whitespace.
    #[error("login must be non-blank and contain no whitespace: {0:?}")]
    InvalidLogin(String),

    /// Birthday lies in the future.
    #[error("birthday {0} is in the future")]
    BirthdayInFuture(NaiveDate),

    /// A user tried to befriend themselves.
    #[error("user {0} cannot befriend themselves")]
    SelfFriendship(i64),

    /// Top films requested with a non-positive count.
    #[error("count must be positive, got {0}")]
    NonPositiveCount(i64),
}

/// Result type for validation checks.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Checks a film against the catalog rules. Does not modify the film.
pub fn validate_film(film: &Film) -> ValidationResult {
    let (Some(name), Some(description), Some(release_date)) =
        (&film.name, &film.description, film.release_date)
    else {
        return Err(ValidationError::MissingFilmFields);
    };

    if name.trim().is_empty() {
        return Err(ValidationError::BlankFilmName);
    }

    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong { length });
    }

    if release_date < EARLIEST_RELEASE_DATE {
        return Err(ValidationError::ReleaseDateTooEarly(release_date));
    }

    // Zero is accepted.
    if film.duration < 0 {
        return Err(ValidationError::NegativeDuration(film.duration));
    }

    Ok(())
}

/// Checks a user against the account rules, using today's local date.
///
/// A missing or blank name is replaced with the login.
pub fn validate_user(user: &mut User) -> ValidationResult {
    validate_user_at(user, Local::now().date_naive())
}

/// Same as [`validate_user`] with an explicit "today".
pub fn validate_user_at(user: &mut User, today: NaiveDate) -> ValidationResult {
    let (Some(email), Some(login), Some(birthday)) = (&user.email, &user.login, user.birthday)
    else {
        return Err(ValidationError::MissingUserFields);
    };

    if email.trim().is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail(email.clone()));
    }

    if login.trim().is_empty() || login.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidLogin(login.clone()));
    }

    if user.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        user.name = Some(login.clone());
    }

    if birthday > today {
        return Err(ValidationError::BirthdayInFuture(birthday));
    }

    Ok(())
}
