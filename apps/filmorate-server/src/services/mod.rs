//! Business logic between the HTTP handlers and the store.

pub mod catalog;
pub mod film;
pub mod user;

pub use catalog::CatalogService;
use entities::ValidationResult;
pub use film::FilmService;
pub use user::UserService;

use crate::error::{ServerError, ServerResult};

/// Converts a validation outcome into a server result, logging rejections.
fn validated(result: ValidationResult) -> ServerResult<()> {
    result.map_err(|e| {
        tracing::warn!(error = %e, "Validation failed");
        ServerError::from(e)
    })
}
