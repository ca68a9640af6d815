//! Core entity definitions for Filmorate.
//!
//! This crate defines the films, users, friendship edges and reference
//! catalog types shared by storage and the server, together with the
//! validation rules applied before anything is persisted.

mod catalog;
mod film;
mod friendship;
mod user;
mod validation;

pub use catalog::*;
pub use film::*;
pub use friendship::*;
pub use user::*;
pub use validation::*;
