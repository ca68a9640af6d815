//! Storage for Filmorate
//!
//! This crate provides the storage ports for films, users, likes,
//! friendships and the MPA/genre catalog, with an in-memory implementation
//! and a SQLite implementation.

pub mod catalog;
mod error;
mod id;
mod memory;
mod sqlite;
mod traits;

#[cfg(test)]
mod scenarios;

pub use error::*;
pub use id::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
