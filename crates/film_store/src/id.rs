//! Identifier generation for the in-memory store.

use std::sync::atomic::{AtomicI64, Ordering};

/// Issues strictly increasing identifiers starting at 1.
///
/// Identifiers are never handed out twice, even after the entity they were
/// assigned to is deleted.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicI64,
}

impl IdGenerator {
    /// Creates a generator whose first identifier is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }

    /// Returns the next identifier.
    pub fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
