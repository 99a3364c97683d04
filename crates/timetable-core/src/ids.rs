//! Identifier generation for work items.
//!
//! Engines take the generator as a constructor argument so tests and
//! embedders can substitute a deterministic source.

use uuid::Uuid;

/// Source of unique work-item identifiers.
pub trait IdGenerator {
    /// Returns the next fresh identifier.
    fn next_id(&mut self) -> String;
}

/// Default generator backed by random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator producing `work-1`, `work-2`, ...
///
/// Intended for tests and reproducible simulations.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("work-{}", self.counter)
    }
}
