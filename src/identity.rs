//! Record identity generation
//!
//! Ids are random UUID v4 strings. Uniqueness is probabilistic (122 random
//! bits) and the store does not verify it against existing records.

use uuid::Uuid;

/// Source of ids for newly created records.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh, non-empty id
    fn new_id(&self) -> String;
}

/// Generates hyphenated UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
