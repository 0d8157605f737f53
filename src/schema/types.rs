//! Validated user payload

use serde_json::{Map, Value};

/// Lowest accepted age
pub const AGE_MIN: i64 = 0;

/// Highest accepted age
pub const AGE_MAX: i64 = 150;

/// A user candidate that passed validation and has no id yet.
///
/// Only [`validate`](super::validate) constructs drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub(crate) first_name: String,
    pub(crate) second_name: String,
    pub(crate) age: u8,
    pub(crate) city: Option<String>,
    pub(crate) extra: Map<String, Value>,
}

impl UserDraft {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn second_name(&self) -> &str {
        &self.second_name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Fields outside the schema, passed through as supplied
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
