//! Persisted user record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::UserDraft;

/// One user in the collection.
///
/// Serialized with camelCase keys, `city` omitted when absent, and any
/// extra fields flattened after the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub second_name: String,
    pub age: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Binds a validated draft to an id.
    pub fn from_draft(id: impl Into<String>, draft: UserDraft) -> Self {
        Self {
            id: id.into(),
            first_name: draft.first_name,
            second_name: draft.second_name,
            age: draft.age,
            city: draft.city,
            extra: draft.extra,
        }
    }
}
