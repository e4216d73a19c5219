use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// The identifier is an opaque UUID string assigned by the store and
/// immutable afterwards. Timestamps are RFC 3339 strings; `updated_at`
/// refreshes on every title change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}
