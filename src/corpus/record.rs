//! Search record output type.

use serde::Serialize;

/// One searchable document in the emitted index.
///
/// Serialized field order is the output object order. `id` duplicates `url`
/// so the consuming index can de-duplicate and update records by a stable
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub url: String,
    pub date: String,
}
