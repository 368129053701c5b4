use serde::{Deserialize, Serialize};

use super::EventMetadata;

/// One entry written to the vector index: the event id, its embedding, and
/// the display metadata returned verbatim by queries. Upserting an id that
/// already exists overwrites the previous entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: EventMetadata,
}

/// A nearest-neighbor hit from the vector store, best matches first.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMatch {
    pub id: String,
    pub score: f32,
    pub metadata: EventMetadata,
}

/// Totals reported by the vector store's stats endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub vector_count: u64,
}
