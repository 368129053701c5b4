//! Operator utilities for the vector index.

use crate::error::Result;
use crate::vector_store::VectorIndex;

/// Clear every vector in the configured namespace.
///
/// Checks the index stats first and performs no delete call when the index
/// is already empty. Returns the number of vectors present before deletion.
pub async fn purge(index: &dyn VectorIndex) -> Result<u64> {
    let stats = index.stats().await?;

    if stats.vector_count == 0 {
        tracing::info!("Vector index is already empty");
        return Ok(0);
    }

    tracing::info!("Deleting {} vectors from the index...", stats.vector_count);
    index.delete_all().await?;

    Ok(stats.vector_count)
}
