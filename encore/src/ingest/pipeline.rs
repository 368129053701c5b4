use std::sync::Arc;

use crate::embeddings::Embedder;
use crate::models::{Event, EventMetadata, VectorRecord};
use crate::vector_store::VectorIndex;

/// Outcome counters for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub fetched: usize,
    pub stored: usize,
    pub skipped: usize,
}

/// Embeds fetched events and writes them to the vector index in fixed-size
/// batches.
///
/// An embedding failure skips that event for the run; an upsert failure
/// drops that batch. There is no checkpointing: a partial run leaves some
/// batches written, and re-running reingests everything (safe, since
/// upsert overwrites by event id).
pub struct IngestionPipeline {
    embeddings: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    batch_size: usize,
}

impl IngestionPipeline {
    pub fn new(
        embeddings: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        batch_size: usize,
    ) -> Self {
        Self {
            embeddings,
            index,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn run(&self, events: Vec<Event>) -> IngestReport {
        let mut report = IngestReport {
            fetched: events.len(),
            ..Default::default()
        };
        let mut batch: Vec<VectorRecord> = Vec::with_capacity(self.batch_size);

        for event in events {
            let text = format!("{} - {} - {}", event.name, event.info, event.venue);

            let values = match self.embeddings.embed_single(&text).await {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Skipping event {}: embedding failed: {}", event.id, e);
                    report.skipped += 1;
                    continue;
                }
            };

            batch.push(VectorRecord {
                id: event.id.clone(),
                values,
                metadata: EventMetadata::from(&event),
            });

            if batch.len() >= self.batch_size {
                self.flush(&mut batch, &mut report).await;
            }
        }

        self.flush(&mut batch, &mut report).await;
        report
    }

    async fn flush(&self, batch: &mut Vec<VectorRecord>, report: &mut IngestReport) {
        if batch.is_empty() {
            return;
        }

        match self.index.upsert(batch).await {
            Ok(()) => {
                report.stored += batch.len();
                tracing::info!("Stored {} events in the vector index", batch.len());
            }
            Err(e) => {
                tracing::error!("Failed to upsert batch of {}: {}", batch.len(), e);
            }
        }

        batch.clear();
    }
}
