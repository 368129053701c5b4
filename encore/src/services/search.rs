use std::collections::HashSet;
use std::sync::Arc;

use crate::embeddings::Embedder;
use crate::error::{EncoreError, Result};
use crate::llm::{prompts, CompletionOutput, TextCompletion};
use crate::models::EventMetadata;
use crate::vector_store::VectorIndex;

/// The assembled result of one search request.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub summary: String,
    pub referenced_events: Vec<EventMetadata>,
    pub more_events: Vec<EventMetadata>,
}

/// Embeds the query, retrieves the nearest events, asks the model for a
/// cited summary, and partitions the matches by citation.
#[derive(Clone)]
pub struct SearchService {
    embeddings: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    llm: Arc<dyn TextCompletion>,
    top_k: usize,
}

impl SearchService {
    pub fn new(
        embeddings: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        llm: Arc<dyn TextCompletion>,
        top_k: usize,
    ) -> Self {
        Self {
            embeddings,
            index,
            llm,
            top_k,
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        if query.trim().is_empty() {
            return Err(EncoreError::Validation("Query cannot be empty".to_string()));
        }

        let vector = self.embeddings.embed_single(query).await?;

        // Retrieval failures degrade to an empty context; the model is
        // still asked, and the client still gets a response.
        let matches = match self.index.query(vector, self.top_k).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Vector store query failed: {}", e);
                Vec::new()
            }
        };

        let prompt = prompts::event_summary_prompt(query, &matches);
        let raw = self.llm.complete(&prompt).await?;
        let output = CompletionOutput::parse(&raw);

        let events: Vec<EventMetadata> = matches.into_iter().map(|m| m.metadata).collect();
        let (referenced_events, more_events) = partition_by_citation(events, &output.cited_urls);

        Ok(SearchOutcome {
            summary: output.summary.unwrap_or_default(),
            referenced_events,
            more_events,
        })
    }
}

/// Split retrieved events into (cited, uncited), both in retrieval order.
fn partition_by_citation(
    events: Vec<EventMetadata>,
    cited_urls: &[String],
) -> (Vec<EventMetadata>, Vec<EventMetadata>) {
    let cited: HashSet<&str> = cited_urls.iter().map(String::as_str).collect();
    events
        .into_iter()
        .partition(|event| cited.contains(event.url.as_str()))
}
