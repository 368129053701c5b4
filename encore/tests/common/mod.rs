#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use encore::config::{
    Config, EmbeddingsConfig, ServerConfig, TicketingConfig, VectorStoreConfig,
};
use encore::embeddings::Embedder;
use encore::error::{EncoreError, Result};
use encore::llm::TextCompletion;
use encore::models::{Borough, Event, EventMatch, EventMetadata, IndexStats, VectorRecord};
use encore::vector_store::VectorIndex;

pub fn date(ymd: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap()
}

pub fn ticketing_config(
    base_url: &str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
) -> TicketingConfig {
    TicketingConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        classification: "music".to_string(),
        state_code: "NY".to_string(),
        page_size: 100,
        max_results_per_window: 1000,
        page_delay_ms: 0,
        window_delay_ms: 0,
        start_date: date(start),
        end_date: date(end),
        timeout_secs: 5,
    }
}

pub fn vector_store_config(base_url: &str) -> VectorStoreConfig {
    VectorStoreConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        namespace: "events-rag384".to_string(),
        top_k: 20,
        upsert_batch_size: 50,
        timeout_secs: 5,
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        ticketing: ticketing_config("http://localhost:0", (2025, 3, 1), (2025, 4, 1)),
        embeddings: EmbeddingsConfig {
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 256,
        },
        vector_store: vector_store_config("http://localhost:0"),
        llm: None,
    }
}

pub fn sample_event(n: usize) -> Event {
    Event {
        id: format!("evt-{n}"),
        name: format!("Event {n}"),
        date: "2025-05-01".to_string(),
        url: format!("https://tickets.example/{n}"),
        venue: "Venue".to_string(),
        info: "Info".to_string(),
        borough: Borough::Brooklyn,
        image: None,
    }
}

pub fn sample_match(n: usize) -> EventMatch {
    EventMatch {
        id: format!("evt-{n}"),
        score: 1.0 - (n as f32) * 0.01,
        metadata: EventMetadata::from(&sample_event(n)),
    }
}

/// Embedder stub: returns a fixed small vector, failing for any text that
/// contains `fail_marker`.
pub struct StubEmbedder {
    pub fail_marker: Option<String>,
}

impl StubEmbedder {
    pub fn ok() -> Self {
        Self { fail_marker: None }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
        }
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if let Some(marker) = &self.fail_marker {
            if texts.iter().any(|t| t.contains(marker.as_str())) {
                return Err(EncoreError::Embedding("stub embedding failure".to_string()));
            }
        }
        Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
    }

    fn dimensions(&self) -> usize {
        3
    }
}

/// Vector index stub that records upsert batches and serves canned query
/// matches.
pub struct RecordingIndex {
    pub upserts: Mutex<Vec<Vec<VectorRecord>>>,
    pub upsert_calls: AtomicUsize,
    pub matches: Vec<EventMatch>,
    pub fail_query: bool,
    pub fail_upsert_at: Option<usize>,
}

impl RecordingIndex {
    pub fn empty() -> Self {
        Self::with_matches(Vec::new())
    }

    pub fn with_matches(matches: Vec<EventMatch>) -> Self {
        Self {
            upserts: Mutex::new(Vec::new()),
            upsert_calls: AtomicUsize::new(0),
            matches,
            fail_query: false,
            fail_upsert_at: None,
        }
    }

    pub fn failing_query() -> Self {
        Self {
            fail_query: true,
            ..Self::empty()
        }
    }

    pub fn failing_upsert_at(call: usize) -> Self {
        Self {
            fail_upsert_at: Some(call),
            ..Self::empty()
        }
    }

    pub fn stored_records(&self) -> Vec<VectorRecord> {
        self.upserts.lock().unwrap().iter().flatten().cloned().collect()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.upserts.lock().unwrap().iter().map(Vec::len).collect()
    }
}

#[async_trait]
impl VectorIndex for RecordingIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        let call = self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_upsert_at == Some(call) {
            return Err(EncoreError::VectorStore("stub upsert failure".to_string()));
        }
        self.upserts.lock().unwrap().push(records.to_vec());
        Ok(())
    }

    async fn query(&self, _vector: Vec<f32>, top_k: usize) -> Result<Vec<EventMatch>> {
        if self.fail_query {
            return Err(EncoreError::VectorStore("stub query failure".to_string()));
        }
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }

    async fn delete_all(&self) -> Result<()> {
        Ok(())
    }

    async fn stats(&self) -> Result<IndexStats> {
        Ok(IndexStats {
            vector_count: self.stored_records().len() as u64,
        })
    }
}

/// Completion stub returning a fixed output string.
pub struct StubCompletion {
    pub output: String,
}

impl StubCompletion {
    pub fn returning(output: &str) -> Self {
        Self {
            output: output.to_string(),
        }
    }
}

#[async_trait]
impl TextCompletion for StubCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.output.clone())
    }

    fn is_available(&self) -> bool {
        true
    }
}
