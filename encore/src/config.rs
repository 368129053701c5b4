use chrono::NaiveDate;
use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ticketing: TicketingConfig,
    pub embeddings: EmbeddingsConfig,
    pub vector_store: VectorStoreConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream ticketing API settings plus the ingestion schedule: the date
/// range to cover, page sizing, and the fixed delays between requests.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketingConfig {
    pub base_url: String,
    pub api_key: String,
    pub classification: String,
    pub state_code: String,
    pub page_size: u32,
    /// Hard cap on results per (borough, window) pair; 1000 at the default
    /// page size of 100 means at most 10 pages.
    pub max_results_per_window: u32,
    pub page_delay_ms: u64,
    pub window_delay_ms: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub namespace: String,
    pub top_k: usize,
    pub upsert_batch_size: usize,
    pub timeout_secs: u64,
}

/// Language model used to summarize retrieved events. Optional: without
/// `LLM_MODEL` the search endpoint reports the model as unavailable.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub binary: String,
    pub model: String,
    pub timeout_secs: u64,
}

fn default_date(var: &str, fallback: (i32, u32, u32)) -> NaiveDate {
    let (y, m, d) = fallback;
    let fallback = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    parse_env_or(var, fallback)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("ENCORE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("ENCORE_PORT", 3000),
            },
            ticketing: TicketingConfig {
                base_url: env::var("TICKETING_BASE_URL")
                    .unwrap_or_else(|_| "https://app.ticketmaster.com/discovery/v2".to_string()),
                api_key: env::var("TICKETMASTER_API_KEY").unwrap_or_default(),
                classification: env::var("TICKETING_CLASSIFICATION")
                    .unwrap_or_else(|_| "music".to_string()),
                state_code: env::var("TICKETING_STATE_CODE").unwrap_or_else(|_| "NY".to_string()),
                page_size: parse_env_or("TICKETING_PAGE_SIZE", 100),
                max_results_per_window: parse_env_or("TICKETING_WINDOW_CAP", 1000),
                page_delay_ms: parse_env_or("TICKETING_PAGE_DELAY_MS", 500),
                window_delay_ms: parse_env_or("TICKETING_WINDOW_DELAY_MS", 2000),
                start_date: default_date("INGEST_START_DATE", (2025, 3, 1)),
                end_date: default_date("INGEST_END_DATE", (2026, 1, 1)),
                timeout_secs: parse_env_or("TICKETING_TIMEOUT", 30),
            },
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "all-MiniLM-L6-v2".to_string()),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", 384),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", 256),
            },
            vector_store: VectorStoreConfig {
                base_url: env::var("VECTOR_STORE_URL")
                    .unwrap_or_else(|_| "http://localhost:5080".to_string()),
                api_key: env::var("VECTOR_STORE_API_KEY").ok(),
                namespace: env::var("VECTOR_STORE_NAMESPACE")
                    .unwrap_or_else(|_| "events-rag384".to_string()),
                top_k: parse_env_or("SEARCH_TOP_K", 20),
                upsert_batch_size: parse_env_or("UPSERT_BATCH_SIZE", 50),
                timeout_secs: parse_env_or("VECTOR_STORE_TIMEOUT", 30),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                binary: env::var("LLM_BINARY").unwrap_or_else(|_| "ollama".to_string()),
                model,
                timeout_secs: parse_env_or("LLM_TIMEOUT", 120),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
