mod provider;

pub use provider::{Embedder, EmbeddingProvider};
