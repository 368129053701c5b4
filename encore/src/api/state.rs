use std::sync::Arc;

use crate::config::Config;
use crate::embeddings::Embedder;
use crate::llm::TextCompletion;
use crate::services::SearchService;
use crate::vector_store::VectorIndex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<dyn TextCompletion>,
    pub search: SearchService,
}

impl AppState {
    pub fn new(
        config: Config,
        embeddings: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        llm: Arc<dyn TextCompletion>,
    ) -> Self {
        let config = Arc::new(config);
        let search = SearchService::new(
            embeddings,
            index,
            llm.clone(),
            config.vector_store.top_k,
        );

        Self {
            config,
            llm,
            search,
        }
    }
}
