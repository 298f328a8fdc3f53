use crate::config::AppConfig;
use anyhow::Result;
use pdf_rag::{
    AnswerGenerator, ContextSelector, DocumentProcessor, GeminiService, LlmClient, QueryService,
    SelectorConfig, TextExtractor,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn TextExtractor>,
    pub query_service: Arc<QueryService>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub api_key_loaded: bool,
}

impl AppState {
    /// Wires the production extractor and Gemini client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let gemini = GeminiService::new(config.gemini.clone());
        log::info!("Using Gemini model {}", gemini.model());

        let mut state = Self::new(
            Arc::new(DocumentProcessor::new()),
            Arc::new(gemini),
            config.upload_dir.clone(),
        )?;
        state.max_upload_bytes = config.max_upload_bytes;
        state.api_key_loaded = config.gemini.has_api_key();
        Ok(state)
    }

    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        llm: Arc<dyn LlmClient>,
        upload_dir: PathBuf,
    ) -> Result<Self> {
        let query_service = QueryService::new(
            ContextSelector::new(SelectorConfig::default())?,
            AnswerGenerator::new(llm),
        );

        Ok(Self {
            extractor,
            query_service: Arc::new(query_service),
            upload_dir,
            max_upload_bytes: crate::config::DEFAULT_MAX_UPLOAD_BYTES,
            api_key_loaded: false,
        })
    }
}
