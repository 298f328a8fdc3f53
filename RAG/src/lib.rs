pub mod answer_generator;
pub mod context_selector;
pub mod document_processor;
pub mod gemini_service;
pub mod llm_client;
pub mod models;
pub mod query_service;
pub mod text_splitter;

pub use answer_generator::AnswerGenerator;
pub use context_selector::{ContextSelector, ContextWindow, SelectorConfig};
pub use document_processor::{DocumentProcessor, ExtractionOutcome, TextExtractor};
pub use gemini_service::{GeminiConfig, GeminiService};
pub use llm_client::LlmClient;
pub use query_service::QueryService;
pub use text_splitter::RecursiveCharacterTextSplitter;
