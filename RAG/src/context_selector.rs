use crate::text_splitter::RecursiveCharacterTextSplitter;
use anyhow::{bail, Result};

pub const CHUNK_SIZE: usize = 12_000;
pub const CHUNK_OVERLAP: usize = 1_500;
pub const MAX_CONTEXT_CHUNKS: usize = 4;
pub const CONTEXT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_chunks: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
            max_chunks: MAX_CONTEXT_CHUNKS,
        }
    }
}

/// The bounded slice of a document that is sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub text: String,
    pub chunks_used: usize,
    pub total_chunks: usize,
}

/// Picks the leading chunks of a document as model context.
///
/// Selection is positional: the beginning of the document (abstract,
/// introduction) is kept and the rest is discarded, whatever the query.
pub struct ContextSelector {
    splitter: RecursiveCharacterTextSplitter,
    max_chunks: usize,
}

impl ContextSelector {
    pub fn new(config: SelectorConfig) -> Result<Self> {
        if config.max_chunks == 0 {
            bail!("context selector needs at least one chunk");
        }

        Ok(Self {
            splitter: RecursiveCharacterTextSplitter::new(config.chunk_size, config.chunk_overlap)?,
            max_chunks: config.max_chunks,
        })
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.splitter.split_text(text)
    }

    pub fn select(&self, text: &str) -> ContextWindow {
        let chunks = self.chunk(text);
        let total_chunks = chunks.len();
        let selected: Vec<String> = chunks.into_iter().take(self.max_chunks).collect();

        ContextWindow {
            chunks_used: selected.len(),
            total_chunks,
            text: selected.join(CONTEXT_SEPARATOR),
        }
    }
}
