use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Extracted text shorter than this (after trimming) is treated as unusable.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Page texts joined with a single space.
    Text(String),
    /// The file could not be loaded or parsed.
    Failed(String),
}

impl ExtractionOutcome {
    /// Returns the text only if there is enough of it to answer from.
    pub fn into_usable_text(self) -> Option<String> {
        match self {
            ExtractionOutcome::Text(text) if is_usable(&text) => Some(text),
            _ => None,
        }
    }
}

pub fn is_usable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_TEXT_CHARS
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> ExtractionOutcome;
}

/// PDF text extraction backed by `pdf-extract`.
#[derive(Debug, Default)]
pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocumentProcessor {
    fn extract(&self, path: &Path) -> ExtractionOutcome {
        log::info!("Processing PDF: {}", path.display());

        let pages = match catch_parser_panic(|| pdf_extract::extract_text_by_pages(path)) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                log::error!("Error loading/extracting PDF {}: {}", path.display(), e);
                return ExtractionOutcome::Failed(e.to_string());
            }
            Err(reason) => {
                log::error!("PDF parser panicked on {}: {}", path.display(), reason);
                return ExtractionOutcome::Failed(reason);
            }
        };

        let text = pages.join(" ");
        log::info!(
            "Extracted {} characters from {} pages",
            text.chars().count(),
            pages.len()
        );
        ExtractionOutcome::Text(text)
    }
}

/// Runs `parse`, turning a panic into its message.
fn catch_parser_panic<T>(parse: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(parse)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("parser panicked: {}", message)
    })
}
