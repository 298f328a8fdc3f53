use crate::answer_generator::AnswerGenerator;
use crate::context_selector::ContextSelector;
use anyhow::Result;

/// Answers a query about one document: bounds the text to a context window,
/// then asks the model.
pub struct QueryService {
    selector: ContextSelector,
    generator: AnswerGenerator,
}

impl QueryService {
    pub fn new(selector: ContextSelector, generator: AnswerGenerator) -> Self {
        Self {
            selector,
            generator,
        }
    }

    pub async fn answer(&self, document_text: &str, query: &str) -> Result<String> {
        let context = self.selector.select(document_text);
        log::info!(
            "Using {} of {} chunks ({} characters) as context",
            context.chunks_used,
            context.total_chunks,
            context.text.chars().count()
        );

        self.generator.generate(&context.text, query).await
    }
}
