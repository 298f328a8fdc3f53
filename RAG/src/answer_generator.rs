use crate::llm_client::LlmClient;
use anyhow::Result;
use std::sync::Arc;

pub struct AnswerGenerator {
    client: Arc<dyn LlmClient>,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn generate(&self, context: &str, query: &str) -> Result<String> {
        let prompt = build_prompt(context, query);
        let answer = self.client.complete(&prompt).await?;
        Ok(answer.trim().to_string())
    }
}

pub fn build_prompt(context: &str, query: &str) -> String {
    format!(
        r#"You are an expert document analyst. Your task is to analyze the provided document text and provide a concise, factual, and accurate answer to the user's query.

The user is asking about a PDF document. Base your response ONLY on the provided text.
If the text does not contain the answer, state that clearly.

DOCUMENT TEXT (Start of Document):
---
{context}
---

USER QUERY: "{query}"

ANSWER:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingClient {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmClient for RecordingClient {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl LlmClient for FailingClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(anyhow::anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn prompt_carries_context_and_query() {
        let prompt = build_prompt("The report covers Q3 revenue.", "What period is covered?");

        assert!(prompt.contains("Base your response ONLY on the provided text."));
        assert!(prompt.contains("If the text does not contain the answer, state that clearly."));
        assert!(prompt.contains("---\nThe report covers Q3 revenue.\n---"));
        assert!(prompt.contains("USER QUERY: \"What period is covered?\""));
        assert!(prompt.ends_with("ANSWER:"));
    }

    #[tokio::test]
    async fn answer_is_trimmed() {
        let client = Arc::new(RecordingClient {
            reply: "\n  It covers Q3.  \n".to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let generator = AnswerGenerator::new(client.clone());

        let answer = generator.generate("context", "query").await.unwrap();

        assert_eq!(answer, "It covers Q3.");
        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("context"));
    }

    #[tokio::test]
    async fn client_errors_propagate() {
        let generator = AnswerGenerator::new(Arc::new(FailingClient));
        let err = generator.generate("context", "query").await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
