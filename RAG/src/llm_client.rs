use anyhow::Result;
use async_trait::async_trait;

/// A remote text-completion model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
