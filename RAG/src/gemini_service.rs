use crate::llm_client::LlmClient;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Low randomness keeps answers close to the document text.
pub const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: TEMPERATURE,
            max_output_tokens: None,
        }
    }
}

impl GeminiConfig {
    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL` and
    /// `GEMINI_MAX_OUTPUT_TOKENS`. A missing key is not an error here.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: api_key_from(env::var("GEMINI_API_KEY").ok()),
            model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: non_empty_var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            temperature: defaults.temperature,
            max_output_tokens: non_empty_var("GEMINI_MAX_OUTPUT_TOKENS").and_then(|v| {
                v.parse()
                    .map_err(|e| log::warn!("Ignoring GEMINI_MAX_OUTPUT_TOKENS={}: {}", v, e))
                    .ok()
            }),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Any non-empty value counts as a key, whitespace included.
fn api_key_from(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        )
    }
}

#[async_trait]
impl LlmClient for GeminiService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            }),
        };

        log::debug!("Calling Gemini model {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint(api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Gemini API error ({}): {}", status, error_text));
        }

        let gemini_response: GeminiResponse = response.json().await?;

        gemini_response
            .first_text()
            .ok_or_else(|| anyhow::anyhow!("Gemini API returned no answer text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn generate(
        Path(target): Path<String>,
        Query(params): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if params.get("key").map(String::as_str) != Some("test-key") {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": { "message": "API key not valid" } })),
            );
        }

        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap_or(-1.0);

        if prompt == "empty" {
            return (StatusCode::OK, Json(json!({ "candidates": [] })));
        }

        let reply = format!("{target}|{temperature:.1}|{prompt}");
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{ "content": { "parts": [{ "text": reply }, { "text": "!" }] } }]
            })),
        )
    }

    async fn spawn_stub() -> String {
        let app = Router::new().route("/v1beta/models/:target", post(generate));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn service(base_url: String, api_key: Option<&str>) -> GeminiService {
        GeminiService::new(GeminiConfig {
            api_key: api_key.map(str::to_string),
            base_url,
            ..GeminiConfig::default()
        })
    }

    #[tokio::test]
    async fn sends_prompt_model_and_temperature() {
        let base_url = spawn_stub().await;
        let answer = service(base_url, Some("test-key"))
            .complete("hello")
            .await
            .unwrap();

        assert_eq!(answer, "gemini-2.5-flash:generateContent|0.2|hello!");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base_url = spawn_stub().await;
        let err = service(base_url, Some("wrong-key"))
            .complete("hello")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("403"), "{message}");
        assert!(message.contains("API key not valid"), "{message}");
    }

    #[tokio::test]
    async fn empty_candidates_are_an_error() {
        let base_url = spawn_stub().await;
        let err = service(base_url, Some("test-key"))
            .complete("empty")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no answer text"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let err = service("http://127.0.0.1:9".to_string(), None)
            .complete("hello")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "GEMINI_API_KEY is not set");
    }

    #[test]
    fn only_an_empty_key_counts_as_missing() {
        assert_eq!(api_key_from(None), None);
        assert_eq!(api_key_from(Some(String::new())), None);
        assert_eq!(api_key_from(Some("   ".to_string())), Some("   ".to_string()));
        assert_eq!(api_key_from(Some("abc".to_string())), Some("abc".to_string()));
    }

    #[test]
    fn request_uses_camel_case_generation_config() {
        let request = GeminiRequest {
            contents: vec![],
            generation_config: Some(GeminiGenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: None,
            }),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert!(value["generationConfig"]["temperature"].is_number());
        assert!(value["generationConfig"].get("maxOutputTokens").is_none());
    }
}
