/// LLM Client — the single point of entry for all hosted-model calls.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// Flows reach the model only through `ModelClient`, which is injected
/// into the dispatcher so tests can substitute a scripted client.
///
/// The client performs exactly one HTTP request per call. Tier fallback
/// lives in `dispatch`, never here.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
#[cfg(test)]
pub mod testing;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One model call: which tier, what instructions, what prompt.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
}

/// Boundary to the hosted model. Returns the raw text of the model's reply.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: ModelRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Hosted-model client speaking the `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: ModelRequest<'_>) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_error_message(body),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                request.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.text().ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of the provider's error envelope, or keeps the raw body.
fn extract_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => inner
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(inner.trim_start()),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_error_message_from_envelope() {
        let body = r#"{"error": {"code": 503, "message": "The model is overloaded. Please try again later.", "status": "UNAVAILABLE"}}"#;
        assert_eq!(
            extract_error_message(body.to_string()),
            "The model is overloaded. Please try again later."
        );
    }

    #[test]
    fn test_extract_error_message_keeps_raw_body() {
        assert_eq!(extract_error_message("upstream down".to_string()), "upstream down");
    }

    #[test]
    fn test_api_error_display_carries_status() {
        let err = LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (status 429): Resource has been exhausted"
        );
    }

    #[test]
    fn test_response_text_joins_first_candidate_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            "k".to_string(),
            "http://localhost:9000/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
