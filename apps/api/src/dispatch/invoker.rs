use std::ops::Deref;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::dispatch::flow::Flow;
use crate::dispatch::shape::ShapeError;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{strip_json_fences, LlmError, ModelClient, ModelRequest};

/// A single failed attempt against one model tier.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("prompt rendering failed: {0}")]
    Render(#[source] serde_json::Error),

    #[error("model returned malformed JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("model output rejected: {0}")]
    Shape(#[from] ShapeError),
}

/// A reply that passed the shape check and the flow's own verification.
///
/// Serializes as the model's JSON exactly as parsed: unknown fields, integer
/// numbers and explicit nulls all survive. The typed view is read-only and
/// reached through `Deref`.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    raw: Value,
    typed: T,
}

impl<T> Checked<T> {
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl<T> Deref for Checked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.typed
    }
}

impl<T> Serialize for Checked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Renders a flow's prompt, calls one model, and checks what comes back.
/// Never retries; a failure here is one failed attempt.
pub struct PromptInvoker<'a> {
    client: &'a dyn ModelClient,
}

impl<'a> PromptInvoker<'a> {
    pub fn new(client: &'a dyn ModelClient) -> Self {
        Self { client }
    }

    pub async fn invoke<F: Flow>(
        &self,
        input: &F::Input,
        model: &str,
    ) -> Result<Checked<F::Output>, InvocationError> {
        info!("Invoking flow {} with model {}", F::NAME, model);

        let prompt = F::render(input).map_err(InvocationError::Render)?;
        let system = system_prompt(F::ROLE);

        let text = self
            .client
            .generate(ModelRequest {
                model,
                system: &system,
                prompt: &prompt,
            })
            .await?;

        let value: Value =
            serde_json::from_str(strip_json_fences(&text)).map_err(InvocationError::Parse)?;
        F::output_shape().check(&value)?;

        let typed = <F::Output as Deserialize>::deserialize(&value).map_err(InvocationError::Parse)?;
        F::verify(input, &typed)?;

        Ok(Checked { raw: value, typed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::fixtures::{EchoFlow, EchoInput, EchoOutput};
    use crate::llm_client::testing::ScriptedClient;
    use serde_json::json;

    fn input() -> EchoInput {
        EchoInput {
            topic: "robotics".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invoke_parses_conforming_reply() {
        let client = ScriptedClient::new()
            .reply_json("pro", json!({"summary": "Robots", "tags": ["ai", "hardware"]}));
        let output = PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap();

        assert_eq!(
            *output,
            EchoOutput {
                summary: "Robots".to_string(),
                tags: vec!["ai".to_string(), "hardware".to_string()],
                note: None,
            }
        );
    }

    #[tokio::test]
    async fn test_invoke_keeps_parsed_value_verbatim() {
        let raw = json!({"summary": "Robots", "tags": [], "note": null, "wordCount": 12});
        let client = ScriptedClient::new().reply_json("pro", raw.clone());
        let output = PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap();

        assert_eq!(output.note, None);
        assert_eq!(output.raw(), &raw);
        assert_eq!(serde_json::to_string(&output).unwrap(), raw.to_string());
    }

    #[tokio::test]
    async fn test_invoke_sends_rendered_prompt_and_system_instruction() {
        let client = ScriptedClient::new().reply_json("pro", json!({"summary": "x", "tags": []}));
        PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "pro");
        assert_eq!(calls[0].prompt, "Summarize robotics");
        assert!(calls[0].system.starts_with("You summarize topics."));
        assert!(calls[0].system.contains("valid JSON only"));
    }

    #[tokio::test]
    async fn test_invoke_strips_code_fences() {
        let client = ScriptedClient::new()
            .reply_text("pro", "```json\n{\"summary\": \"x\", \"tags\": []}\n```");
        assert!(PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_invoke_rejects_non_json_reply() {
        let client = ScriptedClient::new().reply_text("pro", "Sure! Here is your summary.");
        let err = PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::Parse(_)));
    }

    #[tokio::test]
    async fn test_invoke_rejects_missing_required_field() {
        let client = ScriptedClient::new().reply_json("pro", json!({"tags": []}));
        let err = PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::Shape(_)));
        assert_eq!(err.to_string(), "model output rejected: field `summary` is missing");
    }

    #[tokio::test]
    async fn test_invoke_runs_semantic_verification() {
        let client = ScriptedClient::new().reply_json("pro", json!({"summary": "", "tags": []}));
        let err = PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::Shape(_)));
    }

    #[tokio::test]
    async fn test_invoke_surfaces_client_error_message() {
        let client = ScriptedClient::new().fail("pro", 503, "The model is overloaded.");
        let err = PromptInvoker::new(&client)
            .invoke::<EchoFlow>(&input(), "pro")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "model call failed: API error (status 503): The model is overloaded."
        );
    }
}
