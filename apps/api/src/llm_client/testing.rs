//! Scripted `ModelClient` for tests. Replies are queued per model and every
//! call is recorded in order, so tests can assert exactly which tiers ran.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{LlmError, ModelClient, ModelRequest};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub system: String,
    pub prompt: String,
}

#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<HashMap<String, VecDeque<Result<String, LlmError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw text reply for `model`.
    pub fn reply_text(self, model: &str, text: impl Into<String>) -> Self {
        self.push(model, Ok(text.into()));
        self
    }

    /// Queues a JSON reply for `model`.
    pub fn reply_json(self, model: &str, value: Value) -> Self {
        self.reply_text(model, value.to_string())
    }

    /// Queues an API failure for `model`.
    pub fn fail(self, model: &str, status: u16, message: &str) -> Self {
        self.push(
            model,
            Err(LlmError::Api {
                status,
                message: message.to_string(),
            }),
        );
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }

    pub fn calls_to(&self, model: &str) -> usize {
        self.calls().iter().filter(|c| c.model == model).count()
    }

    fn push(&self, model: &str, reply: Result<String, LlmError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(&self, request: ModelRequest<'_>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: request.model.to_string(),
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
        });

        self.replies
            .lock()
            .unwrap()
            .get_mut(request.model)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 400,
                    message: format!("no scripted reply for {}", request.model),
                })
            })
    }
}
