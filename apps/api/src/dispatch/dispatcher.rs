//! Resilient dispatch across model tiers.
//!
//! Per invocation: start at tier 0; on success stop; on a transient failure
//! advance to the next tier if one exists; otherwise stop with a terminal
//! failure. Attempts are strictly sequential and never revisit a tier.

use thiserror::Error;
use tracing::{error, warn};

use crate::dispatch::classify::{classify, ErrorClass};
use crate::dispatch::convention::DispatchOutcome;
use crate::dispatch::flow::Flow;
use crate::dispatch::invoker::{Checked, PromptInvoker};
use crate::dispatch::selector::ModelSelector;
use crate::llm_client::ModelClient;

/// The failure a caller sees once no further tier will be tried.
#[derive(Debug, Clone, Error)]
#[error("{flow} failed on {model} after {attempts} attempt(s): {message}")]
pub struct TerminalFailure {
    pub flow: &'static str,
    /// The tier whose failure ended the invocation.
    pub model: String,
    pub attempts: usize,
    /// Classification of the last failure. `Transient` here means every
    /// tier was exhausted on overload or rate limiting.
    pub last_class: ErrorClass,
    pub message: String,
}

impl TerminalFailure {
    pub fn new(flow: &'static str, model: &str, attempts: usize, message: String) -> Self {
        Self {
            flow,
            model: model.to_string(),
            attempts,
            last_class: classify(&message),
            message,
        }
    }
}

pub struct Dispatcher<'a> {
    invoker: PromptInvoker<'a>,
    selector: &'a ModelSelector,
}

impl<'a> Dispatcher<'a> {
    pub fn new(client: &'a dyn ModelClient, selector: &'a ModelSelector) -> Self {
        Self {
            invoker: PromptInvoker::new(client),
            selector,
        }
    }

    pub async fn dispatch<F: Flow>(
        &self,
        input: &F::Input,
    ) -> DispatchOutcome<Checked<F::Output>> {
        let models = self.selector.models();
        let mut index = 0;

        loop {
            let Some(model) = models.get(index) else {
                return DispatchOutcome::Failed(TerminalFailure::new(
                    F::NAME,
                    "",
                    index,
                    "no model tier configured".to_string(),
                ));
            };

            let err = match self.invoker.invoke::<F>(input, model).await {
                Ok(output) => return DispatchOutcome::Succeeded(output),
                Err(err) => err,
            };

            let message = err.to_string();
            let has_next = index + 1 < models.len();
            if classify(&message) == ErrorClass::Transient && has_next {
                warn!(
                    "Flow {} hit a transient failure on {}, falling back to {}: {}",
                    F::NAME,
                    model,
                    models[index + 1],
                    message
                );
                index += 1;
                continue;
            }

            let failure = TerminalFailure::new(F::NAME, model, index + 1, message);
            error!(
                "Flow {} failed on {} after {} attempt(s): {}",
                failure.flow, failure.model, failure.attempts, failure.message
            );
            return DispatchOutcome::Failed(failure);
        }
    }
}
