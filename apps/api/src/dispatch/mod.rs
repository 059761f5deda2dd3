// Prompt invocation core: one generic invoker and dispatcher shared by
// every flow. Flows contribute only declarations (see flow.rs).

pub mod classify;
pub mod convention;
pub mod dispatcher;
#[cfg(test)]
pub mod fixtures;
pub mod flow;
pub mod invoker;
pub mod selector;
pub mod shape;

pub use convention::{DispatchOutcome, ResponseConvention, Tagged};
pub use dispatcher::{Dispatcher, TerminalFailure};
pub use flow::{AttemptPolicy, Flow, ValidationError};
pub use invoker::{Checked, PromptInvoker};
pub use selector::ModelSelector;

use crate::llm_client::ModelClient;

/// Runs a flow under its declared attempt policy.
///
/// `Fallback` flows go through the `Dispatcher`. `SingleAttempt` flows call
/// the invoker once against the primary tier and return its result directly.
pub async fn run_flow<F: Flow>(
    client: &dyn ModelClient,
    selector: &ModelSelector,
    input: &F::Input,
) -> DispatchOutcome<Checked<F::Output>> {
    match F::ATTEMPTS {
        AttemptPolicy::Fallback => Dispatcher::new(client, selector).dispatch::<F>(input).await,
        AttemptPolicy::SingleAttempt => {
            let model = selector.primary();
            match PromptInvoker::new(client).invoke::<F>(input, model).await {
                Ok(output) => DispatchOutcome::Succeeded(output),
                Err(err) => {
                    let failure = TerminalFailure::new(F::NAME, model, 1, err.to_string());
                    tracing::error!("Flow {} failed on {}: {}", F::NAME, model, failure.message);
                    DispatchOutcome::Failed(failure)
                }
            }
        }
    }
}
