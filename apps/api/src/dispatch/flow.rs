//! Per-flow configuration: what goes into the prompt, what must come back,
//! and how failures are surfaced. Flows are zero-sized marker types; all
//! of their behaviour is declared through this trait.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dispatch::convention::ResponseConvention;
use crate::dispatch::shape::{Shape, ShapeError};

/// Whether a flow may fall back to the next model tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPolicy {
    /// Try tiers in selector order, advancing on transient failures.
    Fallback,
    /// One call against the primary tier, result returned as-is.
    SingleAttempt,
}

/// Input rejected before any model is called.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub trait Flow: Send + Sync + 'static {
    type Input: DeserializeOwned + Send + Sync + 'static;
    type Output: DeserializeOwned + Send + 'static;

    /// Route segment and log label, e.g. `recommend-stream`.
    const NAME: &'static str;
    /// Role description placed in the system instruction.
    const ROLE: &'static str;
    const ATTEMPTS: AttemptPolicy = AttemptPolicy::Fallback;
    const CONVENTION: ResponseConvention;

    /// Business-rule checks on the input. Runs before dispatch.
    fn validate(input: &Self::Input) -> Result<(), ValidationError>;

    /// Merges the input into the flow's prompt template.
    fn render(input: &Self::Input) -> serde_json::Result<String>;

    /// Structural contract for the model's JSON reply.
    fn output_shape() -> Shape;

    /// Semantic checks that a shape alone cannot express.
    fn verify(_input: &Self::Input, _output: &Self::Output) -> Result<(), ShapeError> {
        Ok(())
    }
}

/// Rejects blank text fields.
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Rejects marks or scores outside 0–100.
pub fn require_percentage(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::new(field, "must be between 0 and 100"));
    }
    Ok(())
}
