//! Minimal flows used by the dispatch tests.

use serde::{Deserialize, Serialize};

use crate::dispatch::convention::ResponseConvention;
use crate::dispatch::flow::{require_text, AttemptPolicy, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape, ShapeError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoInput {
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoOutput {
    pub summary: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub struct EchoFlow;

impl Flow for EchoFlow {
    type Input = EchoInput;
    type Output = EchoOutput;

    const NAME: &'static str = "echo";
    const ROLE: &'static str = "You summarize topics.";
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &EchoInput) -> Result<(), ValidationError> {
        require_text("topic", &input.topic)
    }

    fn render(input: &EchoInput) -> serde_json::Result<String> {
        Ok(format!("Summarize {}", input.topic))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("summary", Kind::String)
            .required("tags", Kind::array(Kind::String))
            .optional("note", Kind::String)
    }

    fn verify(_input: &EchoInput, output: &EchoOutput) -> Result<(), ShapeError> {
        if output.summary.trim().is_empty() {
            return Err(ShapeError::invalid("summary", "must not be empty"));
        }
        Ok(())
    }
}

/// Same contract as `EchoFlow`, restricted to one attempt.
pub struct SingleEchoFlow;

impl Flow for SingleEchoFlow {
    type Input = EchoInput;
    type Output = EchoOutput;

    const NAME: &'static str = "single-echo";
    const ROLE: &'static str = EchoFlow::ROLE;
    const ATTEMPTS: AttemptPolicy = AttemptPolicy::SingleAttempt;
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &EchoInput) -> Result<(), ValidationError> {
        EchoFlow::validate(input)
    }

    fn render(input: &EchoInput) -> serde_json::Result<String> {
        EchoFlow::render(input)
    }

    fn output_shape() -> Shape {
        EchoFlow::output_shape()
    }
}
