//! The two ways a flow hands a terminal failure back to its caller.
//!
//! The core always produces a `DispatchOutcome`. Callers that expect an
//! error to propagate use `into_result`; callers that expect a value in
//! either case use `into_tagged`, which serializes a failure as
//! `{"error": true, "message": ...}` next to the plain success shape.

use serde::{Deserialize, Serialize};

use crate::dispatch::dispatcher::TerminalFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseConvention {
    /// Terminal failures propagate as errors.
    Throw,
    /// Terminal failures come back as a tagged error record.
    Tagged,
}

#[derive(Debug)]
pub enum DispatchOutcome<T> {
    Succeeded(T),
    Failed(TerminalFailure),
}

impl<T> DispatchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Succeeded(_))
    }

    pub fn into_result(self) -> Result<T, TerminalFailure> {
        match self {
            DispatchOutcome::Succeeded(output) => Ok(output),
            DispatchOutcome::Failed(failure) => Err(failure),
        }
    }

    pub fn into_tagged(self) -> Tagged<T> {
        match self {
            DispatchOutcome::Succeeded(output) => Tagged::Success(output),
            DispatchOutcome::Failed(failure) => Tagged::Error(ErrorRecord::new(failure.message)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: bool,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Tagged<T> {
    Success(T),
    Error(ErrorRecord),
}

impl<T> Tagged<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Tagged::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::classify::ErrorClass;
    use serde_json::json;

    fn failure() -> TerminalFailure {
        TerminalFailure {
            flow: "recommend-stream",
            model: "flash".to_string(),
            attempts: 2,
            last_class: ErrorClass::Transient,
            message: "model call failed: API error (status 503): overloaded".to_string(),
        }
    }

    #[test]
    fn test_tagged_success_serializes_as_plain_output() {
        let tagged = DispatchOutcome::Succeeded(json!({"reasoning": "ok"})).into_tagged();
        assert!(!tagged.is_error());
        assert_eq!(serde_json::to_value(&tagged).unwrap(), json!({"reasoning": "ok"}));
    }

    #[test]
    fn test_tagged_failure_serializes_as_error_record() {
        let tagged = DispatchOutcome::<serde_json::Value>::Failed(failure()).into_tagged();
        assert!(tagged.is_error());
        assert_eq!(
            serde_json::to_value(&tagged).unwrap(),
            json!({
                "error": true,
                "message": "model call failed: API error (status 503): overloaded"
            })
        );
    }

    #[test]
    fn test_into_result_propagates_failure() {
        let outcome = DispatchOutcome::<u32>::Failed(failure());
        assert!(!outcome.is_success());
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.attempts, 2);
        assert_eq!(err.model, "flash");
    }

    #[test]
    fn test_into_result_returns_success_value() {
        assert_eq!(DispatchOutcome::Succeeded(7).into_result().unwrap(), 7);
    }
}
