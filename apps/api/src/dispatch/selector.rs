use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SelectorError {
    #[error("at least one model tier is required")]
    Empty,

    #[error("model identifier at position {0} is blank")]
    Blank(usize),
}

/// Ordered model tiers, tried front to back. Built once at startup and
/// shared read-only by every flow; cloning only bumps a reference count.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    models: Arc<[String]>,
}

impl ModelSelector {
    pub fn new<I, S>(models: I) -> Result<Self, SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let models: Vec<String> = models.into_iter().map(Into::into).collect();
        if models.is_empty() {
            return Err(SelectorError::Empty);
        }
        if let Some(pos) = models.iter().position(|m| m.trim().is_empty()) {
            return Err(SelectorError::Blank(pos));
        }
        Ok(Self {
            models: models.into(),
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// The highest-capability tier. Non-empty by construction.
    pub fn primary(&self) -> &str {
        &self.models[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_configured_order() {
        let selector = ModelSelector::new(["pro", "flash"]).unwrap();
        assert_eq!(selector.models(), ["pro", "flash"]);
        assert_eq!(selector.primary(), "pro");
    }

    #[test]
    fn test_empty_selector_rejected() {
        let err = ModelSelector::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, SelectorError::Empty);
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let err = ModelSelector::new(["pro", " "]).unwrap_err();
        assert_eq!(err, SelectorError::Blank(1));
    }

    #[test]
    fn test_clones_share_the_same_tiers() {
        let selector = ModelSelector::new(["pro", "flash"]).unwrap();
        let copy = selector.clone();
        assert!(std::ptr::eq(selector.models(), copy.models()));
    }
}
