//! Failure classification. Decides from the failure's message text alone
//! whether another model tier is worth trying.

/// Substrings that mark a failure as transient: overload and rate limiting.
/// Matched case-sensitively against the raw message; no status field is consulted.
pub const TRANSIENT_MARKERS: &[&str] = &["503", "overloaded", "429"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transient,
    Terminal,
}

pub fn classify(message: &str) -> ErrorClass {
    if TRANSIENT_MARKERS.iter().any(|marker| message.contains(marker)) {
        ErrorClass::Transient
    } else {
        ErrorClass::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_unavailable_is_transient() {
        assert_eq!(
            classify("Error: 503 Service Unavailable: the model is overloaded"),
            ErrorClass::Transient
        );
    }

    #[test]
    fn test_overloaded_alone_is_transient() {
        assert_eq!(classify("model overloaded"), ErrorClass::Transient);
    }

    #[test]
    fn test_rate_limit_is_transient() {
        assert_eq!(
            classify("API error (status 429): Resource has been exhausted"),
            ErrorClass::Transient
        );
    }

    #[test]
    fn test_internal_server_error_is_terminal() {
        assert_eq!(classify("Error: 500 Internal Server Error"), ErrorClass::Terminal);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(classify("The model is OVERLOADED"), ErrorClass::Terminal);
    }

    #[test]
    fn test_marker_inside_longer_text_still_matches() {
        assert_eq!(classify("upstream code 15039"), ErrorClass::Transient);
    }

    #[test]
    fn test_empty_message_is_terminal() {
        assert_eq!(classify(""), ErrorClass::Terminal);
    }
}
