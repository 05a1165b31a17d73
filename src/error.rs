use thiserror::Error;

/// Failures raised below the top-level commands. Every variant maps to a
/// recoverable skip somewhere in the pipeline: a match, a league, or the
/// whole run depending on where it surfaces.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The readiness marker never appeared, so the page is treated as
    /// not rendered and nothing is extracted from it.
    #[error("timed out after {timeout_ms}ms waiting for `{selector}`")]
    WaitTimeout { selector: String, timeout_ms: u64 },

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The event header rendered without its embedded data attribute.
    #[error("event payload missing or empty")]
    MissingPayload,

    #[error("malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
}

/// Result type alias for pipeline stages.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_timeout_display() {
        let err = ScrapeError::WaitTimeout {
            selector: "div.eventRow".to_string(),
            timeout_ms: 20000,
        };
        let msg = err.to_string();
        assert!(msg.contains("div.eventRow"));
        assert!(msg.contains("20000"));
    }

    #[test]
    fn test_payload_error_wraps_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ScrapeError::from(serde_err);
        assert!(matches!(err, ScrapeError::Payload(_)));
        assert!(err.to_string().starts_with("malformed event payload"));
    }
}
