//! Unified error types for uiprobe

use thiserror::Error;

/// Unified error type for all probe operations
///
/// Probes catch every variant at their boundary and fold it into a
/// [`crate::ProbeStatus::Failed`] report; nothing escapes a probe run.
#[derive(Error, Debug)]
pub enum ProbeError {
    // Browser lifecycle errors
    #[error("Browser launch failed: {0}")]
    Launch(String),

    // Navigation errors (includes load timeouts)
    #[error("Navigation failed for {url}: {reason}")]
    Navigation { url: String, reason: String },

    // Element/selector errors
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    // Capture errors
    #[error("Screenshot capture failed: {0}")]
    Screenshot(String),

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl ProbeError {
    /// Navigation error for a URL with a reason
    pub fn navigation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the element-location path
    ///
    /// The interactive probe treats these as a soft "not found" outcome
    /// rather than a hard failure.
    pub fn is_element_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound(_))
    }
}

/// Result type alias using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error_message() {
        let err = ProbeError::navigation("http://localhost:8081", "load timeout after 60s");
        let msg = err.to_string();
        assert!(msg.contains("http://localhost:8081"));
        assert!(msg.contains("load timeout"));
    }

    #[test]
    fn test_element_not_found_detection() {
        let err = ProbeError::ElementNotFound("text 'Dump'".to_string());
        assert!(err.is_element_not_found());

        let err = ProbeError::Other("boom".to_string());
        assert!(!err.is_element_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ProbeError = io.into();
        assert!(err.to_string().contains("I/O error"));
    }
}
