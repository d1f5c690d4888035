//! Result and error types for storefront-probe.

use thiserror::Error;

/// Result type for storefront-probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A wait condition did not hold before the deadline
    #[error("Timed out after {ms}ms waiting for {locator} to be {condition}")]
    Timeout {
        /// Locator that was polled
        locator: String,
        /// Condition that was attempted
        condition: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// An expected value differs from the observed one
    #[error("Assertion failed for {what}: expected '{expected}', got '{actual}'")]
    AssertionMismatch {
        /// What was being compared
        what: String,
        /// Expected value
        expected: String,
        /// Observed value
        actual: String,
    },

    /// An element handle no longer resolves to a rendered node
    #[error("Stale element: node {node_id} of {locator} is no longer rendered")]
    StaleElement {
        /// Locator the handle came from
        locator: String,
        /// Driver-assigned node id
        node_id: String,
    },

    /// An immediate lookup found nothing
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator that matched nothing
        locator: String,
    },

    /// Browser executable not found or failed to start
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Any other driver-level failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Script evaluation failed
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// A rendered price could not be parsed
    #[error("Could not parse a price from '{text}'")]
    PriceParse {
        /// The raw text
        text: String,
    },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an assertion mismatch
    #[must_use]
    pub fn mismatch(
        what: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::AssertionMismatch {
            what: what.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Whether this error is a wait timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether this error is a stale element reference
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleElement { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_locator_and_condition() {
        let err = ProbeError::Timeout {
            locator: "login.username".to_string(),
            condition: "visible".to_string(),
            ms: 15_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("login.username"));
        assert!(msg.contains("visible"));
        assert!(msg.contains("15000ms"));
        assert!(err.is_timeout());
        assert!(!err.is_stale());
    }

    #[test]
    fn test_mismatch_carries_both_values() {
        let err = ProbeError::mismatch("page title", "Products", "Your Cart");
        assert_eq!(
            err.to_string(),
            "Assertion failed for page title: expected 'Products', got 'Your Cart'"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ProbeError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
