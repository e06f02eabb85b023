use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Interaction failed: {0}")]
    InteractionFailed(String),

    #[error("Assertion failed for '{selector}': expected count {expected}, got {actual}")]
    AssertionFailed {
        selector: String,
        expected: usize,
        actual: usize,
    },

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Anyhow error: {0}")]
    AnyhowError(String),
}

pub type Result<T> = std::result::Result<T, VerifyError>;

// Convert anyhow::Error to VerifyError
impl From<anyhow::Error> for VerifyError {
    fn from(err: anyhow::Error) -> Self {
        VerifyError::AnyhowError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_failure_names_selector_and_counts() {
        let err = VerifyError::AssertionFailed {
            selector: ".hotspot-element".to_string(),
            expected: 0,
            actual: 1,
        };
        let message = err.to_string();
        assert!(message.contains(".hotspot-element"));
        assert!(message.contains("expected count 0"));
        assert!(message.contains("got 1"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VerifyError = io.into();
        assert!(matches!(err, VerifyError::IoError(_)));
    }
}
