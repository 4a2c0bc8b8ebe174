use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("payload element not found: {operation} timed out after {timeout_ms}ms")]
    PayloadNotFound { operation: String, timeout_ms: u128 },

    #[error("payload marker not present in page markup: {marker} (occurrence {occurrence})")]
    MarkerNotInMarkup { marker: String, occurrence: usize },

    #[error("JSON decoding failed for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("wait for {operation} timed out after {timeout_ms}ms")]
    WaitTimeout { operation: String, timeout_ms: u128 },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("failed to write {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize restaurant document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failure reported by a [`crate::PageDriver`] implementation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("browser command {operation} failed: {message}")]
    Command { operation: String, message: String },

    #[error("no element matches {selector}")]
    NoSuchElement { selector: String },

    #[error("selector {selector} is not supported here: {reason}")]
    Unsupported { selector: String, reason: String },
}

impl DriverError {
    /// Wraps any displayable browser error with the name of the command that
    /// produced it.
    pub fn command(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Command {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}
