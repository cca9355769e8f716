//! Error types for the viewer
//!
//! Library operations return these enums; startup plumbing wraps them in
//! `anyhow` at the application boundary.

use std::path::PathBuf;

/// Message shown in the input panel whenever a payload is rejected.
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid JSON format. Please check your input.";

/// Failure to turn pasted text into scene data
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The text is not JSON, or does not match the `{"objects": [...]}` shape.
    #[error("invalid scene payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl LoadError {
    /// Static text for the panel's error slot.
    ///
    /// Parser details (line, column, expected type) are only logged.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::InvalidPayload(_) => INVALID_PAYLOAD_MESSAGE,
        }
    }
}

/// Failure to load a [`ViewerConfig`](crate::config::ViewerConfig) file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse config: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to build a render pipeline from its registered configuration
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("pipeline '{0}' is not registered")]
    Unregistered(String),
    #[error("shader '{shader}' needed by pipeline '{pipeline}' is not loaded")]
    MissingShader { pipeline: String, shader: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_static() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let load_error = LoadError::from(err);
        assert_eq!(load_error.user_message(), INVALID_PAYLOAD_MESSAGE);
        assert!(load_error.to_string().starts_with("invalid scene payload"));
    }
}
