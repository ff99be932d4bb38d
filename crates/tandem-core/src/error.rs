use thiserror::Error;

/// Application-wide error types for Tandem.
#[derive(Error, Debug)]
pub enum AppError {
    /// The document does not have the shape of an OpenAPI schema.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// An operation descriptor violates a precondition of the normalizer.
    #[error("Malformed operation {method} {path}: {reason}")]
    MalformedOperation {
        path: String,
        method: String,
        reason: String,
    },

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Building or sending an email failed.
    #[error("Email error: {0}")]
    EmailError(String),

    /// The external formatter could not be run or exited with an error.
    #[error("Formatter error: {0}")]
    FormatterError(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if this error comes from user-supplied configuration
    /// rather than from the data being processed.
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::ConfigError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_operation_message() {
        let err = AppError::MalformedOperation {
            path: "/items/".into(),
            method: "get".into(),
            reason: "`tags` is empty".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed operation get /items/: `tags` is empty"
        );
    }

    #[test]
    fn test_is_config() {
        assert!(AppError::ConfigError("missing".into()).is_config());
        assert!(!AppError::SchemaError("bad".into()).is_config());
    }
}
