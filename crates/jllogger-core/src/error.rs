//! Error types for jllogger

use std::path::PathBuf;

/// jllogger error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid filename was entered: {0:?}")]
    InvalidFilename(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for jllogger
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Error::InvalidRequest(msg.into())
    }

    pub fn http<S: Into<String>>(msg: S) -> Self {
        Error::HttpError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidFilename("../etc/passwd".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid filename was entered: \"../etc/passwd\""
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }
}
