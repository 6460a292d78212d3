//! Error types for the Genoview CLI
//!
//! User-facing error types with clear, actionable messages. Adapters that
//! follow the throw-and-surface policy return these; the gene detail adapter
//! never does (see [`crate::outcome::Outcome`]).

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// An upstream service answered with a failure status or an unexpected shape
    #[error("Upstream error: {0}. The remote service may be unavailable, try again later.")]
    Upstream(String),

    /// The prediction endpoint rejected an analysis request
    #[error("Failed to analyze variant: {0}")]
    Analysis(String),

    /// User input was rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and the service URLs.")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or .env file.")]
    Config(String),

    /// File system or terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<genoview_common::GenoviewError> for CliError {
    fn from(err: genoview_common::GenoviewError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_carries_body() {
        let err = CliError::analysis("model unavailable");
        assert_eq!(err.to_string(), "Failed to analyze variant: model unavailable");
    }

    #[test]
    fn test_common_error_becomes_validation() {
        let err: CliError = genoview_common::GenoviewError::InvalidNucleotide("N".into()).into();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("A, C, G or T"));
    }
}
