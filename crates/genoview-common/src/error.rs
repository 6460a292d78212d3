//! Error types for Genoview

use thiserror::Error;

/// Result type alias for Genoview operations
pub type Result<T> = std::result::Result<T, GenoviewError>;

/// Main error type for Genoview
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenoviewError {
    #[error("Invalid nucleotide: '{0}'. Nucleotides must be A, C, G or T")]
    InvalidNucleotide(String),

    #[error("Invalid position: '{0}'")]
    InvalidPosition(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
