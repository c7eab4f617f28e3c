//! Error types for mapping configuration and output writing.

use thiserror::Error;

/// Errors from mapping configuration loading.
///
/// All variants are fatal: no triples can be generated without a valid
/// mapping configuration.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Mapping configuration resource missing or unreadable
    #[error("Mapping configuration not found: {0}")]
    NotFound(String),

    /// Mapping configuration is not well-formed YAML
    #[error("Failed to parse mapping configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A mapping rule is structurally invalid
    #[error("Invalid mapping rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },
}

/// Result type for mapping operations.
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Errors from serializing and persisting the triple sequence.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The generated sequence was empty; nothing was written
    #[error("No triples to write; refusing to produce an empty artifact")]
    NoContent,

    /// The output artifact could not be written
    #[error("Failed to write N-Triples artifact: {0}")]
    Io(#[from] std::io::Error),
}
