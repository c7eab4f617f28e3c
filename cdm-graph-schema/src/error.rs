//! Error types for schema loading.

use thiserror::Error;

/// Errors from CDM schema loading.
///
/// All variants are fatal to map construction: no partial format map is
/// usable. A schema that parses but yields zero entries is *not* an error.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema resource missing or unreadable
    #[error("Failed to read schema resource: {0}")]
    Load(#[from] std::io::Error),

    /// Schema resource is not well-formed CSV
    #[error("Failed to parse schema CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Required header column absent from the schema resource
    #[error("Schema is missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
