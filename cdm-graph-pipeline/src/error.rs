//! Pipeline error taxonomy.
//!
//! Every terminal condition a run can hit is a distinct variant so the
//! orchestrating caller can decide whether to retry, archive-as-failed, or
//! abort. Type-coercion failures never appear here — cleaning recovers them
//! locally by nulling the offending value.

use thiserror::Error;

use cdm_graph_mapping::{MappingError, WriteError};
use cdm_graph_schema::SchemaError;

/// Errors terminating a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Schema resource missing/unreadable; no format map is usable
    #[error("Schema loading failed: {0}")]
    Schema(#[from] SchemaError),

    /// Mapping configuration missing/unparsable; no triples can be generated
    #[error("Mapping configuration failed: {0}")]
    Mapping(#[from] MappingError),

    /// All rows dropped during cleaning, or the dataset was empty on input
    #[error("Dataset is empty after cleaning; nothing to transform")]
    EmptyDatasetAfterCleaning,

    /// A column downstream naming/archival depends on is absent or blank
    #[error("Required field missing from cleaned dataset: {0}")]
    MissingRequiredField(String),

    /// Mapping produced zero statements for a non-empty dataset
    #[error("Mapping produced no triples for a non-empty dataset")]
    NoTriplesGenerated,

    /// Output artifact could not be serialized or written
    #[error("Artifact writing failed: {0}")]
    Write(#[from] WriteError),

    /// Raw record input could not be read or was not flat JSON records
    #[error("Invalid raw records: {0}")]
    InvalidRecords(String),

    /// Filesystem error outside artifact writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
