//! Pipeline orchestration for the CDM graph engine.
//!
//! Thin sequencing around the core crates: clean a raw dataset against the
//! CDM schema, generate RDF triples from the mapping configuration, persist
//! the N-Triples artifact, hand it to the ingestion collaborator, and
//! archive processed files.
//!
//! Schema and mapping configuration are re-read from disk on every run —
//! the pipeline tolerates hot-edited configuration by design and holds no
//! cached state between invocations.

pub mod archive;
pub mod error;
pub mod ingest;
pub mod records;
pub mod run;

pub use archive::PipelinePaths;
pub use error::PipelineError;
pub use ingest::{DryRunIngest, IngestService};
pub use records::load_records;
pub use run::{run_pipeline, PipelineOutcome, SOURCE_ID_COLUMN};
