//! Ingestion collaborator seam.
//!
//! The core hands a finished artifact's location plus a source identifier
//! to an external ingestion service and only needs a boolean outcome back.
//! The service's protocol, authentication, and retry behavior live outside
//! this workspace.

use std::path::Path;

use tracing::info;

/// External ingestion collaborator.
pub trait IngestService {
    /// Ingest an N-Triples artifact for the given source.
    ///
    /// Returns whether the load succeeded. Implementations must not panic
    /// on failure; the pipeline leaves failed artifacts staged for retry.
    fn ingest(&self, artifact: &Path, source_id: &str) -> bool;
}

/// Ingestion stand-in that accepts every artifact without contacting a
/// triplestore. Used by the CLI and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunIngest;

impl IngestService for DryRunIngest {
    fn ingest(&self, artifact: &Path, source_id: &str) -> bool {
        info!(
            artifact = %artifact.display(),
            source_id = %source_id,
            "Dry-run ingest: artifact accepted"
        );
        true
    }
}
