//! The full pipeline run: clean → generate → write → ingest → archive.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{error, info};

use cdm_graph_mapping::{load_mapping_config, write_ntriples, TripleGenerator};
use cdm_graph_schema::SchemaMapBuilder;
use cdm_graph_tabular::{CleanReport, DataCleaner, Dataset};

use crate::archive::{archive_artifacts, PipelinePaths};
use crate::error::PipelineError;
use crate::ingest::IngestService;

/// Column carrying the source identifier downstream naming and archival
/// depend on.
pub const SOURCE_ID_COLUMN: &str = "data_record_source_id";

/// What a completed pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Source identifier extracted from the cleaned dataset
    pub source_id: String,
    /// Artifact location (archived on successful ingestion, staged otherwise)
    pub artifact_path: PathBuf,
    /// Statements in the written artifact
    pub triple_count: usize,
    /// What cleaning did to the dataset
    pub clean_report: CleanReport,
    /// Whether the ingestion collaborator accepted the artifact
    pub ingested: bool,
}

/// Execute the data processing workflow for one raw dataset.
///
/// Schema and mapping configuration are read fresh from `schema_path` and
/// `mapping_path` on every call. On successful ingestion the artifact (and
/// `raw_record_path`, when given) are archived; on ingestion failure they
/// stay staged and the run still returns `Ok` with `ingested = false` so
/// the caller can retry later.
pub fn run_pipeline(
    raw: Dataset,
    raw_record_path: Option<&Path>,
    schema_path: &Path,
    mapping_path: &Path,
    paths: &PipelinePaths,
    ingest: &dyn IngestService,
) -> Result<PipelineOutcome, PipelineError> {
    info!(records = raw.len(), "Starting pipeline run");

    let formats = SchemaMapBuilder::default().build_from_path(schema_path)?;
    let (cleaned, clean_report) = DataCleaner::default().clean(raw, &formats);

    if cleaned.is_empty() {
        return Err(PipelineError::EmptyDatasetAfterCleaning);
    }

    let source_id = extract_source_id(&cleaned)?;
    info!(source_id = %source_id, "Source identifier extracted");

    let mapping = load_mapping_config(mapping_path)?;
    let triples = TripleGenerator::new(&mapping).generate(&cleaned);
    if triples.is_empty() {
        return Err(PipelineError::NoTriplesGenerated);
    }

    std::fs::create_dir_all(&paths.intermediate_dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let artifact_path = paths
        .intermediate_dir
        .join(format!("{}_batch_{}.nt", source_id, timestamp));
    write_ntriples(&artifact_path, &triples)?;

    let ingested = ingest.ingest(&artifact_path, &source_id);

    let artifact_path = if ingested {
        archive_artifacts(&artifact_path, raw_record_path, &source_id, paths)
    } else {
        error!(
            artifact = %artifact_path.display(),
            "Ingestion failed; artifact left staged for retry"
        );
        artifact_path
    };

    Ok(PipelineOutcome {
        source_id,
        artifact_path,
        triple_count: triples.len(),
        clean_report,
        ingested,
    })
}

/// Extract the source identifier from the first cleaned record.
///
/// A missing column or a blank/null value is a terminal failure: artifact
/// naming and archival both key off this identifier.
fn extract_source_id(cleaned: &Dataset) -> Result<String, PipelineError> {
    let value = cleaned
        .first()
        .and_then(|record| record.get(SOURCE_ID_COLUMN))
        .map(|value| value.render())
        .unwrap_or_default();

    if value.is_empty() {
        return Err(PipelineError::MissingRequiredField(
            SOURCE_ID_COLUMN.to_string(),
        ));
    }
    Ok(value)
}
