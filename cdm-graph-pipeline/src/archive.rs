//! Post-ingestion file bookkeeping.
//!
//! After a successful load, the artifact and the originating raw-record
//! file move into processed-storage locations keyed by the sanitized source
//! identifier. Pure filesystem sequencing; failures here are warnings, not
//! run failures — the data is already in the graph store.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Directory layout for pipeline file staging and archival.
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    /// Where freshly generated `.nt` artifacts are staged
    pub intermediate_dir: PathBuf,
    /// Where ingested `.nt` artifacts are archived
    pub processed_nt_dir: PathBuf,
    /// Where ingested raw-record files are archived, per source
    pub processed_json_dir: PathBuf,
}

impl PipelinePaths {
    /// Standard layout under a base data directory.
    pub fn under(data_dir: &Path) -> Self {
        Self {
            intermediate_dir: data_dir.join("intermediate"),
            processed_nt_dir: data_dir.join("processed").join("processed_nt_file"),
            processed_json_dir: data_dir.join("processed").join("processed_json_record"),
        }
    }
}

/// Strip the leading `#` characters a source identifier may carry.
pub fn sanitize_source_id(source_id: &str) -> &str {
    source_id.trim_start_matches('#')
}

/// Archive a successfully ingested artifact and its raw-record file.
///
/// Returns the artifact's final location. A failed move leaves the file
/// where it was and logs a warning.
pub fn archive_artifacts(
    artifact: &Path,
    raw_record: Option<&Path>,
    source_id: &str,
    paths: &PipelinePaths,
) -> PathBuf {
    let mut final_artifact = artifact.to_path_buf();

    match artifact.file_name() {
        Some(file_name) => {
            let target = paths.processed_nt_dir.join(file_name);
            match move_file(artifact, &target) {
                Ok(()) => {
                    info!(archived = %target.display(), "Artifact archived");
                    final_artifact = target;
                }
                Err(e) => warn!(
                    artifact = %artifact.display(),
                    "Failed to archive artifact: {}", e
                ),
            }
        }
        None => warn!(artifact = %artifact.display(), "Artifact has no file name; not archived"),
    }

    if let Some(raw) = raw_record {
        if raw.exists() {
            let source_dir = paths
                .processed_json_dir
                .join(sanitize_source_id(source_id));
            let target = raw
                .file_name()
                .map(|name| source_dir.join(name));
            match target {
                Some(target) => match move_file(raw, &target) {
                    Ok(()) => info!(archived = %target.display(), "Raw record file archived"),
                    Err(e) => warn!(raw = %raw.display(), "Failed to archive raw record file: {}", e),
                },
                None => warn!(raw = %raw.display(), "Raw record file has no file name; not archived"),
            }
        }
    }

    final_artifact
}

/// Move a file, creating the target's parent directories. Falls back to
/// copy-then-remove when a rename crosses filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_source_id() {
        assert_eq!(sanitize_source_id("#EEPA-1"), "EEPA-1");
        assert_eq!(sanitize_source_id("##X"), "X");
        assert_eq!(sanitize_source_id("plain"), "plain");
    }

    #[test]
    fn test_paths_under() {
        let paths = PipelinePaths::under(Path::new("data"));
        assert_eq!(paths.intermediate_dir, Path::new("data/intermediate"));
        assert_eq!(
            paths.processed_nt_dir,
            Path::new("data/processed/processed_nt_file")
        );
        assert_eq!(
            paths.processed_json_dir,
            Path::new("data/processed/processed_json_record")
        );
    }
}
