//! Raw record input loading.

use std::path::Path;

use tracing::info;

use cdm_graph_tabular::Dataset;

use crate::error::PipelineError;

/// Load a raw dataset from a flat JSON records file.
///
/// Accepts either an array of flat objects or a single flat object (one
/// record). Anything else is rejected up front.
pub fn load_records(path: &Path) -> Result<Dataset, PipelineError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PipelineError::InvalidRecords(format!("{}: {}", path.display(), e)))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| PipelineError::InvalidRecords(format!("{}: {}", path.display(), e)))?;

    let dataset = match json {
        serde_json::Value::Array(rows) => Dataset::from_json_records(&rows),
        obj @ serde_json::Value::Object(_) => Dataset::from_json_records(std::slice::from_ref(&obj)),
        _ => {
            return Err(PipelineError::InvalidRecords(format!(
                "{}: expected a JSON array of flat records",
                path.display()
            )))
        }
    };

    info!(records = dataset.len(), input = %path.display(), "Raw records loaded");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_array() {
        let path = write_temp("cdm_graph_records_array.json", r#"[{"a": 1}, {"a": 2}]"#);
        let ds = load_records(&path).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_load_single_object() {
        let path = write_temp("cdm_graph_records_obj.json", r#"{"a": 1}"#);
        let ds = load_records(&path).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_load_scalar_rejected() {
        let path = write_temp("cdm_graph_records_scalar.json", "42");
        assert!(matches!(
            load_records(&path),
            Err(PipelineError::InvalidRecords(_))
        ));
    }

    #[test]
    fn test_load_missing_file_rejected() {
        assert!(matches!(
            load_records(Path::new("/nonexistent/records.json")),
            Err(PipelineError::InvalidRecords(_))
        ));
    }
}
