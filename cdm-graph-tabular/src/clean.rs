//! Schema-driven dataset cleaning.
//!
//! Cleaning is a fixed sequence of pure transforms over a dataset:
//!
//! 1. Blank-like strings (whitespace only) become explicit nulls.
//! 2. Records missing any critical identifier are dropped — but only over
//!    identifier columns actually present in the dataset.
//! 3. Values are coerced to their declared column format; parse failures
//!    null the value, never abort the run.
//! 4. Designated latitude/longitude columns are rounded as a location
//!    anonymization measure, regardless of the format map.

use tracing::{info, warn};

use cdm_graph_schema::{ColumnFormat, ColumnFormatMap};

use crate::dataset::Dataset;
use crate::dates::parse_date_permissive;
use crate::value::Value;

/// Configuration for dataset cleaning.
///
/// Column names are flat names as composed by the schema layer; defaults
/// match the CDM's critical identifiers and location columns.
#[derive(Debug, Clone)]
pub struct CleanerConfig {
    /// Columns a record must have a value in to survive cleaning
    pub critical_ids: Vec<String>,
    /// Latitude/longitude columns subject to coordinate rounding
    pub location_columns: Vec<String>,
    /// Decimal places kept when rounding coordinates
    pub coordinate_scale: u32,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            critical_ids: vec![
                "data_record_record_id".to_string(),
                "data_victim_victim_id".to_string(),
                "data_trafficker_trafficker_id".to_string(),
            ],
            location_columns: vec![
                "data_victim_current_location_latitude".to_string(),
                "data_victim_current_location_longitude".to_string(),
                "data_incident_departure_latitude".to_string(),
                "data_incident_departure_longitude".to_string(),
                "data_incident_destination_latitude".to_string(),
                "data_incident_destination_longitude".to_string(),
            ],
            coordinate_scale: 3,
        }
    }
}

/// What cleaning did to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Records in the raw dataset
    pub rows_in: usize,
    /// Records dropped for missing critical identifiers
    pub rows_dropped: usize,
    /// True when no critical identifier column exists in the dataset at all
    /// (non-fatal; row-dropping is skipped)
    pub missing_critical_ids: bool,
}

/// Cleans a dataset against a [`ColumnFormatMap`].
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    config: CleanerConfig,
}

impl DataCleaner {
    /// Create a cleaner with the given configuration.
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Run the full cleaning sequence.
    ///
    /// Never fails: coercion problems are recovered locally by nulling the
    /// offending value. Whether an empty result is terminal is the caller's
    /// decision.
    pub fn clean(&self, mut dataset: Dataset, formats: &ColumnFormatMap) -> (Dataset, CleanReport) {
        let mut report = CleanReport {
            rows_in: dataset.len(),
            ..CleanReport::default()
        };

        normalize_blanks(&mut dataset);

        let existing_ids: Vec<&String> = self
            .config
            .critical_ids
            .iter()
            .filter(|col| dataset.has_column(col))
            .collect();

        if existing_ids.is_empty() {
            warn!("Critical identifier columns missing from input; no rows dropped");
            report.missing_critical_ids = true;
        } else {
            let before = dataset.len();
            dataset.retain(|record| existing_ids.iter().all(|col| record.has_value(col)));
            report.rows_dropped = before - dataset.len();
        }

        coerce_columns(&mut dataset, formats);
        self.round_locations(&mut dataset);

        info!(
            rows_in = report.rows_in,
            rows_dropped = report.rows_dropped,
            rows_out = dataset.len(),
            "Data cleaning complete"
        );
        (dataset, report)
    }

    /// Round designated coordinate columns, wherever they are present.
    ///
    /// Applies to whatever numeric value is there, independent of the
    /// declared format; absent columns are silently skipped.
    fn round_locations(&self, dataset: &mut Dataset) {
        let factor = 10f64.powi(self.config.coordinate_scale as i32);
        for record in dataset.records_mut() {
            for col in &self.config.location_columns {
                if let Some(value) = record.get_mut(col) {
                    if let Value::Float(f) = value {
                        *value = Value::Float((*f * factor).round() / factor);
                    }
                }
            }
        }
    }
}

/// Replace whitespace-only strings with explicit nulls, dataset-wide.
fn normalize_blanks(dataset: &mut Dataset) {
    for record in dataset.records_mut() {
        for (_, value) in record.values_mut() {
            if let Value::String(s) = value {
                if s.trim().is_empty() {
                    *value = Value::Null;
                }
            }
        }
    }
}

/// Coerce every mapped column to its declared format.
fn coerce_columns(dataset: &mut Dataset, formats: &ColumnFormatMap) {
    for record in dataset.records_mut() {
        for (column, value) in record.values_mut() {
            if let Some(format) = formats.get(column) {
                if format.is_coerced() {
                    let old = std::mem::replace(value, Value::Null);
                    *value = coerce_value(old, format);
                }
            }
        }
    }
}

/// Coerce one value to one format. Unparsable input becomes null.
fn coerce_value(value: Value, format: ColumnFormat) -> Value {
    match format {
        ColumnFormat::Int => coerce_int(value),
        ColumnFormat::Float => coerce_float(value),
        ColumnFormat::Date => coerce_date(value),
        ColumnFormat::String | ColumnFormat::Unknown => value,
    }
}

fn coerce_int(value: Value) -> Value {
    match value {
        Value::Int(_) | Value::Null => value,
        Value::Bool(b) => Value::Int(i64::from(b)),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Value::Int(f as i64),
        Value::Float(_) => Value::Null,
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                Value::Int(n)
            } else {
                // Accept integral decimal text like "30.0"
                match s.parse::<f64>() {
                    Ok(f) if f.is_finite() && f.fract() == 0.0 => Value::Int(f as i64),
                    _ => Value::Null,
                }
            }
        }
        Value::Date(_) => Value::Null,
    }
}

fn coerce_float(value: Value) -> Value {
    match value {
        Value::Float(_) | Value::Null => value,
        Value::Int(n) => Value::Float(n as f64),
        Value::Bool(b) => Value::Float(f64::from(u8::from(b))),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => Value::Null,
        },
        Value::Date(_) => Value::Null,
    }
}

fn coerce_date(value: Value) -> Value {
    match value {
        Value::Date(_) | Value::Null => value,
        Value::String(s) => match parse_date_permissive(&s) {
            Some(dt) => Value::Date(dt),
            None => Value::Null,
        },
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_graph_schema::ColumnFormat;

    fn formats(entries: &[(&str, ColumnFormat)]) -> ColumnFormatMap {
        let mut map = ColumnFormatMap::new();
        for (name, format) in entries {
            map.insert(*name, *format);
        }
        map
    }

    fn dataset(rows: &[serde_json::Value]) -> Dataset {
        Dataset::from_json_records(rows)
    }

    #[test]
    fn test_blank_strings_become_null() {
        let ds = dataset(&[serde_json::json!({"note": "   "})]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        assert_eq!(cleaned.first().unwrap().get("note"), Some(&Value::Null));
    }

    #[test]
    fn test_drop_rows_missing_critical_ids() {
        let ds = dataset(&[
            serde_json::json!({"data_record_record_id": "R1", "x": 1}),
            serde_json::json!({"data_record_record_id": null, "x": 2}),
            serde_json::json!({"data_record_record_id": "  ", "x": 3}),
        ]);
        let (cleaned, report) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        assert_eq!(cleaned.len(), 1);
        assert_eq!(report.rows_in, 3);
        assert_eq!(report.rows_dropped, 2);
        assert!(!report.missing_critical_ids);
    }

    #[test]
    fn test_missing_critical_columns_is_warning_not_drop() {
        let ds = dataset(&[serde_json::json!({"x": 1}), serde_json::json!({"x": 2})]);
        let (cleaned, report) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        assert_eq!(cleaned.len(), 2);
        assert!(report.missing_critical_ids);
        assert_eq!(report.rows_dropped, 0);
    }

    #[test]
    fn test_only_existing_critical_columns_considered() {
        // victim_id exists nowhere; record_id governs alone
        let ds = dataset(&[
            serde_json::json!({"data_record_record_id": "R1"}),
            serde_json::json!({"data_record_record_id": null}),
        ]);
        let (cleaned, report) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        assert_eq!(cleaned.len(), 1);
        assert!(!report.missing_critical_ids);
    }

    #[test]
    fn test_int_coercion() {
        let ds = dataset(&[serde_json::json!({
            "age": "30",
            "count": "not a number",
            "whole": "25.0",
            "frac": "25.7"
        })]);
        let map = formats(&[
            ("age", ColumnFormat::Int),
            ("count", ColumnFormat::Int),
            ("whole", ColumnFormat::Int),
            ("frac", ColumnFormat::Int),
        ]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &map);
        let record = cleaned.first().unwrap();
        assert_eq!(record.get("age"), Some(&Value::Int(30)));
        assert_eq!(record.get("count"), Some(&Value::Null));
        assert_eq!(record.get("whole"), Some(&Value::Int(25)));
        assert_eq!(record.get("frac"), Some(&Value::Null));
    }

    #[test]
    fn test_float_coercion() {
        let ds = dataset(&[serde_json::json!({"lat": "12.34567", "bad": "??", "n": 3})]);
        let map = formats(&[
            ("lat", ColumnFormat::Float),
            ("bad", ColumnFormat::Float),
            ("n", ColumnFormat::Float),
        ]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &map);
        let record = cleaned.first().unwrap();
        assert_eq!(record.get("lat"), Some(&Value::Float(12.34567)));
        assert_eq!(record.get("bad"), Some(&Value::Null));
        assert_eq!(record.get("n"), Some(&Value::Float(3.0)));
    }

    #[test]
    fn test_date_coercion() {
        let ds = dataset(&[serde_json::json!({"seen": "2024-03-05", "bad": "sometime"})]);
        let map = formats(&[("seen", ColumnFormat::Date), ("bad", ColumnFormat::Date)]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &map);
        let record = cleaned.first().unwrap();
        match record.get("seen") {
            Some(Value::Date(dt)) => {
                assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-05");
            }
            other => panic!("expected date, got {:?}", other),
        }
        assert_eq!(record.get("bad"), Some(&Value::Null));
    }

    #[test]
    fn test_string_and_unmapped_columns_untouched() {
        let ds = dataset(&[serde_json::json!({"name": "42", "free": "7.5"})]);
        let map = formats(&[("name", ColumnFormat::String)]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &map);
        let record = cleaned.first().unwrap();
        assert_eq!(record.get("name"), Some(&Value::String("42".to_string())));
        assert_eq!(record.get("free"), Some(&Value::String("7.5".to_string())));
    }

    #[test]
    fn test_coordinate_rounding() {
        let ds = dataset(&[serde_json::json!({
            "data_victim_current_location_latitude": 12.34567,
            "data_incident_departure_longitude": -4.111111
        })]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        let record = cleaned.first().unwrap();
        assert_eq!(
            record.get("data_victim_current_location_latitude"),
            Some(&Value::Float(12.346))
        );
        assert_eq!(
            record.get("data_incident_departure_longitude"),
            Some(&Value::Float(-4.111))
        );
    }

    #[test]
    fn test_rounding_applies_after_string_coercion() {
        // Location columns declared FLOAT arrive as strings; rounding sees
        // the coerced numeric value.
        let ds = dataset(&[serde_json::json!({
            "data_incident_destination_latitude": "51.92985678"
        })]);
        let map = formats(&[(
            "data_incident_destination_latitude",
            ColumnFormat::Float,
        )]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &map);
        assert_eq!(
            cleaned
                .first()
                .unwrap()
                .get("data_incident_destination_latitude"),
            Some(&Value::Float(51.930))
        );
    }

    #[test]
    fn test_absent_location_columns_skipped() {
        let ds = dataset(&[serde_json::json!({"x": 1})]);
        let (cleaned, _) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn test_all_ids_null_empties_dataset() {
        let ds = dataset(&[
            serde_json::json!({"data_victim_victim_id": null}),
            serde_json::json!({"data_victim_victim_id": ""}),
        ]);
        let (cleaned, report) = DataCleaner::default().clean(ds, &ColumnFormatMap::new());
        assert!(cleaned.is_empty());
        assert_eq!(report.rows_dropped, 2);
    }
}
