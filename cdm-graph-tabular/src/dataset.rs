//! Record and dataset types.

use std::collections::{BTreeSet, HashMap};

use crate::value::Value;

/// One flat record: mapping from flat column name to typed value.
///
/// Records are independent; a column absent from a record is equivalent to
/// a null value for that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell value.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    /// Get a cell value, if the column is present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Check whether the record has a non-null value for a column.
    pub fn has_value(&self, column: &str) -> bool {
        self.get(column).is_some_and(|v| !v.is_null())
    }

    /// Iterate over `(column, value)` cells.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Mutably iterate over cell values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.cells.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a mutable reference to a cell value.
    pub fn get_mut(&mut self, column: &str) -> Option<&mut Value> {
        self.cells.get_mut(column)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of records.
///
/// Carries no structure beyond row order; that order is significant for
/// deterministic triple output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from records in order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Build a dataset from flat JSON records (an array of objects).
    pub fn from_json_records(rows: &[serde_json::Value]) -> Self {
        let records = rows
            .iter()
            .filter_map(|row| row.as_object())
            .map(|obj| {
                obj.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect()
            })
            .collect();
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Mutably iterate over records in order.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.iter_mut()
    }

    /// First record, if any.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Keep only records matching the predicate, preserving order.
    pub fn retain<F: FnMut(&Record) -> bool>(&mut self, predicate: F) {
        self.records.retain(predicate);
    }

    /// The set of column names present in at least one record.
    ///
    /// Sorted for deterministic iteration.
    pub fn columns(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.cells.keys().cloned())
            .collect()
    }

    /// Check whether any record carries the given column.
    pub fn has_column(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.cells.contains_key(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_records() {
        let rows = vec![
            serde_json::json!({"data_record_source_id": "AB12", "data_victim_age": 30}),
            serde_json::json!({"data_record_source_id": "CD34", "note": null}),
        ];
        let ds = Dataset::from_json_records(&rows);
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.first().unwrap().get("data_record_source_id"),
            Some(&Value::String("AB12".to_string()))
        );
        assert_eq!(
            ds.records().nth(1).unwrap().get("note"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_columns_union() {
        let rows = vec![
            serde_json::json!({"a": 1}),
            serde_json::json!({"b": 2}),
        ];
        let ds = Dataset::from_json_records(&rows);
        let cols: Vec<String> = ds.columns().into_iter().collect();
        assert_eq!(cols, vec!["a".to_string(), "b".to_string()]);
        assert!(ds.has_column("a"));
        assert!(!ds.has_column("c"));
    }

    #[test]
    fn test_has_value_treats_null_as_absent() {
        let mut record = Record::new();
        record.set("id", Value::Null);
        assert!(!record.has_value("id"));
        record.set("id", Value::String("x".to_string()));
        assert!(record.has_value("id"));
        assert!(!record.has_value("missing"));
    }
}
