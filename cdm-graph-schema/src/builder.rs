//! Flat-column format map construction from a CDM schema description.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{Result, SchemaError};
use crate::format::ColumnFormat;
use crate::normalize::normalize_name;

const LEVEL_1: &str = "Level 1";
const LEVEL_2: &str = "Level 2";
const LEVEL_3: &str = "Level 3";
const FORMAT: &str = "Format";

/// Configuration for schema map construction.
///
/// Carries the fixed sets the builder needs so the engine is testable with
/// synthetic schemas instead of ambient constants.
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    /// Level-1 group names whose columns carry core data (vs. metadata)
    pub data_groups: Vec<String>,
    /// Prefix prepended to flat names of data-bearing columns
    pub data_prefix: String,
    /// Declared `Format` cell → column format translation table
    pub type_translation: HashMap<String, ColumnFormat>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let type_translation = [
            ("Integer", ColumnFormat::Int),
            ("String", ColumnFormat::String),
            ("String (predefined)", ColumnFormat::String),
            ("Date", ColumnFormat::Date),
            ("Decimal", ColumnFormat::Float),
            ("URL", ColumnFormat::String),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            data_groups: vec![
                "record".to_string(),
                "victim".to_string(),
                "incident".to_string(),
            ],
            data_prefix: "data_".to_string(),
            type_translation,
        }
    }
}

/// Mapping from flat column name to declared format.
///
/// Flat names are unique within a map; a later schema row composing the same
/// flat name overwrites the earlier entry (last-write-wins).
#[derive(Debug, Clone, Default)]
pub struct ColumnFormatMap {
    entries: HashMap<String, ColumnFormat>,
}

impl ColumnFormatMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry for the same name.
    pub fn insert(&mut self, flat_name: impl Into<String>, format: ColumnFormat) {
        self.entries.insert(flat_name.into(), format);
    }

    /// Look up the declared format for a flat column name.
    pub fn get(&self, flat_name: &str) -> Option<ColumnFormat> {
        self.entries.get(flat_name).copied()
    }

    /// Check whether a flat column name has a declared format.
    pub fn contains(&self, flat_name: &str) -> bool {
        self.entries.contains_key(flat_name)
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(flat_name, format)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnFormat)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Builds a [`ColumnFormatMap`] from a tabular CDM schema description.
///
/// The schema source must carry `Level 1`, `Level 2`, `Level 3`, and
/// `Format` columns. See the crate docs for the flat-name composition rules.
#[derive(Debug, Clone, Default)]
pub struct SchemaMapBuilder {
    config: SchemaConfig,
}

impl SchemaMapBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    /// Build the format map from a schema CSV file on disk.
    ///
    /// An unreadable or malformed schema is fatal; a schema that parses to
    /// zero entries is valid and yields an empty map.
    pub fn build_from_path(&self, path: &Path) -> Result<ColumnFormatMap> {
        let file = std::fs::File::open(path)?;
        let map = self.build_from_reader(file)?;
        info!(
            schema = %path.display(),
            columns = map.len(),
            "CDM schema loaded"
        );
        Ok(map)
    }

    /// Build the format map from any CSV reader.
    pub fn build_from_reader<R: Read>(&self, reader: R) -> Result<ColumnFormatMap> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let level1_idx = column_index(&headers, LEVEL_1)?;
        let level2_idx = column_index(&headers, LEVEL_2)?;
        let level3_idx = column_index(&headers, LEVEL_3)?;
        let format_idx = column_index(&headers, FORMAT)?;

        let mut map = ColumnFormatMap::new();

        // Forward-fill state for the two inheriting columns. Carries operate
        // on raw cell values; normalization happens per-row afterwards.
        let mut carry_level1: Option<String> = None;
        let mut carry_level2: Option<String> = None;

        for record in csv_reader.records() {
            let record = record?;

            let level1 = filled_cell(&record, level1_idx, &mut carry_level1);
            let level2 = filled_cell(&record, level2_idx, &mut carry_level2);
            // Level 3 never inherits
            let level3 = record.get(level3_idx).unwrap_or("").to_string();

            let parts: Vec<String> = [&level1, &level2, &level3]
                .into_iter()
                .filter_map(|cell| normalize_name(cell))
                .collect();

            if parts.is_empty() {
                continue;
            }

            let mut flat_name = parts.join("_");

            let format_cell = record.get(format_idx).unwrap_or("").trim();
            let format = self
                .config
                .type_translation
                .get(format_cell)
                .copied()
                .unwrap_or(ColumnFormat::Unknown);

            // Core data columns get the reserved prefix; the first part is
            // the normalized Level 1 value by construction.
            if self.config.data_groups.contains(&parts[0]) {
                flat_name = format!("{}{}", self.config.data_prefix, flat_name);
            }

            map.insert(flat_name, format);
        }

        Ok(map)
    }
}

/// Resolve a header name to its column index.
fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(SchemaError::MissingColumn(name))
}

/// Read a cell with forward-fill: a blank cell inherits the carried value,
/// a non-blank cell replaces it.
fn filled_cell(record: &csv::StringRecord, idx: usize, carry: &mut Option<String>) -> String {
    let raw = record.get(idx).unwrap_or("");
    if raw.trim().is_empty() {
        carry.clone().unwrap_or_default()
    } else {
        *carry = Some(raw.to_string());
        raw.to_string()
    }
}
