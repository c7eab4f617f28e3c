//! CDM schema support for the CDM graph pipeline.
//!
//! The Common Data Model (CDM) describes expected dataset columns through a
//! three-level hierarchy (`Level 1` / `Level 2` / `Level 3`) plus a declared
//! `Format` per leaf. This crate reads that tabular schema description and
//! produces a [`ColumnFormatMap`]: flat snake_case column name → declared
//! column format, which the cleaning layer uses to coerce dataset values.
//!
//! # Flat column names
//!
//! Each schema row's non-empty levels are normalized (trim, lowercase,
//! spaces → underscores) and joined with `_`. `Level 1` and `Level 2` cells
//! inherit the nearest preceding non-blank value in their column; `Level 3`
//! never inherits. Rows whose `Level 1` belongs to a data-bearing group
//! (record, victim, incident by default) get a reserved `data_` prefix so
//! core data columns stay distinguishable from metadata columns.

pub mod builder;
pub mod error;
pub mod format;
pub mod normalize;

pub use builder::{ColumnFormatMap, SchemaConfig, SchemaMapBuilder};
pub use error::{Result, SchemaError};
pub use format::ColumnFormat;
pub use normalize::normalize_name;
