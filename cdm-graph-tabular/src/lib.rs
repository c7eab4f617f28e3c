//! Typed record types and cleaning for the CDM graph pipeline.
//!
//! This crate provides the in-memory dataset representation used between
//! ingestion and triple generation, plus the [`DataCleaner`] that filters
//! incomplete records, coerces values to their declared formats, and applies
//! the fixed coordinate-rounding anonymization rule.
//!
//! # Design
//!
//! - **Strongly typed**: All cell access is through the [`Value`] enum, no
//!   `dyn Any`
//! - **Null-tolerant coercion**: a value that fails to parse for its declared
//!   format becomes [`Value::Null`], never an error — downstream templating
//!   renders nulls as empty strings
//! - **Row-ordered**: a [`Dataset`] is an ordered sequence of independent
//!   records; cleaning preserves relative order

pub mod clean;
pub mod dataset;
pub mod dates;
pub mod value;

pub use clean::{CleanReport, CleanerConfig, DataCleaner};
pub use dataset::{Dataset, Record};
pub use dates::parse_date_permissive;
pub use value::Value;
