//! Mapping-driven RDF triple generation for the CDM graph pipeline.
//!
//! This crate interprets a declarative, hand-authored mapping configuration
//! (namespace prefixes plus named subject/predicate-object rules) against a
//! cleaned dataset and emits an ordered sequence of RDF triples, serialized
//! as N-Triples.
//!
//! # Key pieces
//!
//! - **Config loading**: parse the YAML mapping document loosely, then
//!   validate into a strongly-typed [`MappingConfig`] so malformed rules are
//!   rejected at load time, not in the per-record generation loop
//! - **Templating**: `$(Column)` placeholders substitute record values, an
//!   absent column resolving to the empty string
//! - **Term resolution**: CURIEs expand through the prefix table, bracketed
//!   IRIs pass through verbatim, everything else is a literal
//! - **Determinism**: output order is dataset record order × mapping
//!   declaration order × predicate/object declaration order, byte-identical
//!   across runs

pub mod config;
pub mod error;
pub mod generate;
pub mod loader;
pub mod nt;
pub mod template;
pub mod term;
pub mod vocab;

pub use config::{MappingConfig, MappingRule, PredicateObject};
pub use error::{MappingError, MappingResult, WriteError};
pub use generate::{GeneratorConfig, Triple, TripleGenerator};
pub use loader::{load_mapping_config, parse_mapping_config};
pub use nt::{ntriples_document, write_ntriples};
pub use template::substitute_placeholders;
pub use term::{escape_literal, expand_prefixed, is_prefixed_resource, RdfTerm};
