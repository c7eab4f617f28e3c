//! Strongly-typed mapping configuration.
//!
//! Produced by the [`crate::loader`] module from the loosely-structured YAML
//! document, and consumed by the [`crate::generate`] layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vocab::rdf;

/// One predicate/object generation rule within a mapping rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateObject {
    /// Predicate template; the token `a` is shorthand for rdf:type
    pub predicate: String,
    /// Object template, placeholder-substituted per record
    pub object: String,
    /// Optional datatype annotation for literal objects
    pub datatype: Option<String>,
}

/// A named mapping rule: one subject template plus its predicate/object
/// rules, applied once per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    /// Rule name from the configuration document
    pub name: String,
    /// Subject template string
    pub subject: String,
    /// Predicate/object rules in declaration order
    pub predicate_objects: Vec<PredicateObject>,
}

/// In-memory mapping configuration: namespace prefixes plus mapping rules
/// in declaration order.
///
/// The `rdf` prefix is always present — the loader injects the standard RDF
/// namespace when the document omits it, so `a` / `rdf:type` shorthand
/// always resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Short prefix token → namespace IRI
    pub prefixes: HashMap<String, String>,
    /// Named mapping rules, in document order
    pub mappings: Vec<MappingRule>,
}

impl MappingConfig {
    /// The namespace IRI registered for the `rdf` prefix.
    pub fn rdf_namespace(&self) -> &str {
        self.prefixes
            .get(rdf::PREFIX)
            .map(String::as_str)
            .unwrap_or(rdf::NS)
    }

    /// Number of mapping rules.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Check if the configuration has no mapping rules.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
