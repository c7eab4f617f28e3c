//! RDF term resolution and N-Triples escaping.

use std::collections::HashMap;
use std::fmt;

/// A resolved RDF object term.
///
/// Either a resource reference or a literal with an optional datatype IRI.
/// Terms are immutable once produced; their only lifecycle is construction
/// then serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdfTerm {
    /// An IRI reference
    Iri(String),
    /// A literal with optional datatype annotation
    Literal {
        value: String,
        datatype: Option<String>,
    },
}

impl RdfTerm {
    /// Create an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        RdfTerm::Iri(iri.into())
    }

    /// Create a plain literal.
    pub fn literal(value: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            datatype: None,
        }
    }

    /// Create a typed literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
        }
    }

    /// Check if this is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, RdfTerm::Iri(_))
    }
}

impl fmt::Display for RdfTerm {
    /// N-Triples form of the term. Literal escaping happens exactly here;
    /// no other layer transforms literal text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::Iri(iri) => write!(f, "<{}>", iri),
            RdfTerm::Literal { value, datatype } => {
                write!(f, "\"{}\"", escape_literal(value))?;
                if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)?;
                }
                Ok(())
            }
        }
    }
}

/// Resolve a CURIE or IRI reference to a full IRI string.
///
/// - `<iri>` is used verbatim, brackets stripped
/// - `prefix:local` with a known prefix expands to `namespace + local`
/// - anything else is returned unchanged (an unrecognized prefix is not an
///   error; the token may be a plain value)
pub fn expand_prefixed(value: &str, prefixes: &HashMap<String, String>) -> String {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('<') && value.ends_with('>') {
        return value[1..value.len() - 1].to_string();
    }
    if let Some((prefix, local)) = value.split_once(':') {
        if let Some(ns) = prefixes.get(prefix) {
            return format!("{}{}", ns, local);
        }
    }
    value.to_string()
}

/// Decide whether a raw object template denotes a resource reference.
///
/// True when the template starts with a registered prefix followed by `:`.
/// Classification looks at the *unsubstituted* template so that substituted
/// data can never turn a literal rule into a resource rule.
pub fn is_prefixed_resource(raw_template: &str, prefixes: &HashMap<String, String>) -> bool {
    let raw = raw_template.trim();
    prefixes
        .keys()
        .any(|prefix| raw.len() > prefix.len() && raw.starts_with(prefix) && raw[prefix.len()..].starts_with(':'))
}

/// Escape a value for embedding in an N-Triples literal.
///
/// Backslash first, then double-quote, newline, carriage-return.
pub fn escape_literal(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
