//! Mapping configuration loader.
//!
//! The mapping document is a YARRRML-shaped YAML file with two top-level
//! sections:
//!
//! ```yaml
//! prefixes:
//!   ex: "http://example.org/"
//! mappings:
//!   report:
//!     s: "ex:$(data_record_source_id)"
//!     po:
//!       - ["a", "ex:Report"]
//!       - ["ex:seen", "$(data_record_date)", "xsd:dateTime"]
//! ```
//!
//! Parsing is deliberately two-phase: the document is read into loose YAML
//! first, then validated into a strongly-typed [`MappingConfig`] so that a
//! malformed rule fails the load rather than surfacing mid-generation.

use std::collections::HashMap;
use std::path::Path;

use serde_yaml::Value as Yaml;
use tracing::info;

use crate::config::{MappingConfig, MappingRule, PredicateObject};
use crate::error::{MappingError, MappingResult};
use crate::vocab::rdf;

/// Load and validate a mapping configuration from a YAML file.
///
/// Fails fatally if the resource cannot be located or parsed; triple
/// generation is impossible without it.
pub fn load_mapping_config(path: &Path) -> MappingResult<MappingConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MappingError::NotFound(format!("{}: {}", path.display(), e)))?;
    let config = parse_mapping_config(&content)?;
    info!(
        mapping = %path.display(),
        prefixes = config.prefixes.len(),
        rules = config.len(),
        "Mapping configuration loaded"
    );
    Ok(config)
}

/// Parse and validate a mapping configuration from YAML text.
pub fn parse_mapping_config(content: &str) -> MappingResult<MappingConfig> {
    let doc: Yaml = serde_yaml::from_str(content)?;

    let mut prefixes = extract_prefixes(&doc)?;
    if !prefixes.contains_key(rdf::PREFIX) {
        prefixes.insert(rdf::PREFIX.to_string(), rdf::NS.to_string());
    }

    let mappings = extract_mappings(&doc)?;

    Ok(MappingConfig { prefixes, mappings })
}

fn extract_prefixes(doc: &Yaml) -> MappingResult<HashMap<String, String>> {
    let mut prefixes = HashMap::new();
    let Some(section) = doc.get("prefixes") else {
        return Ok(prefixes);
    };

    let mapping = section.as_mapping().ok_or_else(|| MappingError::InvalidRule {
        rule: "prefixes".to_string(),
        message: "expected a mapping of prefix token to namespace IRI".to_string(),
    })?;

    for (key, value) in mapping {
        let (Some(token), Some(ns)) = (key.as_str(), value.as_str()) else {
            return Err(MappingError::InvalidRule {
                rule: "prefixes".to_string(),
                message: "prefix tokens and namespace IRIs must be strings".to_string(),
            });
        };
        prefixes.insert(token.to_string(), ns.to_string());
    }

    Ok(prefixes)
}

fn extract_mappings(doc: &Yaml) -> MappingResult<Vec<MappingRule>> {
    let mut rules = Vec::new();
    let Some(section) = doc.get("mappings") else {
        return Ok(rules);
    };

    let mapping = section.as_mapping().ok_or_else(|| MappingError::InvalidRule {
        rule: "mappings".to_string(),
        message: "expected a mapping of rule name to rule body".to_string(),
    })?;

    // serde_yaml mappings preserve document order, which fixes rule order.
    for (key, body) in mapping {
        let name = key.as_str().unwrap_or_default().to_string();
        rules.push(extract_rule(&name, body)?);
    }

    Ok(rules)
}

fn extract_rule(name: &str, body: &Yaml) -> MappingResult<MappingRule> {
    let invalid = |message: &str| MappingError::InvalidRule {
        rule: name.to_string(),
        message: message.to_string(),
    };

    let subject = body
        .get("s")
        .and_then(Yaml::as_str)
        .ok_or_else(|| invalid("missing subject template 's'"))?
        .to_string();

    let mut predicate_objects = Vec::new();
    if let Some(po_section) = body.get("po") {
        let po_list = po_section
            .as_sequence()
            .ok_or_else(|| invalid("'po' must be a sequence"))?;

        for entry in po_list {
            let parts = entry
                .as_sequence()
                .ok_or_else(|| invalid("each 'po' entry must be a sequence"))?;
            let strings: Vec<&str> = parts.iter().filter_map(Yaml::as_str).collect();
            if strings.len() != parts.len() || !(2..=3).contains(&strings.len()) {
                return Err(invalid(
                    "each 'po' entry must be [predicate, object] or [predicate, object, datatype]",
                ));
            }
            predicate_objects.push(PredicateObject {
                predicate: strings[0].to_string(),
                object: strings[1].to_string(),
                datatype: strings.get(2).map(|s| s.to_string()),
            });
        }
    }

    Ok(MappingRule {
        name: name.to_string(),
        subject,
        predicate_objects,
    })
}
