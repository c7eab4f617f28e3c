//! Triple generation from a cleaned dataset and a mapping configuration.

use std::fmt;

use tracing::debug;

use cdm_graph_tabular::{Dataset, Record};

use crate::config::{MappingConfig, MappingRule};
use crate::template::substitute_placeholders;
use crate::term::{expand_prefixed, is_prefixed_resource, RdfTerm};

/// One RDF statement.
///
/// Subject and predicate are fully expanded IRIs; the object is either an
/// IRI or a literal. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: RdfTerm,
}

impl fmt::Display for Triple {
    /// N-Triples statement form, terminating `.` included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Options for triple generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// A resolved subject ending in one of these suffixes carries no real
    /// identifying data (the template's placeholders all substituted empty);
    /// the whole mapping rule is skipped for that record.
    pub skip_suffixes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            skip_suffixes: vec![
                "case_".to_string(),
                "victim_current_place_".to_string(),
                "departure_place_".to_string(),
                "destination_place_".to_string(),
            ],
        }
    }
}

/// Generates RDF triples by applying every mapping rule to every record.
///
/// Output order is dataset record order × mapping declaration order ×
/// predicate/object declaration order; given the same inputs the output is
/// byte-identical.
#[derive(Debug, Clone)]
pub struct TripleGenerator<'a> {
    config: &'a MappingConfig,
    options: GeneratorConfig,
}

impl<'a> TripleGenerator<'a> {
    /// Create a generator over a mapping configuration with default options.
    pub fn new(config: &'a MappingConfig) -> Self {
        Self::with_options(config, GeneratorConfig::default())
    }

    /// Create a generator with explicit options.
    pub fn with_options(config: &'a MappingConfig, options: GeneratorConfig) -> Self {
        Self { config, options }
    }

    /// Generate the ordered triple sequence for a dataset.
    pub fn generate(&self, dataset: &Dataset) -> Vec<Triple> {
        let mut triples = Vec::new();
        for record in dataset.records() {
            for rule in &self.config.mappings {
                self.apply_rule(rule, record, &mut triples);
            }
        }
        debug!(triples = triples.len(), "Triple generation complete");
        triples
    }

    /// Apply one mapping rule to one record.
    fn apply_rule(&self, rule: &MappingRule, record: &Record, out: &mut Vec<Triple>) {
        let substituted = substitute_placeholders(&rule.subject, record);
        let subject = expand_prefixed(&substituted, &self.config.prefixes);

        if self.skip_subject(&subject) {
            return;
        }

        for po in &rule.predicate_objects {
            let predicate = self.resolve_predicate(&po.predicate);

            let object_text = substitute_placeholders(&po.object, record).trim().to_string();
            if object_text.is_empty() {
                // Only this predicate/object pair is skipped; the subject's
                // other rules still proceed.
                continue;
            }

            let object = if is_prefixed_resource(&po.object, &self.config.prefixes) {
                RdfTerm::Iri(expand_prefixed(&object_text, &self.config.prefixes))
            } else {
                match &po.datatype {
                    Some(dt) => RdfTerm::typed(
                        object_text,
                        expand_prefixed(dt, &self.config.prefixes),
                    ),
                    None => RdfTerm::literal(object_text),
                }
            };

            out.push(Triple {
                subject: subject.clone(),
                predicate,
                object,
            });
        }
    }

    /// True when a resolved subject is empty or placeholder-only.
    fn skip_subject(&self, subject: &str) -> bool {
        subject.is_empty()
            || self
                .options
                .skip_suffixes
                .iter()
                .any(|suffix| subject.ends_with(suffix.as_str()))
    }

    /// Expand a predicate template; `a` is rdf:type shorthand.
    fn resolve_predicate(&self, predicate: &str) -> String {
        if predicate == "a" {
            format!("{}type", self.config.rdf_namespace())
        } else {
            expand_prefixed(predicate, &self.config.prefixes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_mapping_config;
    use cdm_graph_tabular::Value;

    fn dataset(rows: &[serde_json::Value]) -> Dataset {
        Dataset::from_json_records(rows)
    }

    const MAPPING: &str = r#"
prefixes:
  ex: "http://ex.org/"
  xsd: "http://www.w3.org/2001/XMLSchema#"
mappings:
  report:
    s: "ex:$(data_record_source_id)"
    po:
      - ["a", "ex:Report"]
      - ["ex:note", "$(note)"]
      - ["ex:age", "$(age)", "xsd:integer"]
      - ["ex:place", "ex:place_$(place)"]
"#;

    #[test]
    fn test_rdf_type_shorthand() {
        let config = parse_mapping_config(MAPPING).unwrap();
        let ds = dataset(&[serde_json::json!({"data_record_source_id": "AB12"})]);
        let triples = TripleGenerator::new(&config).generate(&ds);

        assert_eq!(triples[0].subject, "http://ex.org/AB12");
        assert_eq!(
            triples[0].predicate,
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(triples[0].object, RdfTerm::iri("http://ex.org/Report"));
        assert_eq!(
            triples[0].to_string(),
            "<http://ex.org/AB12> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex.org/Report> ."
        );
    }

    #[test]
    fn test_literal_vs_resource_classification() {
        let config = parse_mapping_config(MAPPING).unwrap();
        let ds = dataset(&[serde_json::json!({
            "data_record_source_id": "AB12",
            "note": "a note",
            "age": 30,
            "place": "lagos"
        })]);
        let triples = TripleGenerator::new(&config).generate(&ds);
        assert_eq!(triples.len(), 4);

        // Plain template → literal
        assert_eq!(triples[1].object, RdfTerm::literal("a note"));
        // Datatype annotation → typed literal, datatype CURIE expanded
        assert_eq!(
            triples[2].object,
            RdfTerm::typed("30", "http://www.w3.org/2001/XMLSchema#integer")
        );
        // Raw template starting with a known prefix → resource
        assert_eq!(
            triples[3].object,
            RdfTerm::iri("http://ex.org/place_lagos")
        );
    }

    #[test]
    fn test_empty_object_skips_single_triple() {
        let config = parse_mapping_config(MAPPING).unwrap();
        let ds = dataset(&[serde_json::json!({
            "data_record_source_id": "AB12",
            "age": 30
        })]);
        let triples = TripleGenerator::new(&config).generate(&ds);

        // "note" absent → its triple skipped; type, age, place survive?
        // place substitutes to "ex:place_" then expands — non-empty, kept.
        let predicates: Vec<&str> = triples.iter().map(|t| t.predicate.as_str()).collect();
        assert!(!predicates.contains(&"http://ex.org/note"));
        assert!(predicates.contains(&"http://ex.org/age"));
    }

    #[test]
    fn test_subject_skip_suffix() {
        let yaml = r#"
prefixes:
  ex: "http://ex.org/"
mappings:
  case:
    s: "ex:case_$(case_id)"
    po:
      - ["a", "ex:Case"]
  report:
    s: "ex:$(data_record_source_id)"
    po:
      - ["a", "ex:Report"]
"#;
        let config = parse_mapping_config(yaml).unwrap();
        let ds = dataset(&[serde_json::json!({"data_record_source_id": "AB12"})]);
        let triples = TripleGenerator::new(&config).generate(&ds);

        // The case rule resolved to ...case_ with no data: skipped entirely.
        // The report rule for the same record still proceeds.
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].object, RdfTerm::iri("http://ex.org/Report"));
    }

    #[test]
    fn test_empty_subject_skips_rule() {
        let yaml = r#"
mappings:
  anon:
    s: "$(missing)"
    po:
      - ["a", "rdf:Property"]
"#;
        let config = parse_mapping_config(yaml).unwrap();
        let ds = dataset(&[serde_json::json!({"x": 1})]);
        assert!(TripleGenerator::new(&config).generate(&ds).is_empty());
    }

    #[test]
    fn test_bracketed_subject_verbatim() {
        let yaml = r#"
mappings:
  fixed:
    s: "<http://x/y>"
    po:
      - ["a", "rdf:Statement"]
"#;
        let config = parse_mapping_config(yaml).unwrap();
        let ds = dataset(&[serde_json::json!({})]);
        let triples = TripleGenerator::new(&config).generate(&ds);
        assert_eq!(triples[0].subject, "http://x/y");
    }

    #[test]
    fn test_output_order_and_determinism() {
        let config = parse_mapping_config(MAPPING).unwrap();
        let ds = dataset(&[
            serde_json::json!({"data_record_source_id": "A", "note": "first"}),
            serde_json::json!({"data_record_source_id": "B", "note": "second"}),
        ]);
        let generator = TripleGenerator::new(&config);
        let run1 = generator.generate(&ds);
        let run2 = generator.generate(&ds);
        assert_eq!(run1, run2);

        let subjects: Vec<&str> = run1.iter().map(|t| t.subject.as_str()).collect();
        // All of record A's triples precede record B's
        let last_a = subjects.iter().rposition(|s| *s == "http://ex.org/A").unwrap();
        let first_b = subjects.iter().position(|s| *s == "http://ex.org/B").unwrap();
        assert!(last_a < first_b);
    }

    #[test]
    fn test_null_values_substitute_empty() {
        let config = parse_mapping_config(MAPPING).unwrap();
        let ds = dataset(&[serde_json::json!({
            "data_record_source_id": "AB12",
            "note": null
        })]);
        let triples = TripleGenerator::new(&config).generate(&ds);
        assert!(triples
            .iter()
            .all(|t| t.predicate != "http://ex.org/note"));
    }
}
