//! `$(Column)` placeholder substitution.
//!
//! A minimal templating abstraction: a pure function from `(template,
//! record)` to the substituted string, with no side effects. Null and absent
//! columns resolve to the empty string — skip decisions belong to the
//! generation layer, not here.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use cdm_graph_tabular::Record;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\(([^)]+)\)").expect("valid regex"));

/// Replace every `$(ColumnName)` placeholder in `template` with the
/// record's rendered value for that column.
///
/// A column that is absent or null substitutes to the empty string; this
/// never fails.
pub fn substitute_placeholders(template: &str, record: &Record) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            record
                .get(&caps[1])
                .map(|value| value.render())
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_graph_tabular::Value;

    fn record(cells: &[(&str, Value)]) -> Record {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_substitute_single() {
        let r = record(&[("id", Value::String("AB12".to_string()))]);
        assert_eq!(substitute_placeholders("ex:$(id)", &r), "ex:AB12");
    }

    #[test]
    fn test_substitute_multiple() {
        let r = record(&[
            ("a", Value::Int(1)),
            ("b", Value::String("two".to_string())),
        ]);
        assert_eq!(substitute_placeholders("$(a)/$(b)/$(a)", &r), "1/two/1");
    }

    #[test]
    fn test_missing_column_is_empty() {
        let r = Record::new();
        assert_eq!(substitute_placeholders("ex:case_$(missing)", &r), "ex:case_");
    }

    #[test]
    fn test_null_is_empty() {
        let r = record(&[("id", Value::Null)]);
        assert_eq!(substitute_placeholders("before$(id)after", &r), "beforeafter");
    }

    #[test]
    fn test_no_placeholders_passes_through() {
        let r = Record::new();
        assert_eq!(substitute_placeholders("ex:Constant", &r), "ex:Constant");
    }

    #[test]
    fn test_value_rendering_trims_strings() {
        let r = record(&[("id", Value::String("  X1 ".to_string()))]);
        assert_eq!(substitute_placeholders("$(id)", &r), "X1");
    }
}
