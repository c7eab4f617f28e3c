//! Typed cell values.

use chrono::NaiveDateTime;

/// A typed dataset cell value.
///
/// Nullable by construction: absence and unparsable input both collapse to
/// [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null / absent marker
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Calendar instant, naive (the CDM carries no timezone information)
    Date(NaiveDateTime),
    String(String),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Render this value for template substitution.
    ///
    /// Nulls render as the empty string so null-tolerant templates can skip
    /// triples rather than abort. Strings are trimmed; dates render as
    /// ISO 8601 (`%Y-%m-%dT%H:%M:%S`), the form the mapping's xsd:dateTime
    /// annotations expect.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Date(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Value::String(s) => s.trim().to_string(),
        }
    }

    /// Convert a JSON value into a typed cell value.
    ///
    /// Whole-number JSON numbers become [`Value::Int`], other numbers
    /// [`Value::Float`]. Non-scalar JSON (arrays, objects) is kept as its
    /// serialized text so no input is silently dropped.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}
