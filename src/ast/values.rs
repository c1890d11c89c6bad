/// Column name that always becomes the primary key.
pub const PRIMARY_KEY_COLUMN: &str = "_id";

/// Floats at or above this magnitude print in exponent form.
const FLOAT_EXP_UPPER: f64 = 1e21;
/// Non-zero floats below this magnitude print in exponent form.
const FLOAT_EXP_LOWER: f64 = 1e-7;

/// A scalar document value.
///
/// Nested documents, arrays and `null` never reach the generators as-is:
/// they are stringified on the way in (see `From<serde_json::Value>`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// Boolean
    Bool(bool),
    /// String (or any stringified non-scalar)
    String(String),
}

impl Value {
    /// SQL column type inferred from this value.
    ///
    /// A column named `_id` additionally becomes the primary key.
    ///
    /// # Example
    ///
    /// ```
    /// use oplog2sql::ast::Value;
    ///
    /// assert_eq!(Value::Int(1).sql_type("_id"), "INTEGER PRIMARY KEY");
    /// assert_eq!(Value::from("x").sql_type("name"), "VARCHAR(255)");
    /// ```
    pub fn sql_type(&self, column: &str) -> String {
        let base = match self {
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::Bool(_) => "BOOLEAN",
            Value::String(_) => "VARCHAR(255)",
        };
        if column == PRIMARY_KEY_COLUMN {
            format!("{} PRIMARY KEY", base)
        } else {
            base.to_string()
        }
    }

    /// SQL literal for this value. Same as `to_string()`.
    pub fn literal(&self) -> String {
        self.to_string()
    }
}

/// Renders the SQL literal. Strings are single-quoted without escaping.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => {
                let abs = n.abs();
                if abs >= FLOAT_EXP_UPPER || (abs != 0.0 && abs < FLOAT_EXP_LOWER) {
                    write!(f, "{:e}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literals() {
        assert_eq!(Value::Int(42).literal(), "42");
        assert_eq!(Value::Int(-7).literal(), "-7");
        assert_eq!(Value::Float(1.5).literal(), "1.5");
        assert_eq!(Value::Bool(true).literal(), "true");
        assert_eq!(Value::Bool(false).literal(), "false");
        assert_eq!(Value::from("Selena Miller").literal(), "'Selena Miller'");
    }

    #[test]
    fn test_float_literal_forms() {
        assert_eq!(Value::Float(2.0).literal(), "2");
        assert_eq!(Value::Float(123456.75).literal(), "123456.75");
        assert_eq!(Value::Float(1e20).literal(), "100000000000000000000");
        assert_eq!(Value::Float(1e300).literal(), "1e300");
        assert_eq!(Value::Float(-2.5e21).literal(), "-2.5e21");
        assert_eq!(Value::Float(1.5e-10).literal(), "1.5e-10");
        assert_eq!(Value::Float(0.001).literal(), "0.001");
        assert_eq!(Value::Float(0.0).literal(), "0");
    }

    #[test]
    fn test_string_literal_is_not_escaped() {
        assert_eq!(Value::from("O'Brien").literal(), "'O'Brien'");
    }

    #[test]
    fn test_numeric_strings_stay_quoted() {
        assert_eq!(Value::from("42").literal(), "'42'");
        assert_eq!(Value::from("true").literal(), "'true'");
    }

    #[test]
    fn test_sql_types() {
        assert_eq!(Value::Int(1).sql_type("age"), "INTEGER");
        assert_eq!(Value::Float(1.0).sql_type("score"), "FLOAT");
        assert_eq!(Value::Bool(true).sql_type("is_graduated"), "BOOLEAN");
        assert_eq!(Value::from("x").sql_type("name"), "VARCHAR(255)");
    }

    #[test]
    fn test_primary_key_suffix() {
        assert_eq!(Value::Int(1).sql_type("_id"), "INTEGER PRIMARY KEY");
        assert_eq!(
            Value::from("635b79e231d82a8ab1de863b").sql_type("_id"),
            "VARCHAR(255) PRIMARY KEY"
        );
        assert_eq!(Value::Int(1).sql_type("id"), "INTEGER");
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from(json!(5)), Value::Int(5));
        assert_eq!(Value::from(json!(5.25)), Value::Float(5.25));
        assert_eq!(Value::from(json!(false)), Value::Bool(false));
        assert_eq!(Value::from(json!("a")), Value::from("a"));
    }

    #[test]
    fn test_from_json_non_scalars_are_stringified() {
        assert_eq!(Value::from(json!(null)), Value::from("null"));
        assert_eq!(Value::from(json!([1, 2])), Value::from("[1,2]"));
        assert_eq!(
            Value::from(json!({"city": "Oslo"})),
            Value::from(r#"{"city":"Oslo"}"#)
        );
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let v = Value::from(json!(u64::MAX));
        assert!(matches!(v, Value::Float(_)));
    }
}
