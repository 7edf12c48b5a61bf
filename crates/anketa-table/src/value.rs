use serde::{Deserialize, Serialize};

/// A single cell of a [`Table`](crate::Table).
///
/// Survey exports mix numeric responses, free-text answers, and blanks, so a
/// cell is one of three things: a number, a text value, or missing. Missing
/// values are first-class — they are counted by frequency analysis and
/// excluded from numeric computation, never silently dropped.
///
/// Serialized form is untagged: numbers as JSON numbers, text as strings,
/// missing as `null`, matching what a file-parsing collaborator naturally
/// produces.
///
/// # Examples
///
/// ```
/// use anketa_table::Value;
///
/// assert_eq!(Value::Number(4.0).as_number(), Some(4.0));
/// assert_eq!(Value::Text("5".into()).as_number(), Some(5.0));
/// assert_eq!(Value::Text("agree".into()).as_number(), None);
/// assert_eq!(Value::Missing.as_number(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric response.
    Number(f64),
    /// A textual response.
    Text(String),
    /// No response recorded.
    Missing,
}

impl Value {
    /// Returns `true` if the cell holds no value.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Coerces the cell to a number.
    ///
    /// Numbers pass through, text is parsed as a decimal number, and
    /// anything non-coercible (including missing cells) yields `None`.
    /// Composite-score building uses this to turn item columns numeric
    /// before summation.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Missing => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Self::Missing, Self::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_coercion() {
        assert_eq!(Value::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Value::Text(" 42 ".into()).as_number(), Some(42.0));
        assert_eq!(Value::Text("n/a".into()).as_number(), None);
        assert_eq!(Value::Missing.as_number(), None);
    }

    #[test]
    fn test_untagged_serde_roundtrip() {
        let values = vec![Value::Number(1.0), Value::Text("yes".into()), Value::Missing];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1.0,"yes",null]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
