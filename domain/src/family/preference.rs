//! Preference value object
//!
//! Families express preferences as loosely-typed JSON values. Instead of
//! duck typing, every value is one of a fixed set of variants, and each
//! variant has a canonical text form used for conflict comparison.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt::{self, Write as _};

/// A single preference value supplied by a family (Value Object)
///
/// # Example
///
/// ```
/// use pathfinder_domain::PreferenceValue;
///
/// let budget = PreferenceValue::from("low");
/// assert_eq!(budget.to_string(), "low");
///
/// let activities = PreferenceValue::list(["hiking", "museum"]);
/// assert_eq!(activities.to_string(), "['hiking', 'museum']");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Yes/no preference (treated as categorical)
    Flag(bool),
    /// Numeric preference, aggregated by weighted average
    Numeric(Number),
    /// Free-form categorical preference (e.g. "low", "beach")
    Categorical(String),
    /// List preference, aggregated by weighted frequency
    List(Vec<PreferenceValue>),
    /// Arbitrary structured preference (category-specific shape)
    Structured(Map<String, Value>),
}

impl PreferenceValue {
    /// Build a list preference from anything convertible into values
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PreferenceValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a numeric preference from a float.
    ///
    /// Non-finite numbers cannot be represented and become `None`.
    pub fn number(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::Numeric)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Numeric value, if this is a numeric preference
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(n) => n.as_f64(),
            _ => None,
        }
    }

    /// List items, if this is a list preference
    pub fn as_list(&self) -> Option<&[PreferenceValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Categorical text, if this is a categorical preference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Categorical(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical text form used for equality checks between families.
    ///
    /// Lists are order-sensitive: `['a', 'b']` and `['b', 'a']` differ.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Render as a nested element (strings quoted)
    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical(s) => write_quoted(f, s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write_flag(f, *b),
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Categorical(s) => write!(f, "{}", s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_nested(f)?;
                }
                f.write_str("]")
            }
            Self::Structured(map) => write_map(f, map),
        }
    }
}

fn write_flag(f: &mut fmt::Formatter<'_>, b: bool) -> fmt::Result {
    f.write_str(if b { "True" } else { "False" })
}

/// Quote a nested string: single quotes unless the text holds a `'` and no
/// `"`. Backslashes, control characters and the chosen quote are escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

fn write_map(f: &mut fmt::Formatter<'_>, map: &Map<String, Value>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_quoted(f, key)?;
        f.write_str(": ")?;
        write_json(f, value)?;
    }
    f.write_str("}")
}

fn write_json(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("None"),
        Value::Bool(b) => write_flag(f, *b),
        Value::Number(n) => write!(f, "{}", n),
        Value::String(s) => write_quoted(f, s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_json(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => write_map(f, map),
    }
}

impl From<&str> for PreferenceValue {
    fn from(s: &str) -> Self {
        Self::Categorical(s.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(s: String) -> Self {
        Self::Categorical(s)
    }
}

impl From<bool> for PreferenceValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<i64> for PreferenceValue {
    fn from(n: i64) -> Self {
        Self::Numeric(Number::from(n))
    }
}

impl From<i32> for PreferenceValue {
    fn from(n: i32) -> Self {
        Self::Numeric(Number::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_renders_bare() {
        assert_eq!(PreferenceValue::from("beach").canonical(), "beach");
    }

    #[test]
    fn test_numbers_keep_integer_form() {
        assert_eq!(PreferenceValue::from(3).canonical(), "3");
        assert_eq!(PreferenceValue::number(2.5).unwrap().canonical(), "2.5");
        assert_eq!(PreferenceValue::number(3.0).unwrap().canonical(), "3.0");
    }

    #[test]
    fn test_list_rendering_is_order_sensitive() {
        let ab = PreferenceValue::list(["a", "b"]);
        let ba = PreferenceValue::list(["b", "a"]);
        assert_eq!(ab.canonical(), "['a', 'b']");
        assert_ne!(ab.canonical(), ba.canonical());
    }

    #[test]
    fn test_flag_rendering() {
        assert_eq!(PreferenceValue::from(true).canonical(), "True");
        assert_eq!(PreferenceValue::from(false).canonical(), "False");
    }

    #[test]
    fn test_deserialize_variants() {
        let value: PreferenceValue = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(value, PreferenceValue::from("low"));

        let value: PreferenceValue = serde_json::from_str("4").unwrap();
        assert!(value.is_numeric());
        assert_eq!(value.as_f64(), Some(4.0));

        let value: PreferenceValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, PreferenceValue::Flag(true));

        let value: PreferenceValue = serde_json::from_str(r#"["hiking", 2]"#).unwrap();
        assert!(value.is_list());
        assert_eq!(value.canonical(), "['hiking', 2]");
    }

    #[test]
    fn test_structured_rendering() {
        let value: PreferenceValue =
            serde_json::from_str(r#"{"room": "suite", "beds": 2, "view": null}"#).unwrap();
        assert_eq!(value.canonical(), "{'room': 'suite', 'beds': 2, 'view': None}");
    }

    #[test]
    fn test_quoted_apostrophe() {
        let value = PreferenceValue::list(["kid's menu"]);
        assert_eq!(value.canonical(), "[\"kid's menu\"]");
    }

    #[test]
    fn test_quoted_escapes() {
        let value = PreferenceValue::list(["C:\\trips", "line\nbreak", "tab\there", "both ' and \""]);
        assert_eq!(
            value.canonical(),
            r#"['C:\\trips', 'line\nbreak', 'tab\there', 'both \' and "']"#
        );

        let bell = PreferenceValue::list(["ring\u{7}"]);
        assert_eq!(bell.canonical(), r"['ring\x07']");
    }

    #[test]
    fn test_escaped_strings_stay_distinct() {
        let newline = PreferenceValue::list(["a\nb"]);
        let literal = PreferenceValue::list(["a\\nb"]);
        assert_ne!(newline.canonical(), literal.canonical());
    }
}
