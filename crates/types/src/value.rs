//! The scalar value model.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset};

use crate::datetime::{self, DISPLAY_FORMAT};
use crate::ternary::Ternary;

/// A single scalar held by a record field.
///
/// Every variant has a defined rendering and defined boolean and ternary
/// coercions; none of them can fail.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(DateTime<FixedOffset>),
    Ternary(Ternary),
    /// NULL, optionally remembering the spelling it was written with.
    Null(Option<String>),
}

impl Value {
    pub const NULL: Value = Value::Null(None);

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// A NULL that renders as `literal` instead of `NULL`.
    pub fn null_from_literal(literal: impl Into<String>) -> Self {
        Value::Null(Some(literal.into()))
    }

    pub fn datetime_from_str(text: &str, location: FixedOffset) -> Option<Self> {
        datetime::parse_datetime(text, location).map(Value::Datetime)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// SQL-literal rendering: strings and datetimes are single-quoted.
    pub fn render(&self) -> String {
        match self {
            Value::String(s) => format!("'{s}'"),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Datetime(dt) => format!("'{}'", dt.format(DISPLAY_FORMAT)),
            Value::Ternary(t) => t.to_string(),
            Value::Null(Some(literal)) => literal.clone(),
            Value::Null(None) => "NULL".to_string(),
        }
    }

    /// Unquoted text form; `None` for NULL.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Integer(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) => Some(Cow::Owned(f.to_string())),
            Value::Boolean(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Datetime(dt) => Some(Cow::Owned(dt.format(DISPLAY_FORMAT).to_string())),
            Value::Ternary(t) => Some(Cow::Borrowed(t.as_str())),
            Value::Null(_) => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Ternary(t) => t.is_true(),
            Value::String(_) | Value::Integer(_) | Value::Float(_) | Value::Datetime(_) => {
                self.as_ternary().is_true()
            }
            Value::Null(_) => false,
        }
    }

    pub fn as_ternary(&self) -> Ternary {
        match self {
            Value::String(s) => string_ternary(s),
            Value::Integer(i) => Ternary::from(*i != 0),
            Value::Float(f) => Ternary::from(*f != 0.0),
            Value::Boolean(b) => Ternary::from(*b),
            Value::Datetime(dt) => Ternary::from(!datetime::is_zero(dt)),
            Value::Ternary(t) => *t,
            Value::Null(_) => Ternary::Unknown,
        }
    }

    /// Numeric view of the value. Strings qualify when their text is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_number(s),
            Value::Boolean(_) | Value::Datetime(_) | Value::Ternary(_) | Value::Null(_) => None,
        }
    }

    /// Integer view of the value. Floats qualify only when integral.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) => float_to_integer(*f),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| parse_number(s).and_then(float_to_integer)),
            Value::Boolean(_) | Value::Datetime(_) | Value::Ternary(_) | Value::Null(_) => None,
        }
    }
}

fn float_to_integer(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Boolean keywords first, then the ternary keywords; anything else is UNKNOWN.
fn string_ternary(s: &str) -> Ternary {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ternary::True,
        "0" | "f" | "false" => Ternary::False,
        other => Ternary::parse(other).unwrap_or(Ternary::Unknown),
    }
}

/// Parse text that spells a finite decimal number.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(i as f64);
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

impl PartialEq for Value {
    /// Structural equality; all NULLs are equal regardless of spelling.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Datetime(a), Value::Datetime(b)) => a == b,
            (Value::Ternary(a), Value::Ternary(b)) => a == b,
            (Value::Null(_), Value::Null(_)) => true,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Ternary> for Value {
    fn from(t: Ternary) -> Self {
        Value::Ternary(t)
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

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::Datetime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn render_each_variant() {
        assert_eq!(Value::string("abcde").render(), "'abcde'");
        assert_eq!(Value::Integer(1).render(), "1");
        assert_eq!(Value::Float(1.234).render(), "1.234");
        assert_eq!(Value::Boolean(true).render(), "true");
        assert_eq!(Value::Ternary(Ternary::True).render(), "TRUE");
        assert_eq!(Value::NULL.render(), "NULL");
        assert_eq!(Value::null_from_literal("null").render(), "null");

        let dt = Value::datetime_from_str("2012-01-01 12:34:56", utc()).unwrap();
        assert_eq!(dt.render(), "'2012-01-01 12:34:56'");
    }

    #[test]
    fn string_coercions() {
        assert!(Value::string("true").as_bool());
        assert!(!Value::string("false").as_bool());
        assert!(!Value::string("error").as_bool());
        assert!(!Value::string("").as_bool());
        assert_eq!(Value::string("1").as_ternary(), Ternary::True);
        assert_eq!(Value::string("0").as_ternary(), Ternary::False);
        assert_eq!(Value::string("-1").as_ternary(), Ternary::False);
        assert_eq!(Value::string("Unknown").as_ternary(), Ternary::Unknown);
        assert_eq!(Value::string("error").as_ternary(), Ternary::Unknown);
    }

    #[test]
    fn numeric_coercions() {
        assert!(Value::Integer(1).as_bool());
        assert!(!Value::Integer(0).as_bool());
        assert_eq!(Value::Integer(-3).as_ternary(), Ternary::True);
        assert_eq!(Value::Integer(0).as_ternary(), Ternary::False);
        assert!(Value::Float(1.0).as_bool());
        assert!(!Value::Float(0.0).as_bool());
        assert_eq!(Value::Float(0.5).as_ternary(), Ternary::True);
    }

    #[test]
    fn datetime_coercions() {
        let zero = Value::Datetime(datetime::zero());
        assert!(!zero.as_bool());
        assert_eq!(zero.as_ternary(), Ternary::False);

        let other = Value::datetime_from_str("2000-01-01 00:00:00", utc()).unwrap();
        assert!(other.as_bool());
        assert_eq!(other.as_ternary(), Ternary::True);
    }

    #[test]
    fn ternary_boolean_and_null_coercions() {
        assert!(Value::Ternary(Ternary::True).as_bool());
        assert!(!Value::Ternary(Ternary::Unknown).as_bool());
        assert_eq!(Value::Boolean(true).as_ternary(), Ternary::True);
        assert!(!Value::NULL.as_bool());
        assert_eq!(Value::NULL.as_ternary(), Ternary::Unknown);
    }

    #[test]
    fn nulls_are_equal_regardless_of_spelling() {
        assert_eq!(Value::NULL, Value::null_from_literal("null"));
        assert_ne!(Value::NULL, Value::Integer(0));
    }

    #[test]
    fn number_views() {
        assert_eq!(Value::string(" 12 ").as_f64(), Some(12.0));
        assert_eq!(Value::string("1e3").as_f64(), Some(1000.0));
        assert_eq!(Value::string("inf").as_f64(), None);
        assert_eq!(Value::string("abc").as_f64(), None);
        assert_eq!(Value::Float(3.0).as_integer(), Some(3));
        assert_eq!(Value::Float(3.5).as_integer(), None);
        assert_eq!(Value::string("4").as_integer(), Some(4));
        assert_eq!(Value::Boolean(true).as_f64(), None);
    }

    #[test]
    fn text_view_is_unquoted() {
        assert_eq!(Value::string("a").as_text().as_deref(), Some("a"));
        assert_eq!(Value::Integer(7).as_text().as_deref(), Some("7"));
        assert!(Value::NULL.as_text().is_none());
    }
}
