//! Ordering and equality between scalar values.
//!
//! The same comparison drives ORDER BY sorting and partition-key grouping.
//! Values of different kinds compare numerically when both spell numbers and
//! by their unquoted text otherwise, so the relation is not guaranteed to be
//! transitive across mixed kinds.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::datetime::DISPLAY_FORMAT;
use crate::value::{parse_number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Where NULLs are placed in an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullsOrder {
    /// NULL is the lowest value: first when ascending, last when descending.
    #[default]
    Low,
    First,
    Last,
}

impl NullsOrder {
    fn nulls_first(self, direction: SortDirection) -> bool {
        match self {
            NullsOrder::First => true,
            NullsOrder::Last => false,
            NullsOrder::Low => direction == SortDirection::Asc,
        }
    }
}

/// Compare two values for sorting.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection, nulls: NullsOrder) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if nulls.nulls_first(direction) {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if nulls.nulls_first(direction) {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, false) => {
            let ord = compare_non_null(a, b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Equality used for grouping: direction is irrelevant and NULL equals NULL.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    compare_values(a, b, SortDirection::Asc, NullsOrder::Low) == Ordering::Equal
}

/// Componentwise equality of two key tuples.
pub fn keys_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
}

/// Ascending comparison of two values that are not NULL. A NULL operand is
/// treated as lower than anything else.
pub fn compare_non_null(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Integer(x), Value::Float(y)) => compare_f64(*x as f64, *y),
        (Value::Float(x), Value::Integer(y)) => compare_f64(*x, *y as f64),
        (Value::Float(x), Value::Float(y)) => compare_f64(*x, *y),
        (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Value::Datetime(x), Value::Datetime(y)) => x.cmp(y),
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Ternary(x), Value::Ternary(y)) => x.cmp(y),
        _ => compare_mixed(a, b),
    }
}

fn compare_mixed(a: &Value, b: &Value) -> Ordering {
    let (ta, tb) = match (a.as_text(), b.as_text()) {
        (Some(ta), Some(tb)) => (ta, tb),
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
    };
    match (parse_number(&ta), parse_number(&tb)) {
        (Some(x), Some(y)) => compare_f64(x, y),
        _ => ta.as_bytes().cmp(tb.as_bytes()),
    }
}

/// NaN sorts above every number and equals itself.
fn compare_f64(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y)
        .unwrap_or_else(|| x.is_nan().cmp(&y.is_nan()))
}

/// Hashable digest of a value.
///
/// `values_equal(a, b)` implies `fingerprint(a) == fingerprint(b)`; equal
/// fingerprints do not imply equal values. Datetimes equal each other by
/// instant but equal strings by local text, so every datetime and every
/// string spelling one share the `Temporal` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    Null,
    Number(u64),
    Temporal,
    Text(String),
}

pub fn fingerprint(value: &Value) -> Fingerprint {
    match value {
        Value::Null(_) => Fingerprint::Null,
        Value::Datetime(_) => Fingerprint::Temporal,
        Value::Integer(i) => Fingerprint::Number(number_bits(*i as f64)),
        Value::Float(f) if f.is_finite() => Fingerprint::Number(number_bits(*f)),
        other => match other.as_text() {
            Some(text) => match parse_number(&text) {
                Some(n) => Fingerprint::Number(number_bits(n)),
                None if NaiveDateTime::parse_from_str(&text, DISPLAY_FORMAT).is_ok() => Fingerprint::Temporal,
                None => Fingerprint::Text(text.into_owned()),
            },
            None => Fingerprint::Null,
        },
    }
}

fn number_bits(f: f64) -> u64 {
    // -0.0 == 0.0
    if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}
