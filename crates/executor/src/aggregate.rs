//! Aggregate functions over a list of values.
//!
//! Shared by aggregate-as-window evaluation and any grouping stage.

use std::cmp::Ordering;

use quarry_types::compare::compare_non_null;
use quarry_types::Value;

use crate::grouping::distinct_values;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Median,
}

impl AggregateFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "count" => Some(Self::Count),
            "sum" => Some(Self::Sum),
            "avg" => Some(Self::Avg),
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "median" => Some(Self::Median),
            _ => None,
        }
    }

    /// Aggregate `values`, skipping NULLs. Empty input yields NULL, or 0 for
    /// `count`.
    pub fn compute(self, values: &[Value], distinct: bool) -> Value {
        let owned;
        let values = if distinct {
            owned = distinct_values(values);
            owned.as_slice()
        } else {
            values
        };
        let present = values.iter().filter(|v| !v.is_null());

        match self {
            Self::Count => Value::Integer(present.count() as i64),
            Self::Sum => sum(present),
            Self::Avg => {
                let numbers: Vec<f64> = present.filter_map(Value::as_f64).collect();
                if numbers.is_empty() {
                    return Value::NULL;
                }
                Value::Float(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
            Self::Min => extreme(present, Ordering::Less),
            Self::Max => extreme(present, Ordering::Greater),
            Self::Median => median(present.filter_map(Value::as_f64).collect()),
        }
    }
}

/// Integral while every input is an integer and the total fits.
fn sum<'a>(values: impl Iterator<Item = &'a Value>) -> Value {
    let mut int_total: Option<i64> = Some(0);
    let mut float_total = 0.0;
    let mut seen = false;

    for value in values {
        let Some(f) = value.as_f64() else {
            continue;
        };
        seen = true;
        float_total += f;
        int_total = match (int_total, value) {
            (Some(acc), Value::Integer(i)) => acc.checked_add(*i),
            _ => None,
        };
    }

    match (seen, int_total) {
        (false, _) => Value::NULL,
        (true, Some(total)) => Value::Integer(total),
        (true, None) => Value::Float(float_total),
    }
}

/// First value that no later value beats in direction `want`.
fn extreme<'a>(values: impl Iterator<Item = &'a Value>, want: Ordering) -> Value {
    values
        .fold(None::<&Value>, |best, v| match best {
            Some(b) if compare_non_null(v, b) != want => Some(b),
            _ => Some(v),
        })
        .cloned()
        .unwrap_or(Value::NULL)
}

fn median(mut numbers: Vec<f64>) -> Value {
    if numbers.is_empty() {
        return Value::NULL;
    }
    numbers.sort_by(|a, b| a.total_cmp(b));
    let mid = numbers.len() / 2;
    if numbers.len() % 2 == 1 {
        Value::Float(numbers[mid])
    } else {
        Value::Float((numbers[mid - 1] + numbers[mid]) / 2.0)
    }
}
