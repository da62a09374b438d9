//! Aggregate-as-window functions and `listagg`. Each computes one value per
//! partition and broadcasts it to every row.

use quarry_types::Value;

use super::partition::Partition;
use super::Window;
use crate::aggregate::AggregateFunction;
use crate::error::ExecResult;
use crate::grouping::{distinct_values, Grouper};

pub(super) fn aggregate(
    window: &Window<'_>,
    partition: &Partition,
    function: AggregateFunction,
) -> ExecResult<Vec<Value>> {
    let values = window.arg_values(0, partition)?;
    let result = function.compute(&values, window.function.distinct);
    Ok(vec![result; partition.len()])
}

/// `count(*)`: every record counts, NULL columns included. With DISTINCT,
/// records with equal values in every column count once.
pub(super) fn count_rows(window: &Window<'_>, partition: &Partition) -> Vec<Value> {
    let count = if window.function.distinct {
        let mut grouper = Grouper::new();
        for &row in &partition.rows {
            grouper.insert(window.view.records()[row].values().to_vec(), row);
        }
        grouper.len()
    } else {
        partition.len()
    };
    vec![Value::Integer(count as i64); partition.len()]
}

/// Concatenate the argument's text in output order. NULLs contribute
/// nothing; a partition with no text yields NULL.
pub(super) fn listagg(window: &Window<'_>, partition: &Partition, separator: &str) -> ExecResult<Vec<Value>> {
    let mut values = window.arg_values(0, partition)?;
    if window.function.distinct {
        values = distinct_values(&values);
    }

    let parts: Vec<_> = values.iter().filter_map(Value::as_text).collect();
    let result = if parts.is_empty() {
        Value::NULL
    } else {
        Value::String(parts.join(separator))
    };
    Ok(vec![result; partition.len()])
}
