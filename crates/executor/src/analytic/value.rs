//! Navigation functions: first_value, last_value, lag, lead.

use quarry_types::Value;

use super::partition::Partition;
use super::Window;
use crate::error::ExecResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Direction {
    Back,
    Forward,
}

pub(super) fn first_value(window: &Window<'_>, partition: &Partition) -> ExecResult<Vec<Value>> {
    let values = window.arg_values(0, partition)?;
    let picked = if window.function.ignore_nulls {
        values.iter().find(|v| !v.is_null())
    } else {
        values.first()
    };
    Ok(broadcast(picked, values.len()))
}

pub(super) fn last_value(window: &Window<'_>, partition: &Partition) -> ExecResult<Vec<Value>> {
    let values = window.arg_values(0, partition)?;
    let picked = if window.function.ignore_nulls {
        values.iter().rev().find(|v| !v.is_null())
    } else {
        values.last()
    };
    Ok(broadcast(picked, values.len()))
}

fn broadcast(value: Option<&Value>, len: usize) -> Vec<Value> {
    vec![value.cloned().unwrap_or(Value::NULL); len]
}

/// `lag`/`lead`: the value `offset` rows away in output order, or the
/// default argument evaluated against the current record when that row does
/// not exist. With IGNORE NULLS only non-null values count as steps.
pub(super) fn shift(
    window: &Window<'_>,
    partition: &Partition,
    offset: usize,
    direction: Direction,
) -> ExecResult<Vec<Value>> {
    let values = window.arg_values(0, partition)?;
    let present: Vec<usize> = if window.function.ignore_nulls {
        (0..values.len()).filter(|&i| !values[i].is_null()).collect()
    } else {
        Vec::new()
    };

    let mut out = Vec::with_capacity(values.len());
    for (pos, &row) in partition.rows.iter().enumerate() {
        let target = if offset == 0 {
            Some(pos)
        } else if window.function.ignore_nulls {
            match direction {
                Direction::Back => {
                    let before = present.partition_point(|&p| p < pos);
                    before.checked_sub(offset).map(|i| present[i])
                }
                Direction::Forward => {
                    let through = present.partition_point(|&p| p <= pos);
                    through
                        .checked_add(offset - 1)
                        .and_then(|i| present.get(i).copied())
                }
            }
        } else {
            match direction {
                Direction::Back => pos.checked_sub(offset),
                Direction::Forward => pos.checked_add(offset).filter(|&t| t < values.len()),
            }
        };

        let value = match target {
            Some(t) => values[t].clone(),
            None if window.function.args.len() > 2 => window.eval_arg(2, row)?,
            None => Value::NULL,
        };
        out.push(value);
    }
    Ok(out)
}
