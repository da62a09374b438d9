//! Partition grouping and intra-partition ordering.

use std::cmp::Ordering;

use quarry_ast::{AnalyticClause, OrderItem};
use quarry_types::compare::{compare_values, keys_equal};
use quarry_types::{NullsOrder, Value};
use quarry_view::View;

use crate::error::ExecResult;
use crate::eval::Evaluate;
use crate::grouping::Grouper;

/// Records sharing one partition key, as indices into the view in output
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub key: Vec<Value>,
    pub rows: Vec<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A view split into ordered partitions, with each record's evaluated
/// ORDER BY key kept for peer detection.
#[derive(Debug)]
pub struct Partitioned {
    pub partitions: Vec<Partition>,
    order_keys: Vec<Vec<Value>>,
}

impl Partitioned {
    /// Evaluate partition keys for every record, then order keys, then group
    /// and sort. Any evaluation error aborts before a partition is formed.
    pub fn build(
        view: &View,
        clause: &AnalyticClause,
        evaluator: &dyn Evaluate,
        default_nulls: NullsOrder,
    ) -> ExecResult<Self> {
        let header = view.header();

        let mut partition_keys = Vec::with_capacity(view.len());
        for record in view.records() {
            let key = clause
                .partition_by
                .iter()
                .map(|expr| evaluator.evaluate(expr, Some((header, record))))
                .collect::<ExecResult<Vec<_>>>()?;
            partition_keys.push(key);
        }

        let mut order_keys = Vec::with_capacity(view.len());
        for record in view.records() {
            let key = clause
                .order_by
                .iter()
                .map(|item| evaluator.evaluate(&item.expr, Some((header, record))))
                .collect::<ExecResult<Vec<_>>>()?;
            order_keys.push(key);
        }

        let mut grouper = Grouper::new();
        for (idx, key) in partition_keys.into_iter().enumerate() {
            grouper.insert(key, idx);
        }

        let partitions = grouper
            .into_groups()
            .map(|(key, mut rows)| {
                if !clause.order_by.is_empty() {
                    stable_sort_by(&mut rows, &mut |a: &usize, b: &usize| {
                        compare_order_keys(&order_keys[*a], &order_keys[*b], &clause.order_by, default_nulls)
                    });
                }
                Partition { key, rows }
            })
            .collect();

        Ok(Self {
            partitions,
            order_keys,
        })
    }

    pub fn order_key(&self, row: usize) -> &[Value] {
        &self.order_keys[row]
    }

    /// Two rows are peers when their whole ORDER BY tuples are equal.
    pub fn peers(&self, a: usize, b: usize) -> bool {
        keys_equal(self.order_key(a), self.order_key(b))
    }
}

fn compare_order_keys(a: &[Value], b: &[Value], items: &[OrderItem], default_nulls: NullsOrder) -> Ordering {
    for ((x, y), item) in a.iter().zip(b).zip(items) {
        let ord = compare_values(x, y, item.direction, item.nulls.unwrap_or(default_nulls));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Stable merge sort.
///
/// Mixed-kind comparisons are not guaranteed to be a total order, which the
/// standard library sorts may reject by panicking.
fn stable_sort_by<F>(rows: &mut Vec<usize>, compare: &mut F)
where
    F: FnMut(&usize, &usize) -> Ordering,
{
    if rows.len() <= 1 {
        return;
    }

    let mut right = rows.split_off(rows.len() / 2);
    let mut left = std::mem::take(rows);
    stable_sort_by(&mut left, compare);
    stable_sort_by(&mut right, compare);

    rows.reserve(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // Take from the right only when strictly smaller.
        if compare(&right[j], &left[i]) == Ordering::Less {
            rows.push(right[j]);
            j += 1;
        } else {
            rows.push(left[i]);
            i += 1;
        }
    }
    rows.extend_from_slice(&left[i..]);
    rows.extend_from_slice(&right[j..]);
}
