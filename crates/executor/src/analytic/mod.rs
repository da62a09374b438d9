//! Analytic (window) function evaluation.
//!
//! Every function runs the same pipeline: arity check, partition key
//! evaluation, stable grouping, intra-partition ordering, constant argument
//! evaluation, one pass per partition, and a single column write-back. The result column is fully
//! built before the view is touched, so a failing call leaves the view as it
//! was.

mod aggregate;
mod partition;
mod ranking;
mod value;


use quarry_ast::{AnalyticFunction, Expr};
use quarry_types::{NullsOrder, Value};
use quarry_view::{HeaderField, View};
use tracing::{debug, trace};

use crate::aggregate::AggregateFunction;
use crate::error::{Arity, ExecResult, ExecutorError};
use crate::eval::{Evaluate, RecordEvaluator};

pub use partition::{Partition, Partitioned};

/// The analytic functions the engine knows, resolved from a call's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticKind {
    RowNumber,
    Rank,
    DenseRank,
    Ntile,
    FirstValue,
    LastValue,
    Lag,
    Lead,
    ListAgg,
    Aggregate(AggregateFunction),
}

impl AnalyticKind {
    /// Case-insensitive lookup of a function name.
    pub fn resolve(name: &str) -> ExecResult<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "row_number" => Self::RowNumber,
            "rank" => Self::Rank,
            "dense_rank" => Self::DenseRank,
            "ntile" => Self::Ntile,
            "first_value" => Self::FirstValue,
            "last_value" => Self::LastValue,
            "lag" => Self::Lag,
            "lead" => Self::Lead,
            "listagg" => Self::ListAgg,
            other => match AggregateFunction::from_name(other) {
                Some(agg) => Self::Aggregate(agg),
                None => return Err(ExecutorError::UnknownFunction(name.to_string())),
            },
        };
        Ok(kind)
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::RowNumber | Self::Rank | Self::DenseRank => Arity::None,
            Self::Ntile | Self::FirstValue | Self::LastValue | Self::Aggregate(_) => Arity::Exactly(1),
            Self::ListAgg => Arity::Range(1, 2),
            Self::Lag | Self::Lead => Arity::Range(1, 3),
        }
    }
}

/// Engine-wide settings applied to every analytic call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticOptions {
    /// NULL placement for ORDER BY items that do not name one.
    pub nulls: NullsOrder,
}

/// Compute `function` over `view` with the default evaluator and options and
/// append the result as a new column.
pub fn compute(view: &mut View, function: &AnalyticFunction) -> ExecResult<()> {
    compute_with(view, function, &RecordEvaluator::default(), &AnalyticOptions::default())
}

/// Like [`compute`], with a caller-supplied evaluator and options.
///
/// The new column is named after the invocation text of `function`. On
/// error the view is unchanged.
pub fn compute_with(
    view: &mut View,
    function: &AnalyticFunction,
    evaluator: &dyn Evaluate,
    options: &AnalyticOptions,
) -> ExecResult<()> {
    let column = evaluate_column(view, function, evaluator, options)?;
    let name = function.to_string();
    view.append_column(HeaderField::computed(name.as_str()), column)?;
    debug!(function = %name, records = view.len(), "analytic column appended");
    Ok(())
}

/// Compute the values of `function` for every record of `view`, in record
/// order, without modifying the view.
pub fn evaluate_column(
    view: &View,
    function: &AnalyticFunction,
    evaluator: &dyn Evaluate,
    options: &AnalyticOptions,
) -> ExecResult<Vec<Value>> {
    let kind = AnalyticKind::resolve(&function.name)?;
    let expected = kind.arity();
    if !expected.accepts(function.args.len()) {
        return Err(ExecutorError::Arity {
            function: function.name.clone(),
            expected,
        });
    }

    debug!(function = %function, records = view.len(), "computing analytic function");

    let partitioned = Partitioned::build(view, &function.clause, evaluator, options.nulls)?;
    let plan = Plan::prepare(kind, function, evaluator)?;
    let window = Window {
        view,
        function,
        evaluator,
        partitioned: &partitioned,
    };

    let mut column = vec![Value::NULL; view.len()];
    for partition in &partitioned.partitions {
        trace!(key = ?partition.key, rows = partition.len(), "evaluating partition");
        let values = window.apply(&plan, partition)?;
        for (&row, value) in partition.rows.iter().zip(values) {
            column[row] = value;
        }
    }

    debug!(
        function = %function,
        partitions = partitioned.partitions.len(),
        "analytic function computed"
    );
    Ok(column)
}

/// A resolved call with its constant arguments already evaluated.
#[derive(Debug, Clone, PartialEq)]
enum Plan {
    RowNumber,
    Rank,
    DenseRank,
    Ntile(usize),
    FirstValue,
    LastValue,
    Lag(usize),
    Lead(usize),
    ListAgg { separator: String },
    CountRows,
    Aggregate(AggregateFunction),
}

impl Plan {
    fn prepare(kind: AnalyticKind, function: &AnalyticFunction, evaluator: &dyn Evaluate) -> ExecResult<Self> {
        let plan = match kind {
            AnalyticKind::RowNumber => Plan::RowNumber,
            AnalyticKind::Rank => Plan::Rank,
            AnalyticKind::DenseRank => Plan::DenseRank,
            AnalyticKind::FirstValue => Plan::FirstValue,
            AnalyticKind::LastValue => Plan::LastValue,
            AnalyticKind::Ntile => {
                let n = evaluator.evaluate(&function.args[0], None)?;
                match n.as_integer().filter(|n| *n > 0).and_then(|n| usize::try_from(n).ok()) {
                    Some(n) => Plan::Ntile(n),
                    None => {
                        return Err(ExecutorError::type_coercion(
                            &function.name,
                            format!("the first argument must be a positive integer, got {n}"),
                        ))
                    }
                }
            }
            AnalyticKind::Lag | AnalyticKind::Lead => {
                let offset = match function.args.get(1) {
                    None => 1,
                    Some(expr) => {
                        let value = evaluator.evaluate(expr, None)?;
                        match value.as_integer().and_then(|n| usize::try_from(n).ok()) {
                            Some(n) => n,
                            None => {
                                return Err(ExecutorError::type_coercion(
                                    &function.name,
                                    format!("the second argument must be a non-negative integer, got {value}"),
                                ))
                            }
                        }
                    }
                };
                if kind == AnalyticKind::Lag {
                    Plan::Lag(offset)
                } else {
                    Plan::Lead(offset)
                }
            }
            AnalyticKind::ListAgg => {
                let separator = match function.args.get(1) {
                    None => String::new(),
                    Some(expr) => match evaluator.evaluate(expr, None)? {
                        Value::String(s) => s,
                        Value::Integer(i) => i.to_string(),
                        Value::Float(f) => f.to_string(),
                        other => {
                            return Err(ExecutorError::type_coercion(
                                &function.name,
                                format!("the separator cannot be used as text, got {other}"),
                            ))
                        }
                    },
                };
                Plan::ListAgg { separator }
            }
            AnalyticKind::Aggregate(AggregateFunction::Count) if matches!(function.args[0], Expr::AllColumns) => {
                Plan::CountRows
            }
            AnalyticKind::Aggregate(agg) => Plan::Aggregate(agg),
        };
        Ok(plan)
    }
}

/// Everything a per-partition computation reads.
struct Window<'a> {
    view: &'a View,
    function: &'a AnalyticFunction,
    evaluator: &'a dyn Evaluate,
    partitioned: &'a Partitioned,
}

impl Window<'_> {
    /// Values for `partition`, aligned with `partition.rows`.
    fn apply(&self, plan: &Plan, partition: &Partition) -> ExecResult<Vec<Value>> {
        match plan {
            Plan::RowNumber => Ok(ranking::row_number(partition)),
            Plan::Rank => Ok(ranking::rank(self.partitioned, partition)),
            Plan::DenseRank => Ok(ranking::dense_rank(self.partitioned, partition)),
            Plan::Ntile(n) => Ok(ranking::ntile(partition, *n)),
            Plan::FirstValue => value::first_value(self, partition),
            Plan::LastValue => value::last_value(self, partition),
            Plan::Lag(offset) => value::shift(self, partition, *offset, value::Direction::Back),
            Plan::Lead(offset) => value::shift(self, partition, *offset, value::Direction::Forward),
            Plan::ListAgg { separator } => aggregate::listagg(self, partition, separator),
            Plan::CountRows => Ok(aggregate::count_rows(self, partition)),
            Plan::Aggregate(agg) => aggregate::aggregate(self, partition, *agg),
        }
    }

    /// Evaluate argument `arg` against the record at view index `row`.
    fn eval_arg(&self, arg: usize, row: usize) -> ExecResult<Value> {
        let record = &self.view.records()[row];
        self.evaluator
            .evaluate(&self.function.args[arg], Some((self.view.header(), record)))
    }

    /// Evaluate argument `arg` for each row of `partition` in output order.
    fn arg_values(&self, arg: usize, partition: &Partition) -> ExecResult<Vec<Value>> {
        partition.rows.iter().map(|&row| self.eval_arg(arg, row)).collect()
    }
}
