//! Analytic executor: evaluates window functions against in-memory views.
//!
//! This crate implements the expression evaluator that resolves field
//! references against a record, the aggregate computations shared with any
//! grouping stage, and the analytic function pipeline that appends one
//! computed column per call.

pub mod aggregate;
pub mod analytic;
pub mod error;
pub mod eval;
pub mod grouping;

pub use aggregate::AggregateFunction;
pub use analytic::{compute, compute_with, evaluate_column, AnalyticKind, AnalyticOptions};
pub use error::{Arity, ExecResult, ExecutorError};
pub use eval::{eval_expr, Evaluate, RecordEvaluator};
pub use grouping::Grouper;
