//! Analytic window functions over in-memory views.
//!
//! This crate ties the workspace together: it loads [`EngineConfig`] from
//! TOML and exposes [`Engine`], which appends one computed column to a
//! [`View`] per analytic function call.

pub mod config;
pub mod engine;
pub mod error;

pub use config::{EngineConfig, NullsPlacement};
pub use engine::Engine;
pub use error::{Error, Result};

pub use quarry_ast::{AnalyticClause, AnalyticFunction, BinaryOperator, Expr, OrderItem, UnaryOperator};
pub use quarry_executor::{AnalyticOptions, Evaluate, ExecutorError, RecordEvaluator};
pub use quarry_types::{NullsOrder, SortDirection, Ternary, Value};
pub use quarry_view::{Header, HeaderField, Record, View, ViewError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
