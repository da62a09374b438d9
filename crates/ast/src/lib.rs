//! Clause descriptors handed to the executor by the SQL front end.
//!
//! The front end owns the grammar; this crate only defines the already-parsed
//! shapes the engine consumes and renders them back to SQL text, which is how
//! computed columns are named.

pub mod ast;

pub use ast::{AnalyticClause, AnalyticFunction, BinaryOperator, Expr, OrderItem, UnaryOperator};
