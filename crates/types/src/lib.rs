//! Scalar values and the orderings defined over them.
//!
//! This crate provides:
//! - `Ternary`: three-valued logic used by every predicate
//! - `Value`: the closed set of scalar variants a record can hold
//! - `compare`: the total ordering used for sorting and partition grouping
//! - datetime text parsing shared by literals and coercions

pub mod compare;
pub mod datetime;
pub mod error;
pub mod ternary;
pub mod value;

pub use compare::{compare_values, values_equal, NullsOrder, SortDirection};
pub use error::TypesError;
pub use ternary::Ternary;
pub use value::Value;
