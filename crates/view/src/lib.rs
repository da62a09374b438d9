//! In-memory tabular data: header, records and the view that binds them.
//!
//! This crate provides:
//! - Column metadata with table-qualified, case-insensitive lookup (header)
//! - Records of scalar values with an optional row-group identity
//! - Views whose records always match the header's width

pub mod error;
pub mod header;
pub mod record;
pub mod view;

pub use error::ViewError;
pub use header::{Header, HeaderField};
pub use record::Record;
pub use view::View;
