use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("field {0} does not exist")]
    FieldNotFound(String),

    #[error("field {0} is ambiguous")]
    AmbiguousField(String),

    #[error("record {record} has {found} values but the header has {expected} fields")]
    ColumnCountMismatch {
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("column has {found} values but the view has {expected} records")]
    LengthMismatch { expected: usize, found: usize },
}
