use std::fmt::{Display, Formatter};

use quarry_view::ViewError;
use thiserror::Error;

/// Accepted argument counts of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Exactly(usize),
    Range(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::None => count == 0,
            Arity::Exactly(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Arity::None => f.write_str("no argument"),
            Arity::Exactly(1) => f.write_str("1 argument"),
            Arity::Exactly(n) => write!(f, "{n} arguments"),
            Arity::Range(min, max) if max == min + 1 => write!(f, "{min} or {max} arguments"),
            Arity::Range(min, max) => write!(f, "{min} to {max} arguments"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutorError {
    #[error("function {function} takes {expected}")]
    Arity { function: String, expected: Arity },

    #[error("field {0} does not exist")]
    FieldNotFound(String),

    #[error("field {0} is ambiguous")]
    AmbiguousField(String),

    #[error("function {function}: {message}")]
    TypeCoercion { function: String, message: String },

    #[error("function {0} does not exist")]
    UnknownFunction(String),

    #[error("{0}")]
    Evaluation(String),

    #[error(transparent)]
    View(ViewError),
}

impl ExecutorError {
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }

    pub fn type_coercion(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeCoercion {
            function: function.into(),
            message: message.into(),
        }
    }
}

impl From<ViewError> for ExecutorError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::FieldNotFound(name) => ExecutorError::FieldNotFound(name),
            ViewError::AmbiguousField(name) => ExecutorError::AmbiguousField(name),
            other => ExecutorError::View(other),
        }
    }
}

pub type ExecResult<T> = Result<T, ExecutorError>;
