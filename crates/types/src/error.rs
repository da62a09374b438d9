use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("parsing {0:?}: invalid syntax")]
    InvalidTernary(String),

    #[error("invalid time zone offset {0:?}")]
    InvalidOffset(String),
}
