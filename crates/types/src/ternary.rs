//! Three-valued logic: TRUE, FALSE and UNKNOWN.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TypesError;

/// A SQL truth value.
///
/// Variants are declared `False < Unknown < True`; the ordering exists so the
/// type can be sorted and carries no arithmetic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ternary {
    False,
    Unknown,
    True,
}

impl Ternary {
    pub fn not(self) -> Ternary {
        match self {
            Ternary::False => Ternary::True,
            Ternary::True => Ternary::False,
            Ternary::Unknown => Ternary::Unknown,
        }
    }

    /// FALSE dominates, then UNKNOWN.
    pub fn and(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::False, _) | (_, Ternary::False) => Ternary::False,
            (Ternary::Unknown, _) | (_, Ternary::Unknown) => Ternary::Unknown,
            _ => Ternary::True,
        }
    }

    /// TRUE dominates, then UNKNOWN.
    pub fn or(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::True, _) | (_, Ternary::True) => Ternary::True,
            (Ternary::Unknown, _) | (_, Ternary::Unknown) => Ternary::Unknown,
            _ => Ternary::False,
        }
    }

    /// Identity comparison of two truth values. UNKNOWN equals UNKNOWN here.
    pub fn equal(self, other: Ternary) -> Ternary {
        Ternary::from(self == other)
    }

    pub fn is_true(self) -> bool {
        self == Ternary::True
    }

    /// Case-insensitive parse of `TRUE`/`1`, `FALSE`/`-1`, `UNKNOWN`/`0`.
    pub fn parse(s: &str) -> Result<Ternary, TypesError> {
        match s.to_ascii_uppercase().as_str() {
            "TRUE" | "1" => Ok(Ternary::True),
            "FALSE" | "-1" => Ok(Ternary::False),
            "UNKNOWN" | "0" => Ok(Ternary::Unknown),
            _ => Err(TypesError::InvalidTernary(s.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ternary::False => "FALSE",
            Ternary::Unknown => "UNKNOWN",
            Ternary::True => "TRUE",
        }
    }
}

impl From<bool> for Ternary {
    fn from(b: bool) -> Self {
        if b {
            Ternary::True
        } else {
            Ternary::False
        }
    }
}

impl std::ops::Not for Ternary {
    type Output = Ternary;

    fn not(self) -> Ternary {
        Ternary::not(self)
    }
}

impl FromStr for Ternary {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ternary::parse(s)
    }
}

impl Display for Ternary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
