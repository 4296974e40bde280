//! The analysis verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Effective arity of a callable: a proven finite bound, or the conservative
/// unbounded sentinel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    Finite(u32),
    Unbounded,
}

impl Arity {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Arity::Unbounded)
    }

    pub fn as_finite(self) -> Option<u32> {
        match self {
            Arity::Finite(n) => Some(n),
            Arity::Unbounded => None,
        }
    }
}

/// The conventional numeric representation: unbounded maps to positive
/// infinity.
impl From<Arity> for f64 {
    fn from(arity: Arity) -> f64 {
        match arity {
            Arity::Finite(n) => f64::from(n),
            Arity::Unbounded => f64::INFINITY,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Finite(n) => write!(f, "{n}"),
            Arity::Unbounded => write!(f, "unbounded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_conversion() {
        assert_eq!(f64::from(Arity::Finite(3)), 3.0);
        assert!(f64::from(Arity::Unbounded).is_infinite());
    }

    #[test]
    fn accessors() {
        assert_eq!(Arity::Finite(2).as_finite(), Some(2));
        assert_eq!(Arity::Unbounded.as_finite(), None);
        assert!(Arity::Unbounded.is_unbounded());
        assert!(!Arity::Finite(0).is_unbounded());
    }
}
