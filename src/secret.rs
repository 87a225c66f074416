use std::fmt;

use num_bigint::BigInt;

use crate::fraction::Fraction;

/// The reconstructed value $f(0)$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Secret {
    /// The normal outcome; always the case in modular mode.
    Integer(BigInt),
    /// Exact-rational mode only: $f(0)$ is not an integer, so the shares are inconsistent with an
    /// integer secret (or were meant to be combined modulo some prime).
    Inexact(Fraction),
}

/// A non-fatal condition that accompanies a valid `Secret`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    InexactResult,
}

impl Secret {
    pub fn warning(&self) -> Option<Warning> {
        match self {
            Secret::Integer(_) => None,
            Secret::Inexact(_) => Some(Warning::InexactResult),
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Secret::Integer(n) => Some(n),
            Secret::Inexact(_) => None,
        }
    }
}

impl fmt::Display for Secret {
    /// The canonical form: a bare integer, or `num/den` when inexact.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Integer(n) => write!(f, "{n}"),
            Secret::Inexact(q) => write!(f, "{q}"),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InexactResult => write!(f, "InexactResult"),
        }
    }
}
