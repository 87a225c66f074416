use num_bigint::BigInt;
use thiserror::Error;

use crate::fraction::Fraction;

/// Everything that can go wrong between reading a share document and handing back a secret.
///
/// `NotInvertible` and `DivisionByZero` are raised by the arithmetic helpers; the interpolator
/// always re-raises them as `SingularPoints`, so callers of `interpolate_at_zero` never see them.
#[derive(Error, Debug)]
pub enum ReconError {
    #[error("invalid digit {digit:?} at position {position} for base {base}")]
    InvalidDigit {
        digit: char,
        position: usize,
        base: u32,
    },

    #[error("unsupported base {base} (expected 2..=36)")]
    UnsupportedBase { base: u32 },

    #[error("empty digit string")]
    EmptyDigits,

    #[error("malformed share {key:?}: {reason}")]
    MalformedShare { key: String, reason: String },

    #[error("share key {key:?} is not a decimal integer")]
    InvalidShareKey { key: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("not enough shares to reconstruct secret (need {need}, got {have})")]
    InsufficientShares { have: usize, need: usize },

    #[error("singular points: x = {x} coincides with another selected share (equal, or equal modulo p)")]
    SingularPoints { x: BigInt },

    #[error("{value} has no inverse modulo {modulus}")]
    NotInvertible { value: BigInt, modulus: BigInt },

    #[error("division by zero")]
    DivisionByZero,

    #[error("threshold k must be at least 1 (got {k})")]
    InvalidThreshold { k: usize },

    #[error("modulus must be greater than 1 (got {modulus})")]
    InvalidModulus { modulus: BigInt },

    #[error("inexact result: secret is the non-integer {secret}")]
    InexactResult { secret: Fraction },

    #[error("share {key:?}: {source}")]
    Share {
        key: String,
        #[source]
        source: Box<ReconError>,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReconError {
    /// Attaches the document key of the share that caused `self`.
    pub fn in_share(self, key: impl Into<String>) -> Self {
        ReconError::Share {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Strips any `Share` context and returns the underlying failure.
    pub fn root(&self) -> &ReconError {
        let mut e = self;
        while let ReconError::Share { source, .. } = e {
            e = source;
        }
        e
    }

    /// The name of the underlying failure, e.g. `"InvalidDigit"`.
    pub fn kind(&self) -> &'static str {
        match self.root() {
            ReconError::InvalidDigit { .. } => "InvalidDigit",
            ReconError::UnsupportedBase { .. } => "UnsupportedBase",
            ReconError::EmptyDigits => "EmptyDigits",
            ReconError::MalformedShare { .. } => "MalformedShare",
            ReconError::InvalidShareKey { .. } => "InvalidShareKey",
            ReconError::MalformedDocument(_) => "MalformedDocument",
            ReconError::InsufficientShares { .. } => "InsufficientShares",
            ReconError::SingularPoints { .. } => "SingularPoints",
            ReconError::NotInvertible { .. } => "NotInvertible",
            ReconError::DivisionByZero => "DivisionByZero",
            ReconError::InvalidThreshold { .. } => "InvalidThreshold",
            ReconError::InvalidModulus { .. } => "InvalidModulus",
            ReconError::InexactResult { .. } => "InexactResult",
            ReconError::Json(_) => "Json",
            ReconError::Io(_) => "Io",
            ReconError::Share { .. } => unreachable!("root() strips share context"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
