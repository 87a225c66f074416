use log::{debug, warn};
use num_bigint::BigInt;

use crate::config::{RecoveryConfig, SelectionOrder};
use crate::error::{ReconError, Result};
use crate::lagrange::{interpolate_at_zero, ArithmeticMode};
use crate::radix::decode;
use crate::secret::Secret;

/// A decoded point $(x, f(x))$ on the sharing polynomial $f$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub x: BigInt,
    pub y: BigInt,
}

impl Share {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Share { x, y }
    }
}

/// A share as written in the document, before its value is decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawShare {
    /// The document key, kept verbatim for error messages.
    pub key: String,
    pub x: BigInt,
    pub value: String,
    pub base: u32,
}

impl RawShare {
    pub fn new(key: impl Into<String>, x: BigInt, value: impl Into<String>, base: u32) -> Self {
        RawShare {
            key: key.into(),
            x,
            value: value.into(),
            base,
        }
    }

    /// Decodes the value, tagging any failure with this share's key.
    pub fn decode(&self) -> Result<Share> {
        let y = decode(&self.value, self.base).map_err(|e| e.in_share(&self.key))?;

        Ok(Share::new(self.x.clone(), y))
    }
}

/// Everything needed to reconstruct one secret: a $k$-out-of-$n$ threshold, an optional prime
/// modulus, and the raw shares in document order.
#[derive(Clone, Debug)]
pub struct ShareSet {
    /// The reconstruction threshold $k$; exactly $k$ shares are interpolated.
    threshold: usize,
    /// The declared total number of shares $n$. Informational only.
    total_declared: usize,
    modulus: Option<BigInt>,
    shares: Vec<RawShare>,
}

impl ShareSet {
    pub fn new(threshold: usize, total_declared: usize, modulus: Option<BigInt>, shares: Vec<RawShare>) -> Result<Self> {
        if threshold == 0 {
            return Err(ReconError::InvalidThreshold { k: threshold });
        }

        // validates the modulus
        ArithmeticMode::from_modulus(modulus.clone())?;

        if total_declared < threshold {
            warn!("declared total n = {total_declared} is below the threshold k = {threshold}");
        }
        if shares.len() > total_declared {
            warn!("{} shares supplied but only n = {total_declared} declared", shares.len());
        }

        Ok(ShareSet {
            threshold,
            total_declared,
            modulus,
            shares,
        })
    }

    /// Returns the threshold $k$. Recall that exactly $k$ shares are used to reconstruct.
    pub fn get_threshold(&self) -> usize { self.threshold }

    pub fn get_total_declared(&self) -> usize { self.total_declared }

    pub fn get_modulus(&self) -> Option<&BigInt> { self.modulus.as_ref() }

    pub fn get_shares(&self) -> &[RawShare] { &self.shares }

    pub fn mode(&self) -> ArithmeticMode {
        match &self.modulus {
            Some(p) => ArithmeticMode::Modular(p.clone()),
            None => ArithmeticMode::Rational,
        }
    }

    /// Decodes every share in document order, stopping at the first bad one.
    pub fn decode_points(&self) -> Result<Vec<Share>> {
        self.shares.iter().map(RawShare::decode).collect()
    }

    /// Decodes all shares and returns the $k$ that take part in reconstruction.
    ///
    /// Decoding is eager: a bad share fails the whole call even if it would not have been selected.
    pub fn select(&self, order: SelectionOrder) -> Result<Vec<Share>> {
        let mut points = self.decode_points()?;

        if points.len() < self.threshold {
            return Err(ReconError::InsufficientShares {
                have: points.len(),
                need: self.threshold,
            });
        }

        match order {
            // stable, so equal x's keep their document order
            SelectionOrder::AscendingX => points.sort_by(|a, b| a.x.cmp(&b.x)),
            SelectionOrder::Declaration => {}
        }

        points.truncate(self.threshold);

        debug!(
            "selected x = [{}] ({order:?})",
            points.iter().map(|s| s.x.to_string()).collect::<Vec<_>>().join(", ")
        );

        Ok(points)
    }

    /// Selects $k$ shares per `config` and interpolates them at zero.
    pub fn reconstruct(&self, config: &RecoveryConfig) -> Result<Secret> {
        let points = self.select(config.selection)?;
        let secret = interpolate_at_zero(&points, self.threshold, &self.mode())?;

        match secret {
            Secret::Inexact(q) if config.deny_inexact => Err(ReconError::InexactResult { secret: q }),
            s => Ok(s),
        }
    }
}
