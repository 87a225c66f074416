use log::{debug, warn};
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{ReconError, Result};
use crate::fraction::Fraction;
use crate::modular::{mod_inverse, reduce_mod};
use crate::secret::Secret;
use crate::share::Share;

/// Which number system the interpolation runs in. Chosen by the caller (normally from whether the
/// share document carries a modulus), never inferred from the points themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArithmeticMode {
    /// Exact fractions over $\mathbb{Q}$; no reduction anywhere.
    Rational,
    /// The prime field $\mathbb{Z}/p\mathbb{Z}$.
    Modular(BigInt),
}

impl ArithmeticMode {
    /// Returns `Modular(p)`, or `InvalidModulus` if $p \le 1$.
    pub fn modular(p: BigInt) -> Result<Self> {
        if p <= BigInt::one() {
            return Err(ReconError::InvalidModulus { modulus: p });
        }

        Ok(ArithmeticMode::Modular(p))
    }

    /// `Modular(p)` if a modulus is present, `Rational` otherwise.
    pub fn from_modulus(p: Option<BigInt>) -> Result<Self> {
        match p {
            Some(p) => Self::modular(p),
            None => Ok(ArithmeticMode::Rational),
        }
    }

    pub fn modulus(&self) -> Option<&BigInt> {
        match self {
            ArithmeticMode::Rational => None,
            ArithmeticMode::Modular(p) => Some(p),
        }
    }
}

/// The handful of field operations the Lagrange formula needs.
///
/// `div` is the only fallible one: it fails when the divisor is zero (or has no inverse) in this
/// arithmetic. Implementations must return a fresh value from every call.
pub trait Arithmetic {
    type Elem: Clone;

    fn zero(&self) -> Self::Elem;

    fn one(&self) -> Self::Elem;

    /// Maps an integer into this arithmetic.
    fn lift(&self, v: &BigInt) -> Self::Elem;

    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    fn is_zero(&self, a: &Self::Elem) -> bool;

    fn div(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;
}

/// Arithmetic in $\mathbb{Z}/p\mathbb{Z}$: every value is kept in $[0, p)$.
#[derive(Clone, Debug)]
pub struct PrimeField {
    modulus: BigInt,
}

impl PrimeField {
    /// NOTE: `modulus` is trusted to be prime; only $p > 1$ is checked.
    pub fn new(modulus: BigInt) -> Result<Self> {
        if modulus <= BigInt::one() {
            return Err(ReconError::InvalidModulus { modulus });
        }

        Ok(PrimeField { modulus })
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }
}

impl Arithmetic for PrimeField {
    type Elem = BigInt;

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn lift(&self, v: &BigInt) -> BigInt {
        reduce_mod(v, &self.modulus)
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        reduce_mod(&(a + b), &self.modulus)
    }

    fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        reduce_mod(&(a - b), &self.modulus)
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        reduce_mod(&(a * b), &self.modulus)
    }

    fn is_zero(&self, a: &BigInt) -> bool {
        reduce_mod(a, &self.modulus).is_zero()
    }

    fn div(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        let b_inv = mod_inverse(b, &self.modulus)?;
        Ok(self.mul(a, &b_inv))
    }
}

/// Exact arithmetic over $\mathbb{Q}$, via `Fraction`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rationals;

impl Arithmetic for Rationals {
    type Elem = Fraction;

    fn zero(&self) -> Fraction {
        Fraction::zero()
    }

    fn one(&self) -> Fraction {
        Fraction::one()
    }

    fn lift(&self, v: &BigInt) -> Fraction {
        Fraction::from_integer(v.clone())
    }

    fn add(&self, a: &Fraction, b: &Fraction) -> Fraction {
        a + b
    }

    fn sub(&self, a: &Fraction, b: &Fraction) -> Fraction {
        a - b
    }

    fn mul(&self, a: &Fraction, b: &Fraction) -> Fraction {
        a * b
    }

    fn is_zero(&self, a: &Fraction) -> bool {
        a.is_zero()
    }

    fn div(&self, a: &Fraction, b: &Fraction) -> Result<Fraction> {
        a.checked_div(b)
    }
}

/// Returns the $|T|$ Lagrange coefficients at zero for the interpolating set $T = \{x_0, \ldots, x_{t-1}\}$:
/// $\ell_i(0) = \prod_{j \ne i} \frac{0 - x_j}{x_i - x_j}$.
///
/// Fails with `SingularPoints` if two of the $x_i$'s coincide in `arith` (i.e., modulo $p$ for a
/// `PrimeField`), since $\ell_i$ is then undefined. Takes $O(|T|^2)$ multiplications.
pub fn lagrange_coefficients_at_zero<A: Arithmetic>(arith: &A, xs: &[BigInt]) -> Result<Vec<A::Elem>> {
    let lifted = xs.iter().map(|x| arith.lift(x)).collect::<Vec<_>>();
    let zero = arith.zero();

    let mut coeffs = Vec::with_capacity(xs.len());

    for (i, x_i) in lifted.iter().enumerate() {
        let mut numerator = arith.one();   // \prod_{j \ne i} (0 - x_j)
        let mut denominator = arith.one(); // \prod_{j \ne i} (x_i - x_j)

        for (j, x_j) in lifted.iter().enumerate() {
            if j == i {
                continue;
            }

            let diff = arith.sub(x_i, x_j);
            if arith.is_zero(&diff) {
                return Err(ReconError::SingularPoints { x: xs[i].clone() });
            }

            numerator = arith.mul(&numerator, &arith.sub(&zero, x_j));
            denominator = arith.mul(&denominator, &diff);
        }

        // Only reachable if the modulus is not actually prime.
        let l_i = arith
            .div(&numerator, &denominator)
            .map_err(|_| ReconError::SingularPoints { x: xs[i].clone() })?;

        coeffs.push(l_i);
    }

    debug_assert_eq!(coeffs.len(), xs.len());

    Ok(coeffs)
}

/// Returns $f(0) = \sum_i \ell_i(0) \cdot y_i$ for the unique polynomial $f$ of degree $< |points|$
/// through all of `points`.
pub fn interpolate<A: Arithmetic>(arith: &A, points: &[Share]) -> Result<A::Elem> {
    let xs = points.iter().map(|s| s.x.clone()).collect::<Vec<BigInt>>();
    let lagr = lagrange_coefficients_at_zero(arith, &xs)?;

    let mut s = arith.zero();
    for (l_i, share) in lagr.iter().zip(points) {
        s = arith.add(&s, &arith.mul(l_i, &arith.lift(&share.y)));
    }

    Ok(s)
}

/// Reconstructs the secret $f(0)$ from the first `k` of `points`; any further points are ignored.
///
/// In `Rational` mode a non-integer $f(0)$ is not an error: it comes back as `Secret::Inexact`,
/// which carries an `InexactResult` warning, and is logged. It is never rounded.
pub fn interpolate_at_zero(points: &[Share], k: usize, mode: &ArithmeticMode) -> Result<Secret> {
    if k == 0 {
        return Err(ReconError::InvalidThreshold { k });
    }

    if points.len() < k {
        return Err(ReconError::InsufficientShares {
            have: points.len(),
            need: k,
        });
    }

    let points = &points[..k];

    match mode {
        ArithmeticMode::Modular(p) => {
            debug!("interpolating {k} shares modulo {p}");
            let field = PrimeField::new(p.clone())?;
            Ok(Secret::Integer(interpolate(&field, points)?))
        }
        ArithmeticMode::Rational => {
            debug!("interpolating {k} shares over the rationals");
            let s = interpolate(&Rationals, points)?;

            match s.to_integer() {
                Some(n) => Ok(Secret::Integer(n)),
                None => {
                    warn!("inexact result: secret {s} is not an integer; the shares may be inconsistent or need a modulus");
                    Ok(Secret::Inexact(s))
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use num_bigint::{BigInt, RandBigInt};
    use num_traits::{One, Zero};
    use rand::seq::IteratorRandom;
    use rand::thread_rng;

    use crate::error::ReconError;
    use crate::fraction::Fraction;
    use crate::lagrange::{
        interpolate_at_zero, lagrange_coefficients_at_zero, Arithmetic, ArithmeticMode, PrimeField, Rationals,
    };
    use crate::polynomials::{poly_eval, poly_eval_mod};
    use crate::secret::Secret;
    use crate::share::Share;
    use crate::tests::{random_poly, SMALL_PRIME, SMALL_THRESHOLDS};

    fn shares(pts: &[(i64, i64)]) -> Vec<Share> {
        pts.iter().map(|&(x, y)| Share::new(BigInt::from(x), BigInt::from(y))).collect()
    }

    #[test]
    fn test_line_rational_and_modular() {
        // P(X) = 3 + 2X
        let pts = shares(&[(1, 5), (2, 7)]);

        let s = interpolate_at_zero(&pts, 2, &ArithmeticMode::Rational).unwrap();
        assert_eq!(s, Secret::Integer(BigInt::from(3)));
        assert_eq!(s.as_integer(), Some(&BigInt::from(3)));
        assert!(s.warning().is_none());

        let s = interpolate_at_zero(&pts, 2, &ArithmeticMode::modular(BigInt::from(11)).unwrap()).unwrap();
        assert_eq!(s, Secret::Integer(BigInt::from(3)));
    }

    #[test]
    fn test_lagrange_rational() {
        let mut rng = thread_rng();

        for &t in SMALL_THRESHOLDS.iter() {
            let f = random_poly(t, 128, &mut rng);

            // pick t distinct abscissas from a small range, possibly including negative ones
            let xs = (-40i64..40)
                .filter(|x| *x != 0)
                .choose_multiple(&mut rng, t);

            let pts = xs
                .iter()
                .map(|&x| {
                    let x = BigInt::from(x);
                    let y = poly_eval(&f, &x);
                    Share::new(x, y)
                })
                .collect::<Vec<_>>();

            let s = interpolate_at_zero(&pts, t, &ArithmeticMode::Rational).unwrap();
            assert_eq!(s, Secret::Integer(f[0].clone()), "t = {t}");
        }
    }

    #[test]
    fn test_lagrange_modular() {
        let mut rng = thread_rng();
        let p = BigInt::from(SMALL_PRIME);

        for &t in SMALL_THRESHOLDS.iter() {
            let f = (0..t).map(|_| rng.gen_bigint_range(&BigInt::zero(), &p)).collect::<Vec<_>>();

            let pts = (1..=t as u64)
                .map(|x| {
                    let x = BigInt::from(x);
                    let y = poly_eval_mod(&f, &x, &p);
                    Share::new(x, y)
                })
                .collect::<Vec<_>>();

            let s = interpolate_at_zero(&pts, t, &ArithmeticMode::Modular(p.clone())).unwrap();
            assert_eq!(s, Secret::Integer(f[0].clone()), "t = {t}");
        }
    }

    #[test]
    fn test_coefficients_sum_to_one() {
        // \sum_i \ell_i(0) = 1, since the constant polynomial 1 interpolates to 1
        let xs = [3, 5, 7, 11].iter().map(|x| BigInt::from(*x)).collect::<Vec<_>>();

        let lagr = lagrange_coefficients_at_zero(&Rationals, &xs).unwrap();
        let sum = lagr.iter().fold(Fraction::zero(), |acc, l| &acc + l);
        assert_eq!(sum, Fraction::one());

        let field = PrimeField::new(BigInt::from(SMALL_PRIME)).unwrap();
        assert_eq!(field.modulus(), &BigInt::from(SMALL_PRIME));
        let lagr = lagrange_coefficients_at_zero(&field, &xs).unwrap();
        let sum = lagr.iter().fold(field.zero(), |acc, l| field.add(&acc, l));
        assert_eq!(sum, BigInt::one());
    }

    #[test]
    fn test_surplus_points_ignored() {
        // first two lie on 3 + 2X, the third does not
        let pts = shares(&[(1, 5), (2, 7), (3, 1000)]);
        let s = interpolate_at_zero(&pts, 2, &ArithmeticMode::Rational).unwrap();
        assert_eq!(s, Secret::Integer(BigInt::from(3)));
    }

    #[test]
    fn test_singular_points() {
        let pts = shares(&[(1, 5), (1, 9)]);

        for mode in [ArithmeticMode::Rational, ArithmeticMode::Modular(BigInt::from(11))] {
            match interpolate_at_zero(&pts, 2, &mode) {
                Err(ReconError::SingularPoints { x }) => assert_eq!(x, BigInt::one()),
                other => panic!("expected SingularPoints, got {other:?}"),
            }
        }

        // distinct integers, but equal modulo 11
        let pts = shares(&[(1, 5), (12, 9)]);
        let e = interpolate_at_zero(&pts, 2, &ArithmeticMode::Modular(BigInt::from(11))).unwrap_err();
        assert!(matches!(e, ReconError::SingularPoints { .. }));
        assert!(e.to_string().contains("equal modulo p"), "{e}");
        assert!(interpolate_at_zero(&pts, 2, &ArithmeticMode::Rational).is_ok());
    }

    #[test]
    fn test_composite_modulus_reports_singular() {
        // 2 - 0 = 2 has no inverse modulo 4
        let pts = shares(&[(0, 1), (2, 3)]);
        assert!(matches!(
            interpolate_at_zero(&pts, 2, &ArithmeticMode::Modular(BigInt::from(4))),
            Err(ReconError::SingularPoints { .. })
        ));
    }

    #[test]
    fn test_inexact_result() {
        // the line through (1, 1) and (3, 2) is 1/2 + X/2
        let pts = shares(&[(1, 1), (3, 2)]);
        let s = interpolate_at_zero(&pts, 2, &ArithmeticMode::Rational).unwrap();

        let half = Fraction::new(BigInt::one(), BigInt::from(2)).unwrap();
        assert_eq!(s, Secret::Inexact(half));
        assert!(s.warning().is_some());
        assert_eq!(s.to_string(), "1/2");
    }

    #[test]
    fn test_insufficient_and_invalid_threshold() {
        let pts = shares(&[(1, 5), (2, 7)]);

        assert!(matches!(
            interpolate_at_zero(&pts, 3, &ArithmeticMode::Rational),
            Err(ReconError::InsufficientShares { have: 2, need: 3 })
        ));
        assert!(matches!(
            interpolate_at_zero(&pts, 0, &ArithmeticMode::Rational),
            Err(ReconError::InvalidThreshold { k: 0 })
        ));
    }

    #[test]
    fn test_invalid_modulus() {
        assert_eq!(ArithmeticMode::from_modulus(None).unwrap().modulus(), None);
        assert_eq!(
            ArithmeticMode::from_modulus(Some(BigInt::from(11))).unwrap().modulus(),
            Some(&BigInt::from(11))
        );
        assert!(matches!(ArithmeticMode::modular(BigInt::one()), Err(ReconError::InvalidModulus { .. })));
        assert!(matches!(ArithmeticMode::modular(BigInt::from(-7)), Err(ReconError::InvalidModulus { .. })));

        let pts = shares(&[(1, 5)]);
        assert!(matches!(
            interpolate_at_zero(&pts, 1, &ArithmeticMode::Modular(BigInt::zero())),
            Err(ReconError::InvalidModulus { .. })
        ));
    }

    #[test]
    fn test_single_share_is_the_secret() {
        let pts = shares(&[(4, 42)]);
        assert_eq!(
            interpolate_at_zero(&pts, 1, &ArithmeticMode::Rational).unwrap(),
            Secret::Integer(BigInt::from(42))
        );
        assert_eq!(
            interpolate_at_zero(&pts, 1, &ArithmeticMode::Modular(BigInt::from(11))).unwrap(),
            Secret::Integer(BigInt::from(9))
        );
    }
}
