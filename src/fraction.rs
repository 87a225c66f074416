use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{ReconError, Result};

/// An exact rational number $\frac{num}{den}$ over arbitrary-precision integers.
///
/// Always normalized: $den > 0$ and $\gcd(|num|, den) = 1$, with zero stored as $0/1$. Since the
/// fields are private and every operation goes through `Fraction::new`, two equal rationals always
/// have identical representations, so the derived `PartialEq` is value equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: BigInt,
    den: BigInt,
}

impl Fraction {
    /// Returns $num / den$ in lowest terms, or `DivisionByZero` if $den = 0$.
    pub fn new(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(ReconError::DivisionByZero);
        }

        Ok(Self::normalize(num, den))
    }

    pub fn from_integer(n: BigInt) -> Self {
        Fraction {
            num: n,
            den: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    /// Callers must guarantee $den \ne 0$.
    fn normalize(mut num: BigInt, mut den: BigInt) -> Self {
        debug_assert!(!den.is_zero());

        if den.is_negative() {
            num = -num;
            den = -den;
        }

        let g = num.gcd(&den);
        if !g.is_one() {
            num = num / &g;
            den = den / &g;
        }

        Fraction { num, den }
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    /// Returns the value as an integer, but only when it is one: never truncates.
    pub fn to_integer(&self) -> Option<BigInt> {
        if self.is_integer() {
            Some(self.num.clone())
        } else {
            None
        }
    }

    /// Returns $self / rhs$, or `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Fraction) -> Result<Fraction> {
        if rhs.is_zero() {
            return Err(ReconError::DivisionByZero);
        }

        Ok(Self::normalize(&self.num * &rhs.den, &self.den * &rhs.num))
    }
}

impl From<BigInt> for Fraction {
    fn from(n: BigInt) -> Self {
        Fraction::from_integer(n)
    }
}

impl fmt::Display for Fraction {
    /// A bare integer when the denominator is 1, `num/den` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl<'a> Add<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn add(self, rhs: &Fraction) -> Fraction {
        // a/b + c/d = (ad + cb) / bd
        Fraction::normalize(&self.num * &rhs.den + &rhs.num * &self.den, &self.den * &rhs.den)
    }
}

impl<'a> Sub<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &Fraction) -> Fraction {
        Fraction::normalize(&self.num * &rhs.den - &rhs.num * &self.den, &self.den * &rhs.den)
    }
}

impl<'a> Mul<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction::normalize(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        &self + &rhs
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        &self - &rhs
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        &self * &rhs
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}
