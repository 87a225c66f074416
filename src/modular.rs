use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::error::{ReconError, Result};

/// Returns $a \bmod m$ in $[0, m)$, even when $a$ is negative (unlike `%`, which truncates).
#[inline]
pub fn reduce_mod(a: &BigInt, m: &BigInt) -> BigInt {
    a.mod_floor(m)
}

/// Returns $a^{-1} \bmod m$ via the extended Euclidean algorithm.
///
/// NOTE: Assumes $m$ is prime and $m > 1$. Primality is *not* checked; for a composite $m$ this
/// still returns the right answer whenever $\gcd(a, m) = 1$ and fails otherwise.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    let a = reduce_mod(a, m);

    // a * x + m * y = gcd(a, m), so when the gcd is 1 we get a * x = 1 (mod m)
    let egcd = a.extended_gcd(m);
    if !egcd.gcd.is_one() {
        return Err(ReconError::NotInvertible {
            value: a,
            modulus: m.clone(),
        });
    }

    Ok(reduce_mod(&egcd.x, m))
}
