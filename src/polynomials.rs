use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::modular::reduce_mod;

/// Returns $f(x)$ for a polynomial $f$, given by its coefficients $[f_0, f_1, \ldots]$, and a point $x$.
pub fn poly_eval(f: &[BigInt], x: &BigInt) -> BigInt {
    assert!(!f.is_empty());

    let mut eval = BigInt::zero(); // f(x)
    let mut x_i = BigInt::one();   // x^i, i = {0, 1, ..., deg(f)}
    for c_i in f {
        eval += c_i * &x_i;

        x_i *= x;
    }

    eval
}

/// Like `poly_eval`, but returns $f(x) \bmod p$ in $[0, p)$ and keeps every intermediate value reduced.
pub fn poly_eval_mod(f: &[BigInt], x: &BigInt, p: &BigInt) -> BigInt {
    assert!(!f.is_empty());

    let x = reduce_mod(x, p);
    let mut eval = BigInt::zero();
    let mut x_i = BigInt::one();
    for c_i in f {
        eval = reduce_mod(&(eval + c_i * &x_i), p);

        x_i = reduce_mod(&(x_i * &x), p);
    }

    eval
}
