//! # Modular Arithmetic — Extended Euclid, Inverses, Exponentiation
//!
//! Exact modular arithmetic over `rug::Integer`:
//!
//! 1. **Extended Euclidean algorithm** (`extended_gcd`) — the iterative
//!    remainder/coefficient recurrence, terminating for every integer input
//!    including zeros and negatives.
//! 2. **Modular inverse** (`mod_inverse`) — built on `extended_gcd`, with a
//!    typed error when no inverse exists.
//! 3. **Modular exponentiation** (`pow_mod`) — square-and-multiply with a
//!    reduction after every multiplication, so intermediates never exceed
//!    modulus².
//! 4. **GCD / LCM** (`gcd`, `lcm`) — plain Euclidean loop and the
//!    overflow-lean `|a / g * b|` formulation.
//!
//! ## Conventions
//!
//! `extended_gcd(a, b)` returns `(g, x, y)` with `a·x + b·y = g` and
//! `g >= 0`; when the loop ends on a negative remainder (possible for
//! negative inputs under truncating division) the whole triple is negated,
//! which preserves the identity. Both inputs zero is defined as `(0, 0, 0)`.
//!
//! ## References
//!
//! - D.E. Knuth, *The Art of Computer Programming*, Vol. 2, §4.5.2
//!   (extended Euclid and the Bezout coefficients).
//! - Handbook of Applied Cryptography, §14.6 (binary exponentiation).

use rug::ops::RemRounding;
use rug::Integer;

use crate::error::{Error, Result};

/// Extended Euclidean algorithm: returns `(g, x, y)` such that
/// `a*x + b*y == g == gcd(a, b)` with `g >= 0`.
///
/// Defined for all integers. Both inputs zero yields the canonical
/// `(0, 0, 0)`.
pub fn extended_gcd(a: &Integer, b: &Integer) -> (Integer, Integer, Integer) {
    if *a == 0u32 && *b == 0u32 {
        return (Integer::new(), Integer::new(), Integer::new());
    }

    let mut old_r = a.clone();
    let mut r = b.clone();
    let mut old_s = Integer::from(1u32);
    let mut s = Integer::new();
    let mut old_t = Integer::new();
    let mut t = Integer::from(1u32);

    while r != 0u32 {
        let q = Integer::from(&old_r / &r);
        let next_r = old_r - Integer::from(&q * &r);
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = old_s - Integer::from(&q * &s);
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = old_t - Integer::from(&q * &t);
        old_t = std::mem::replace(&mut t, next_t);
    }

    // Truncating division leaves the last nonzero remainder with the sign of
    // the inputs; normalize so g >= 0. Negating the whole triple preserves
    // a*x + b*y = g.
    if old_r < 0u32 {
        old_r = -old_r;
        old_s = -old_s;
        old_t = -old_t;
    }
    (old_r, old_s, old_t)
}

/// Modular inverse of `a` modulo `m`: the `x` in `[0, m)` with
/// `(a * x) mod m == 1`.
///
/// `InvalidArgument` for `m <= 0`; `NoInverseExists` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &Integer, m: &Integer) -> Result<Integer> {
    if *m <= 0u32 {
        return Err(Error::InvalidArgument {
            arg: "m",
            msg: format!("modulus must be positive, got {m}"),
        });
    }
    let a_reduced = Integer::from(a).rem_euc(m);
    let (g, x, _) = extended_gcd(&a_reduced, m);
    if g != 1u32 {
        return Err(Error::NoInverseExists {
            a: a.clone(),
            m: m.clone(),
            g,
        });
    }
    Ok(x.rem_euc(m))
}

/// Modular exponentiation `base^exponent mod modulus` by repeated squaring,
/// reducing after every multiplication. Result is in `[0, modulus)`;
/// `modulus = 1` yields `0`.
///
/// `InvalidArgument` for a negative exponent or a non-positive modulus.
pub fn pow_mod(base: &Integer, exponent: &Integer, modulus: &Integer) -> Result<Integer> {
    if *exponent < 0u32 {
        return Err(Error::InvalidArgument {
            arg: "exponent",
            msg: format!("exponent must be non-negative, got {exponent}"),
        });
    }
    if *modulus <= 0u32 {
        return Err(Error::InvalidArgument {
            arg: "modulus",
            msg: format!("modulus must be positive, got {modulus}"),
        });
    }
    Ok(pow_mod_reduced(base, exponent, modulus))
}

/// Square-and-multiply core; callers guarantee `exponent >= 0` and
/// `modulus > 0`.
pub(crate) fn pow_mod_reduced(base: &Integer, exponent: &Integer, modulus: &Integer) -> Integer {
    if *modulus == 1u32 {
        return Integer::new();
    }
    let mut b = Integer::from(base).rem_euc(modulus);
    let mut result = Integer::from(1u32);
    let bits = exponent.significant_bits();
    for i in 0..bits {
        if exponent.get_bit(i) {
            result *= &b;
            result %= modulus;
        }
        if i + 1 < bits {
            b.square_mut();
            b %= modulus;
        }
    }
    result
}

/// Greatest common divisor via the Euclidean loop; always non-negative.
pub fn gcd(a: &Integer, b: &Integer) -> Integer {
    let mut a = a.clone();
    let mut b = b.clone();
    while b != 0u32 {
        let r = Integer::from(&a % &b);
        a = std::mem::replace(&mut b, r);
    }
    a.abs()
}

/// Least common multiple; `0` when either input is zero. Computed as
/// `|a / gcd * b|` to keep the intermediate product small.
pub fn lcm(a: &Integer, b: &Integer) -> Integer {
    if *a == 0u32 || *b == 0u32 {
        return Integer::new();
    }
    let g = gcd(a, b);
    let reduced = Integer::from(a / &g);
    (reduced * b).abs()
}
