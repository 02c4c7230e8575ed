//! # Primality — Miller–Rabin Compositeness Testing
//!
//! A single-call classifier: trial division against a small-prime table
//! disposes of most random composites, then the Miller–Rabin strong
//! pseudoprime test probes the survivors.
//!
//! ## Algorithm
//!
//! Write n−1 = d·2^s with d odd. A witness `a` passes when `a^d ≡ ±1 (mod
//! n)` or some square in the chain `a^(d·2^r)` hits n−1 before r reaches s.
//! A witness that fails is a proof of compositeness, so the test
//! short-circuits to composite on the first failure.
//!
//! ## Witness selection
//!
//! Below 2^64 the fixed literal set {2, 3, 5, 7, 11, 13, 17} is used and the
//! verdict is deterministic; this set is part of the crate's compatibility
//! contract and must not be altered. At or above 2^64 the test draws
//! `rounds` witnesses uniformly from [2, n−2] out of a caller-supplied
//! `RandState`, and the verdict is "probably prime" with error probability
//! at most 4^(−rounds).
//!
//! The random source is a capability: the caller owns it, seeds it, and
//! passes it `&mut`. A seeded generator makes the large-n path reproducible,
//! which the tests rely on. Nothing in this module touches global state.
//!
//! ## References
//!
//! - G.L. Miller, "Riemann's Hypothesis and Tests for Primality", JCSS 13,
//!   1976.
//! - M.O. Rabin, "Probabilistic Algorithm for Testing Primality", Journal of
//!   Number Theory 12, 1980.
//! - G. Jaeschke, "On Strong Pseudoprimes to Several Bases", Mathematics of
//!   Computation 61(204), 1993 (fixed witness sets for bounded ranges).

use rug::rand::RandState;
use rug::Integer;
use tracing::debug;

use crate::modular;

/// Trial-division table. Matching a table entry is an exact prime verdict;
/// divisibility by one is an exact composite verdict.
pub const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Witness set for the deterministic range. Part of the compatibility
/// contract; never reorder or extend.
const DETERMINISTIC_WITNESSES: [u32; 7] = [2, 3, 5, 7, 11, 13, 17];

/// Inputs of at most this many significant bits get the deterministic
/// witness set.
const DETERMINISTIC_BITS: u32 = 64;

/// Round count to use when the caller has no opinion.
pub const DEFAULT_ROUNDS: u32 = 8;

/// Write n−1 = d·2^s with d odd. Requires n >= 3.
fn decompose(n: &Integer) -> (Integer, u32) {
    let mut d = Integer::from(n - 1u32);
    let mut s = 0;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }
    (d, s)
}

/// Check one Miller–Rabin witness. Returns true when `a` is inconclusive
/// for compositeness; false is a proof that n is composite.
fn witness_passes(a: &Integer, d: &Integer, s: u32, n: &Integer) -> bool {
    let n_minus_1 = Integer::from(n - 1u32);
    let mut x = modular::pow_mod_reduced(a, d, n);
    if x == 1u32 || x == n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x.square_mut();
        x %= n;
        if x == n_minus_1 {
            return true;
        }
    }
    false
}

/// Miller–Rabin primality test.
///
/// Returns false for every n < 2 (a defined composite verdict, not an
/// error). Below 2^64 the result is deterministic; above, it is "probably
/// prime" after `rounds` random witnesses drawn from `rng`.
pub fn is_probable_prime(n: &Integer, rounds: u32, rng: &mut RandState) -> bool {
    if *n < 2u32 {
        return false;
    }
    for &p in &SMALL_PRIMES {
        if *n == p {
            return true;
        }
        if n.is_divisible_u(p) {
            return false;
        }
    }

    let (d, s) = decompose(n);

    if n.significant_bits() <= DETERMINISTIC_BITS {
        DETERMINISTIC_WITNESSES
            .iter()
            .all(|&a| witness_passes(&Integer::from(a), &d, s, n))
    } else {
        debug!(
            bits = n.significant_bits(),
            rounds, "random-witness Miller-Rabin"
        );
        (0..rounds).all(|_| {
            // Uniform in [2, n-2]
            let a = Integer::from(n - 3u32).random_below(rng) + 2u32;
            witness_passes(&a, &d, s, n)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(n: &Integer) -> bool {
        let mut rng = RandState::new();
        rng.seed(&Integer::from(0xb17_5e7u64));
        is_probable_prime(n, DEFAULT_ROUNDS, &mut rng)
    }

    // ── Trivial and small inputs ───────────────────────────────────────

    #[test]
    fn below_two_is_composite_not_error() {
        for n in [-10i64, -1, 0, 1] {
            assert!(!probe(&Integer::from(n)), "{n} must classify composite");
        }
    }

    #[test]
    fn small_primes_accepted() {
        for p in [2u32, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 97, 101, 1009] {
            assert!(probe(&Integer::from(p)), "rejected prime {p}");
        }
    }

    #[test]
    fn small_composites_rejected() {
        for c in [4u32, 6, 9, 15, 25, 27, 49, 91, 100, 561, 1001, 1105] {
            assert!(!probe(&Integer::from(c)), "accepted composite {c}");
        }
    }

    // ── Decomposition ──────────────────────────────────────────────────

    #[test]
    fn decompose_splits_out_the_twos() {
        // 21 - 1 = 20 = 5 * 2^2
        let (d, s) = decompose(&Integer::from(21u32));
        assert_eq!(d, 5u32);
        assert_eq!(s, 2);
        // 2^13 + 1 - 1 = 2^13
        let (d, s) = decompose(&((Integer::from(1u32) << 13u32) + 1u32));
        assert_eq!(d, 1u32);
        assert_eq!(s, 13);
    }

    // ── Deterministic range ────────────────────────────────────────────

    /// 341 = 11 × 31 is the smallest base-2 Fermat pseudoprime; the full
    /// witness set must still catch it.
    #[test]
    fn fermat_pseudoprime_341_is_composite() {
        assert!(!probe(&Integer::from(341u32)));
    }

    /// Carmichael numbers fool the plain Fermat test for every coprime
    /// base; Miller-Rabin does not care.
    #[test]
    fn carmichael_numbers_are_composite() {
        for c in [561u32, 1105, 1729, 2465, 2821, 6601] {
            assert!(!probe(&Integer::from(c)), "accepted Carmichael {c}");
        }
    }

    /// 3215031751 = 151 × 751 × 28351 is a strong pseudoprime to bases
    /// {2, 3, 5, 7} simultaneously; the larger witnesses reject it.
    #[test]
    fn strong_pseudoprime_to_first_bases_is_composite() {
        assert!(!probe(&Integer::from(3_215_031_751u64)));
    }

    #[test]
    fn mersenne_prime_m61_is_prime() {
        let m61 = (Integer::from(1u32) << 61u32) - 1u32;
        assert!(probe(&m61));
    }

    #[test]
    fn near_u64_boundary_verdicts() {
        // 2^64 - 59 is the largest prime below 2^64
        let p = Integer::from(u64::MAX) - 58u32;
        assert!(probe(&p));
        let c = Integer::from(u64::MAX) - 57u32;
        assert!(!probe(&c));
    }

    #[test]
    fn matches_gmp_over_a_small_range() {
        use rug::integer::IsPrime;
        let mut rng = RandState::new();
        for n in 0u32..2000 {
            let big = Integer::from(n);
            let ours = is_probable_prime(&big, DEFAULT_ROUNDS, &mut rng);
            let gmp = big.is_probably_prime(30) != IsPrime::No;
            assert_eq!(ours, gmp, "verdict mismatch at {n}");
        }
    }

    // ── Random-witness range (n >= 2^64) ───────────────────────────────

    #[test]
    fn mersenne_prime_m89_is_probably_prime() {
        let m89 = (Integer::from(1u32) << 89u32) - 1u32;
        assert!(probe(&m89));
    }

    #[test]
    fn large_composites_rejected() {
        // (2^61 - 1)^2: a 122-bit perfect square
        let m61 = (Integer::from(1u32) << 61u32) - 1u32;
        let square = Integer::from(&m61 * &m61);
        assert!(!probe(&square));
        // M61 * M89: a 150-bit semiprime with no small factors
        let m89 = (Integer::from(1u32) << 89u32) - 1u32;
        let product = Integer::from(&m61 * &m89);
        assert!(!probe(&product));
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let n = (Integer::from(1u32) << 107u32) - 1u32; // M107, prime
        let verdicts: Vec<bool> = (0..3)
            .map(|_| {
                let mut rng = RandState::new();
                rng.seed(&Integer::from(42u32));
                is_probable_prime(&n, 4, &mut rng)
            })
            .collect();
        assert_eq!(verdicts, vec![true, true, true]);
    }

    #[test]
    fn zero_rounds_above_the_boundary_is_vacuously_prime() {
        // With no witnesses drawn, nothing can prove compositeness. This is
        // the documented contract, not a recommendation.
        let m89 = (Integer::from(1u32) << 89u32) - 1u32;
        let mut rng = RandState::new();
        assert!(is_probable_prime(&m89, 0, &mut rng));
    }
}
