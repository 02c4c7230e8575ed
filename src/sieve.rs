//! # Sieve — Bitset-Compressed Prime Enumeration
//!
//! Sieve of Eratosthenes storing only odd candidates: bit *i* of a
//! [`Bitset`](crate::bitset::Bitset) stands for the value 2i+1, and a set
//! bit means "known composite". This halves memory against a full boolean
//! array; 2 is handled out of band.
//!
//! Marking starts at i² for each surviving odd i up to √limit — smaller odd
//! multiples were already crossed off by smaller primes, and even multiples
//! are structurally absent from the representation.
//!
//! Complexity: O(limit · log log limit) time, limit/2 bits of space. Results
//! are produced fresh per call; nothing is cached.
//!
//! ## References
//!
//! - Eratosthenes of Cyrene, ~240 BCE.
//! - OEIS [A000720](https://oeis.org/A000720): π(n), the prime counting
//!   function (used by the tests as ground truth).

use tracing::debug;

use crate::bitset::Bitset;
use crate::error::{Error, Result};

/// All primes `<= limit`, ascending. `limit < 2` yields an empty vector.
///
/// The only error is `InvalidArgument` when `⌈limit/2⌉` overflows the
/// bitset's 2^32-bit index space.
pub fn sieve(limit: u64) -> Result<Vec<u64>> {
    if limit < 2 {
        return Ok(Vec::new());
    }
    // Bit i <-> value 2i+1, so ⌈limit/2⌉ bits cover every odd <= limit.
    let size = limit / 2 + limit % 2;
    if size > 1u64 << 32 {
        return Err(Error::InvalidArgument {
            arg: "limit",
            msg: format!("limit {limit} needs {size} bits, above the 2^32 index space"),
        });
    }
    debug!(limit, odd_candidates = size, "sieving");

    let mut composite = Bitset::new();
    let root = isqrt(limit);
    let mut i = 3u64;
    while i <= root {
        if !composite.get((i / 2) as u32) {
            // First odd multiple worth marking is i² (index i²/2); the
            // index stride i advances the value by 2i, skipping evens.
            let mut j = (i * i) / 2;
            while j < size {
                composite.set(j as u32);
                j += i;
            }
        }
        i += 2;
    }

    let mut primes = Vec::with_capacity(prime_count_upper(limit));
    primes.push(2);
    for index in 1..size {
        if !composite.get(index as u32) {
            let p = 2 * index + 1;
            if p <= limit {
                primes.push(p);
            }
        }
    }
    Ok(primes)
}

/// Exact integer square root: f64 seed, then correction loops so the result
/// is never off by one on large inputs where f64 rounds.
fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// Over-estimate of π(n) for result pre-allocation.
fn prime_count_upper(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (nf / nf.ln() * 1.15) as usize + 1
}
