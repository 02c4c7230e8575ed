pub mod bits;
pub mod bitset;
pub mod error;
pub mod modular;
pub mod primality;
pub mod sieve;

pub use error::{Error, Result};

use rug::Integer;

/// Convert a signed bit index into the `u32` index space of the backing
/// integer. Rejects negative indices and indices at or above 2^32 (the limit
/// of GMP's bit addressing through `rug`).
pub(crate) fn checked_index(index: i64) -> Result<u32> {
    u32::try_from(index).map_err(|_| Error::InvalidArgument {
        arg: "index",
        msg: format!("bit index must be in [0, 2^32), got {index}"),
    })
}

/// Parity check via the low bit; works for negative values under
/// two's-complement semantics.
pub fn is_even(n: &Integer) -> bool {
    !n.get_bit(0)
}

/// Estimate decimal digit count from bit length, avoiding a full decimal
/// conversion. Accurate to within one digit.
pub fn estimate_digits(n: &Integer) -> u64 {
    let bits = n.significant_bits();
    if bits == 0 {
        return 1;
    }
    (bits as f64 * std::f64::consts::LOG10_2) as u64 + 1
}

/// Exact decimal digit count (expensive for very large numbers).
pub fn exact_digits(n: &Integer) -> u64 {
    let s = n.to_string_radix(10);
    s.trim_start_matches('-').len() as u64
}

/// Renderings of an integer in the four programmer bases. No `0b`/`0o`/`0x`
/// prefixes; negative values carry a leading minus sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseStrings {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    pub hex: String,
}

/// Render `n` in binary, octal, decimal, and hexadecimal.
pub fn to_string_bases(n: &Integer) -> BaseStrings {
    BaseStrings {
        binary: n.to_string_radix(2),
        octal: n.to_string_radix(8),
        decimal: n.to_string_radix(10),
        hex: n.to_string_radix(16),
    }
}
