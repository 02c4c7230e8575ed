use rug::Integer;

/// Error taxonomy for the crate. Every other out-of-range condition (a
/// primality query below 2, a sieve limit below 2, iterating an empty bitset)
/// is a defined result, not an error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument {arg}: {msg}")]
    InvalidArgument { arg: &'static str, msg: String },
    #[error("no modular inverse exists: gcd({a}, {m}) = {g}")]
    NoInverseExists { a: Integer, m: Integer, g: Integer },
}

pub type Result<T> = core::result::Result<T, Error>;
