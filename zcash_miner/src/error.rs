use std::fmt;

/// Errors raised while mining.
#[derive(Debug)]
pub enum Error {
    /// The solver rejected its configuration or an attempt failed.
    Solver(equihash_solver::Error),
    /// A serialized block header was not exactly [`HEADER_SIZE`](crate::HEADER_SIZE)
    /// bytes long.
    InvalidHeaderLength(usize),
    /// A difficulty target was not 32 bytes of hex.
    InvalidTarget,
    /// Every nonce2 value has been tried for the current job.
    NonceExhausted,
    /// The pool-assigned nonce prefix leaves no room for nonce2.
    Nonce1TooLong(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Solver(e) => write!(f, "solver error: {}", e),
            Error::InvalidHeaderLength(len) => write!(
                f,
                "block header is {} bytes long, expected {}",
                len,
                crate::HEADER_SIZE
            ),
            Error::InvalidTarget => f.write_str("target is not 32 hex-encoded bytes"),
            Error::NonceExhausted => f.write_str("nonce space exhausted for the current job"),
            Error::Nonce1TooLong(len) => write!(f, "nonce1 of {} bytes is too long", len),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Solver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<equihash_solver::Error> for Error {
    fn from(e: equihash_solver::Error) -> Self {
        Error::Solver(e)
    }
}
