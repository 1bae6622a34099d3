//! The pool-assigned share difficulty.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::Error;

/// Double SHA-256 of a complete block (header, length prefix and solution).
pub fn block_hash(block: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(block)).into()
}

/// A 256-bit difficulty target, stored big-endian as it is received from the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target(pub [u8; 32]);

impl Target {
    /// Accepts every solution.
    pub const MAX: Target = Target([0xff; 32]);

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        hex::decode(s)
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
            .map(Target)
            .ok_or(Error::InvalidTarget)
    }

    /// Returns `true` if the block hash, read as a little-endian integer, is not above
    /// this target.
    pub fn is_met_by(&self, block: &[u8]) -> bool {
        let mut hash = block_hash(block);
        hash.reverse();
        hash <= self.0
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::MAX
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
