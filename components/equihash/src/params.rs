//! Derivation of every bit width and table size from `(n, k)`.

use crate::Error;

/// Bits of the collision window used to sub-partition an L1 bucket.
pub(crate) const MAX_L2_BITS: u32 = 8;

/// The Equihash parameters `(n, k)` together with the quantities derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    pub(crate) n: u32,
    pub(crate) k: u32,
}

impl Params {
    /// Returns `None` if the parameters are invalid.
    pub(crate) fn new(n: u32, k: u32) -> Option<Self> {
        // We place the following requirements on the parameters:
        // - n is a multiple of 8, so the hash output has an exact byte length.
        // - k >= 3 so the encoded solutions have an exact byte length.
        // - k < n, so the collision bit length is at least 1.
        // - n is a multiple of k + 1, so we have an integer collision bit length.
        // - n fits at least once into a BLAKE2b output.
        // - an index (collision bit length + 1) can be expanded through a 32-bit accumulator.
        // - the bit length of a packed solution is representable.
        if (n % 8 == 0)
            && (k >= 3)
            && (k < n)
            && (n % (k + 1) == 0)
            && (n <= 512)
            && (n / (k + 1) >= 8)
            && (n / (k + 1) + 1 + 7 <= u32::BITS)
            && 1usize
                .checked_shl(k)
                .and_then(|len| len.checked_mul((n / (k + 1) + 1) as usize))
                .is_some()
        {
            Some(Params { n, k })
        } else {
            None
        }
    }

    /// Validates `(n, k)` for solving.
    pub fn solver(n: u32, k: u32) -> Result<Self, Error> {
        let p = Self::new(n, k).ok_or(Error::InvalidParams { n, k })?;
        if p.solution_size() > usize::from(u16::MAX) {
            return Err(Error::SolutionTooLarge {
                size: p.solution_size(),
            });
        }
        Ok(p)
    }

    /// Validates `(n, k)` and checks that the derived solution length equals the fixed
    /// length mandated by the wire format.
    pub fn with_solution_size(n: u32, k: u32, solution_size: usize) -> Result<Self, Error> {
        let p = Self::solver(n, k)?;
        if p.solution_size() != solution_size {
            return Err(Error::SolutionSizeMismatch {
                expected: solution_size,
                derived: p.solution_size(),
            });
        }
        Ok(p)
    }

    /// The Zcash mainnet parameters `(200, 9)` with their 1344-byte solutions.
    pub fn zcash() -> Self {
        Params { n: 200, k: 9 }
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub(crate) fn indices_per_hash_output(&self) -> u32 {
        512 / self.n
    }
    pub(crate) fn hash_output(&self) -> u8 {
        (self.indices_per_hash_output() * self.n / 8) as u8
    }
    pub(crate) fn collision_bit_length(&self) -> usize {
        (self.n / (self.k + 1)) as usize
    }
    pub(crate) fn collision_byte_length(&self) -> usize {
        (self.collision_bit_length() + 7) / 8
    }
    #[cfg(test)]
    pub(crate) fn hash_length(&self) -> usize {
        ((self.k as usize) + 1) * self.collision_byte_length()
    }

    /// Width in bits of one encoded index.
    pub fn index_bit_length(&self) -> usize {
        self.collision_bit_length() + 1
    }

    /// Number of generation-0 candidate strings, `2^(n / (k + 1) + 1)`.
    pub fn candidate_count(&self) -> usize {
        1 << self.index_bit_length()
    }

    /// Number of indices in one solution, `2^k`.
    pub fn solution_len(&self) -> usize {
        1 << self.k
    }

    /// Byte length of a bit-packed solution. Exact because `k >= 3`.
    pub fn solution_size(&self) -> usize {
        self.solution_len() * self.index_bit_length() / 8
    }

    /// Number of BLAKE2b invocations needed to produce every candidate string.
    pub(crate) fn hash_count(&self) -> usize {
        let per = self.indices_per_hash_output() as usize;
        (self.candidate_count() + per - 1) / per
    }

    /// Bits of the collision window that select a sub-bucket inside an L1 bucket.
    pub(crate) fn l2_bits(&self) -> u32 {
        MAX_L2_BITS.min(self.collision_bit_length() as u32)
    }

    /// Bits of the collision window that select an L1 bucket.
    pub(crate) fn l1_bits(&self) -> u32 {
        self.collision_bit_length() as u32 - self.l2_bits()
    }

    pub(crate) fn l1_buckets(&self) -> usize {
        1 << self.l1_bits()
    }

    pub(crate) fn l2_buckets(&self) -> usize {
        1 << self.l2_bits()
    }

    /// Slots per L1 bucket: the expected occupancy with a 5/2 margin.
    pub(crate) fn bucket_capacity(&self) -> usize {
        self.candidate_count() / self.l1_buckets() * 5 / 2
    }

    /// Collision tree entries available to one solve attempt.
    pub(crate) fn tree_capacity(&self) -> usize {
        self.candidate_count() * self.k as usize
    }

    /// Words held by a generation-`g` partial value: one per remaining collision window,
    /// followed by its back-reference.
    pub(crate) fn value_words(&self, g: u32) -> usize {
        (self.k + 1 - g) as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::Params;
    use crate::Error;

    #[test]
    fn zcash_parameters() {
        let p = Params::with_solution_size(200, 9, 1344).unwrap();
        assert_eq!(p, Params::zcash());
        assert_eq!(p.collision_bit_length(), 20);
        assert_eq!(p.index_bit_length(), 21);
        assert_eq!(p.candidate_count(), 1 << 21);
        assert_eq!(p.solution_len(), 512);
        assert_eq!(p.hash_output(), 50);
        assert_eq!(p.hash_count(), 1 << 20);
        assert_eq!(p.l1_bits(), 12);
        assert_eq!(p.l2_bits(), 8);
        assert_eq!(p.bucket_capacity(), 1280);
        assert_eq!(p.value_words(1), 10);
    }

    #[test]
    fn uneven_hash_split() {
        // Five 96-bit strings per 64-byte digest do not divide 2^17.
        let p = Params::solver(96, 5).unwrap();
        assert_eq!(p.indices_per_hash_output(), 5);
        assert_eq!(p.hash_count(), 26215);
        assert_eq!(p.solution_size(), 68);
        assert_eq!(p.hash_length(), 12);
    }

    #[test]
    fn invalid_parameters() {
        assert_matches!(Params::solver(201, 9), Err(Error::InvalidParams { .. }));
        assert_matches!(Params::solver(200, 2), Err(Error::InvalidParams { .. }));
        assert_matches!(Params::solver(200, 8), Err(Error::InvalidParams { .. }));
        // 25-bit windows need 26-bit indices, which overflow the expansion accumulator.
        assert_matches!(Params::solver(200, 7), Err(Error::InvalidParams { .. }));
        assert_matches!(Params::solver(32, 3), Ok(_));
        // 2^k indices whose packed bit length does not fit in a usize.
        assert_matches!(
            Params::solver(512, 63),
            Err(Error::InvalidParams { n: 512, k: 63 })
        );
        assert_matches!(
            Params::solver(496, 61),
            Err(Error::InvalidParams { n: 496, k: 61 })
        );
        // 2^15 indices of 17 bits do not fit behind a 16-bit length.
        assert_matches!(
            Params::solver(256, 15),
            Err(Error::SolutionTooLarge { size: 69632 })
        );
    }

    #[test]
    fn solution_size_mismatch() {
        assert_matches!(
            Params::with_solution_size(96, 5, 1344),
            Err(Error::SolutionSizeMismatch {
                expected: 1344,
                derived: 68
            })
        );
    }
}
