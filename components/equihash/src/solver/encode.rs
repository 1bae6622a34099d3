//! The solution wire format: a three-byte compact length followed by the bit-packed
//! indices.

use byteorder::{LittleEndian, ReadBytesExt};

use crate::minimal::{indices_from_minimal, minimal_from_indices};
use crate::{Error, Params};

/// First byte of a compact size whose value is carried in the next two bytes.
pub const COMPACT_SIZE_MARKER: u8 = 0xfd;

/// Length of the `0xfd || le16(len)` prefix.
pub const LENGTH_PREFIX_SIZE: usize = 3;

fn length_prefix(p: &Params) -> [u8; LENGTH_PREFIX_SIZE] {
    let [lo, hi] = (p.solution_size() as u16).to_le_bytes();
    [COMPACT_SIZE_MARKER, lo, hi]
}

/// Encodes `indices` as a length-prefixed minimal solution.
///
/// # Panics
///
/// Panics if `indices` does not hold exactly [`Params::solution_len`] values.
pub fn encode_solution(p: &Params, indices: &[u32]) -> Vec<u8> {
    assert_eq!(indices.len(), p.solution_len());
    let mut out = length_prefix(p).to_vec();
    out.extend(minimal_from_indices(*p, indices));
    out
}

/// Decodes a length-prefixed minimal solution back into its indices.
pub fn decode_solution(p: &Params, bytes: &[u8]) -> Result<Vec<u32>, Error> {
    let err = || Error::InvalidSolutionLength {
        expected: LENGTH_PREFIX_SIZE + p.solution_size(),
        actual: bytes.len(),
    };

    let mut rdr = bytes;
    let marker = rdr.read_u8().map_err(|_| err())?;
    let len = rdr.read_u16::<LittleEndian>().map_err(|_| err())?;
    if marker != COMPACT_SIZE_MARKER || usize::from(len) != p.solution_size() {
        return Err(err());
    }
    indices_from_minimal(*p, rdr).ok_or_else(err)
}

/// The proof-of-work input followed by the most recently encoded solution.
///
/// After a solution has been written, [`Block::as_bytes`] is the complete serialized
/// header that a pool or node expects.
#[derive(Clone, Debug, Default)]
pub struct Block {
    bytes: Vec<u8>,
    input_len: usize,
}

impl Block {
    /// Replaces the input and clears the solution area.
    pub(crate) fn reset(&mut self, p: &Params, input: &[u8]) {
        self.bytes.clear();
        self.bytes.extend_from_slice(input);
        self.bytes.extend_from_slice(&length_prefix(p));
        self.bytes
            .resize(input.len() + LENGTH_PREFIX_SIZE + p.solution_size(), 0);
        self.input_len = input.len();
    }

    /// Packs `indices` into the solution area.
    pub(crate) fn write_solution(&mut self, p: &Params, indices: &[u32]) {
        let start = self.input_len + LENGTH_PREFIX_SIZE;
        self.bytes[start..].copy_from_slice(&minimal_from_indices(*p, indices));
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The bytes that were hashed to produce the candidate strings.
    pub fn input(&self) -> &[u8] {
        &self.bytes[..self.input_len]
    }

    /// The length prefix and packed solution.
    pub fn solution(&self) -> &[u8] {
        &self.bytes[self.input_len..]
    }

    /// The packed solution without its length prefix.
    pub fn minimal_solution(&self) -> &[u8] {
        &self.bytes[self.input_len + LENGTH_PREFIX_SIZE..]
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::{decode_solution, encode_solution, Block, COMPACT_SIZE_MARKER};
    use crate::{Error, Params};

    #[test]
    fn zcash_prefix() {
        let p = Params::zcash();
        let indices: Vec<u32> = (0..512).map(|i| i * 4099).collect();
        let encoded = encode_solution(&p, &indices);
        assert_eq!(encoded.len(), 1347);
        assert_eq!(encoded[..3], [COMPACT_SIZE_MARKER, 0x40, 0x05]);
        assert_eq!(decode_solution(&p, &encoded).unwrap(), indices);
    }

    #[test]
    fn independent_unpacking() {
        // Unpack bit by bit, most significant bit first, without the shared codec.
        let p = Params::solver(96, 5).unwrap();
        let indices: Vec<u32> = (0..32).map(|i| (i * 40503 + 17) % (1 << 17)).collect();
        let encoded = encode_solution(&p, &indices);
        assert_eq!(encoded[..3], [0xfd, 68, 0]);

        let bits = &encoded[3..];
        let unpacked: Vec<u32> = (0..32)
            .map(|i| {
                (0..17).fold(0, |acc, b| {
                    let bit = i * 17 + b;
                    (acc << 1) | u32::from((bits[bit / 8] >> (7 - bit % 8)) & 1)
                })
            })
            .collect();
        assert_eq!(unpacked, indices);
    }

    #[test]
    fn malformed_prefix() {
        let p = Params::solver(96, 5).unwrap();
        let mut encoded = encode_solution(&p, &[1; 32]);

        assert_matches!(
            decode_solution(&p, &encoded[..70]),
            Err(Error::InvalidSolutionLength {
                expected: 71,
                actual: 70
            })
        );
        assert_matches!(decode_solution(&p, &encoded[..2]), Err(_));

        encoded[0] = 0xfe;
        assert_matches!(decode_solution(&p, &encoded), Err(_));
    }

    #[test]
    fn block_layout() {
        let p = Params::solver(96, 5).unwrap();
        let mut block = Block::default();
        block.reset(&p, b"header");
        assert_eq!(block.as_bytes().len(), 6 + 3 + 68);
        assert_eq!(block.input(), b"header");
        assert_eq!(block.solution()[..3], [0xfd, 68, 0]);
        assert!(block.minimal_solution().iter().all(|b| *b == 0));

        let indices: Vec<u32> = (100..132).collect();
        block.write_solution(&p, &indices);
        assert_eq!(block.solution(), encode_solution(&p, &indices));
        assert_eq!(decode_solution(&p, block.solution()).unwrap(), indices);
    }
}
