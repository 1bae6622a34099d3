//! The Equihash input of a Zcash block.

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::Error;

/// Length of a serialized header without its solution.
pub const HEADER_SIZE: usize = 140;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl fmt::Display for BlockHash {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let mut data = self.0.to_vec();
        data.reverse();
        formatter.write_str(&hex::encode(data))
    }
}

/// A Zcash block header, up to and including the nonce.
///
/// These are exactly the bytes hashed into the Equihash candidates. The solution that
/// follows them on the wire is produced by the solver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block: BlockHash,
    pub merkle_root: [u8; 32],
    /// The final Sapling root or block commitments, depending on the network upgrade.
    pub reserved: [u8; 32],
    pub time: u32,
    pub bits: u32,
    pub nonce: [u8; 32],
}

impl BlockHeader {
    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let version = reader.read_i32::<LittleEndian>()?;

        let mut prev_block = BlockHash([0; 32]);
        reader.read_exact(&mut prev_block.0)?;

        let mut merkle_root = [0; 32];
        reader.read_exact(&mut merkle_root)?;

        let mut reserved = [0; 32];
        reader.read_exact(&mut reserved)?;

        let time = reader.read_u32::<LittleEndian>()?;
        let bits = reader.read_u32::<LittleEndian>()?;

        let mut nonce = [0; 32];
        reader.read_exact(&mut nonce)?;

        Ok(BlockHeader {
            version,
            prev_block,
            merkle_root,
            reserved,
            time,
            bits,
            nonce,
        })
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.version)?;
        writer.write_all(&self.prev_block.0)?;
        writer.write_all(&self.merkle_root)?;
        writer.write_all(&self.reserved)?;
        writer.write_u32::<LittleEndian>(self.time)?;
        writer.write_u32::<LittleEndian>(self.bits)?;
        writer.write_all(&self.nonce)?;
        Ok(())
    }

    /// Parses a header, rejecting any input that is not exactly [`HEADER_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != HEADER_SIZE {
            return Err(Error::InvalidHeaderLength(bytes.len()));
        }
        Self::read(bytes).map_err(|_| Error::InvalidHeaderLength(bytes.len()))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        self.write(&mut bytes).expect("writing to a Vec cannot fail");
        bytes
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::{BlockHash, BlockHeader, HEADER_SIZE};
    use crate::Error;

    fn header() -> BlockHeader {
        BlockHeader {
            version: 4,
            prev_block: BlockHash([0x11; 32]),
            merkle_root: [0x22; 32],
            reserved: [0x33; 32],
            time: 0x5a0b_0c0d,
            bits: 0x1f07_ffff,
            nonce: [0x44; 32],
        }
    }

    #[test]
    fn field_layout() {
        let bytes = header().to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(bytes[..4], [4, 0, 0, 0]);
        assert!(bytes[4..36].iter().all(|b| *b == 0x11));
        assert!(bytes[36..68].iter().all(|b| *b == 0x22));
        assert!(bytes[68..100].iter().all(|b| *b == 0x33));
        assert_eq!(bytes[100..104], [0x0d, 0x0c, 0x0b, 0x5a]);
        assert_eq!(bytes[104..108], [0xff, 0xff, 0x07, 0x1f]);
        assert!(bytes[108..].iter().all(|b| *b == 0x44));

        assert_eq!(BlockHeader::from_bytes(&bytes).unwrap(), header());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut bytes = header().to_bytes();
        assert_matches!(
            BlockHeader::from_bytes(&bytes[..139]),
            Err(Error::InvalidHeaderLength(139))
        );
        bytes.push(0);
        assert_matches!(
            BlockHeader::from_bytes(&bytes),
            Err(Error::InvalidHeaderLength(141))
        );
    }

    #[test]
    fn block_hash_displays_reversed() {
        let mut hash = [0; 32];
        hash[0] = 0xab;
        hash[31] = 0x01;
        let s = BlockHash(hash).to_string();
        assert!(s.starts_with("01"));
        assert!(s.ends_with("ab"));
    }
}
