use crate::Error;

/// The 32-byte header nonce, split into the pool-assigned nonce1 prefix and the
/// miner-controlled nonce2 suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonceSpace {
    nonce: [u8; 32],
    nonce1_len: usize,
}

impl NonceSpace {
    pub fn new(nonce1: &[u8]) -> Result<Self, Error> {
        let mut nonce = [0; 32];
        if nonce1.len() >= nonce.len() {
            return Err(Error::Nonce1TooLong(nonce1.len()));
        }
        nonce[..nonce1.len()].copy_from_slice(nonce1);
        Ok(NonceSpace {
            nonce,
            nonce1_len: nonce1.len(),
        })
    }

    pub fn nonce(&self) -> &[u8; 32] {
        &self.nonce
    }

    pub fn nonce1(&self) -> &[u8] {
        &self.nonce[..self.nonce1_len]
    }

    pub fn nonce2(&self) -> &[u8] {
        &self.nonce[self.nonce1_len..]
    }

    pub fn reset(&mut self) {
        self.nonce[self.nonce1_len..].fill(0);
    }

    /// Adds one to nonce2, read as a little-endian integer.
    pub fn increment(&mut self) -> Result<(), Error> {
        for b in &mut self.nonce[self.nonce1_len..] {
            *b = b.wrapping_add(1);
            if *b != 0 {
                return Ok(());
            }
        }
        Err(Error::NonceExhausted)
    }
}
