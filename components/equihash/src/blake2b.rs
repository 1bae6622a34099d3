//! The personalized BLAKE2b state shared by the solver and the verifier.

use blake2b_simd::{Hash as Blake2bHash, Params as Blake2bParams, State as Blake2bState};
use byteorder::{LittleEndian, WriteBytesExt};

use crate::params::Params;

/// Seeds BLAKE2b with the `ZcashPoW || le32(n) || le32(k)` personalization.
pub(crate) fn initialise_state(p: &Params) -> Blake2bState {
    let mut personalization: Vec<u8> = Vec::from("ZcashPoW");
    personalization.write_u32::<LittleEndian>(p.n).unwrap();
    personalization.write_u32::<LittleEndian>(p.k).unwrap();

    Blake2bParams::new()
        .hash_length(p.hash_output() as usize)
        .personal(&personalization)
        .to_state()
}

/// Finalizes a clone of `base_state` extended with the little-endian counter `i`.
pub(crate) fn generate_hash(base_state: &Blake2bState, i: u32) -> Blake2bHash {
    let mut state = base_state.clone();
    state.update(&i.to_le_bytes());
    state.finalize()
}

#[cfg(test)]
mod tests {
    use super::{generate_hash, initialise_state};
    use crate::params::Params;

    #[test]
    fn digest_length_covers_whole_strings() {
        let p = Params { n: 96, k: 5 };
        let state = initialise_state(&p);
        let hash = generate_hash(&state, 0);
        assert_eq!(hash.as_bytes().len(), 60);
    }

    #[test]
    fn cloned_state_diverges_per_counter() {
        let p = Params::zcash();
        let mut state = initialise_state(&p);
        state.update(b"header");
        assert_ne!(generate_hash(&state, 0), generate_hash(&state, 1));
        assert_eq!(generate_hash(&state, 7), generate_hash(&state, 7));
    }
}
