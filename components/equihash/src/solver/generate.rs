//! Generation 0: expanding the input into candidate strings.

use tracing::debug;

use super::{Solver, State};
use crate::blake2b::{generate_hash, initialise_state};
use crate::minimal::read_words;
use crate::Error;

impl Solver {
    /// Starts a new attempt: hashes `input` into the generation-0 candidate strings and
    /// discards everything left over from the previous attempt.
    ///
    /// Each BLAKE2b invocation yields several `n`-bit strings; string `i` of invocation
    /// `h` is the candidate with index `h * (512 / n) + i`. Candidates are bucketed by
    /// the leading bits of their first collision window.
    pub fn generate(&mut self, input: &[u8]) -> Result<(), Error> {
        let p = self.params;
        self.state = State::Idle;
        self.solutions = 0;
        self.tree.clear();
        self.block.reset(&p, input);
        self.even.reset(0, p.value_words(0));

        let mut base = initialise_state(&p);
        base.update(input);

        let string_bytes = (p.n / 8) as usize;
        let per_hash = p.indices_per_hash_output() as usize;
        let windows = (p.k + 1) as usize;
        let l2_bits = p.l2_bits();
        let mut digits = vec![0; windows];

        for h in 0..p.hash_count() {
            let hash = generate_hash(&base, h as u32);
            let strings = hash.as_bytes().chunks_exact(string_bytes);
            for (index, string) in (h * per_hash..p.candidate_count()).zip(strings) {
                read_words(string, p.collision_bit_length(), &mut digits);

                let slot = self.even.insert((digits[0] >> l2_bits) as usize)?;
                slot[..windows].copy_from_slice(&digits);
                slot[windows] = index as u32;
            }
        }

        debug!(
            candidates = self.even.occupancy(),
            hashes = p.hash_count(),
            "generated candidate strings"
        );
        self.state = State::Ready(0);
        Ok(())
    }
}
