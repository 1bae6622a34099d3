//! Equihash is a Proof-of-Work algorithm, based on a generalization of the Birthday
//! problem which finds colliding hash values. It was designed to be memory-hard; more
//! specifically, the bottle-neck for parallel implementations of Equihash solvers would
//! be memory bandwidth.
//!
//! This crate contains a bucketed solver for any valid `(n, k)` parameters whose
//! collision windows fit in a 32-bit word, together with a verifier for the solutions it
//! produces. The solver works in `k + 1` generations over fixed-capacity tables, records
//! the ancestry of every merged value in a compact collision tree, and hands each
//! solution to a [`Submitter`] already encoded in the Zcash wire format.
//!
//! ```no_run
//! use equihash_solver::{Block, Params, Solver};
//!
//! let mut solver = Solver::new(Params::zcash());
//! let header = [0u8; 140];
//! solver
//!     .solve(&header, &mut |block: &Block, _: &[u32]| {
//!         println!("{}", block.as_bytes().len());
//!         false
//!     })
//!     .unwrap();
//! ```
//!
#![cfg_attr(feature = "docs", doc = "## Feature flags")]
#![cfg_attr(feature = "docs", doc = document_features::document_features!())]
//!
//! References
//! ==========
//! - [Section 7.6.1: Equihash.] Zcash Protocol Specification, version 2020.1.10 or later.
//! - Alex Biryukov and Dmitry Khovratovich.
//!   [*Equihash: Asymmetric Proof-of-Work Based on the Generalized Birthday Problem.*][BK16]
//!   NDSS ’16.
//!
//! [Section 7.6.1: Equihash.]: https://zips.z.cash/protocol/protocol.pdf#equihash
//! [BK16]: https://www.internetsociety.org/sites/default/files/blogs-media/equihash-asymmetric-proof-of-work-based-generalized-birthday-problem.pdf

// Catch documentation errors caused by code changes.
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, doc(auto_cfg))]

mod blake2b;
mod error;
mod minimal;
mod params;
mod solver;
pub mod verify;

#[cfg(test)]
mod test_vectors;

pub use error::Error;
pub use params::Params;
pub use solver::{
    decode_solution, encode_solution, Block, Outcome, Solver, State, Submitter,
    COMPACT_SIZE_MARKER, LENGTH_PREFIX_SIZE,
};
pub use verify::is_valid_solution;
