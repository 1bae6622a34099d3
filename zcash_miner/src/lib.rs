//! A CPU miner for Zcash-family block headers.
//!
//! [`Miner`] drives an [`equihash_solver::Solver`] over the header of the current pool
//! job, one nonce2 value per attempt. Every solution is checked against the pool's
//! [`Target`] and, if it meets it, handed to a [`ShareSink`] as a [`Share`]. Jobs arrive
//! through a [`JobSignal`], which may be shared with another thread; a pending job can
//! interrupt an attempt between generations.
//!
//! The pool connection itself is out of scope: callers feed jobs and targets in and
//! forward shares out.

#![deny(rustdoc::broken_intra_doc_links)]

mod bench;
mod error;
mod header;
mod miner;
mod nonce;
mod target;

pub use bench::{benchmark, BenchReport};
pub use error::Error;
pub use header::{BlockHash, BlockHeader, HEADER_SIZE};
pub use miner::{Attempt, Job, JobSignal, Miner, MinerConfig, Share, ShareSink, Stats};
pub use nonce::NonceSpace;
pub use target::{block_hash, Target};
