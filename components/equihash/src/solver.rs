//! A single-threaded bucketed solver.
//!
//! A solve attempt proceeds through `k + 1` generations. [`Solver::generate`] hashes the
//! input into the generation-0 candidate strings; [`Solver::advance`] then computes
//! generations `1..=k`, each one pairing up values that collide on the next
//! `n / (k + 1)`-bit window. Intermediate generations keep only the XOR of the windows
//! not yet collided on, plus a reference into the [collision tree](tree::CollisionTree)
//! from which the leaf indices are recovered once a full solution is found.
//!
//! Generations are stored in two [bucket stores](bucket::BucketStore) selected by
//! parity, so generation `g` is read while generation `g + 1` is written.

use std::ops::ControlFlow;

use tracing::debug;

use crate::{Error, Params};

mod bucket;
mod collide;
mod encode;
mod generate;
mod reconstruct;
mod tree;

pub use encode::{
    decode_solution, encode_solution, Block, COMPACT_SIZE_MARKER, LENGTH_PREFIX_SIZE,
};

use bucket::BucketStore;
use tree::CollisionTree;

/// Values sharing an L2 key inside one L1 bucket that the collision step can pair up.
pub(crate) const SUB_BUCKET_CAPACITY: usize = 16;

/// Receives every solution found by [`Solver::advance`].
///
/// The solver has already written the solution into `block` when `submit` is called.
/// Returning `true` stops the search for the current input immediately.
pub trait Submitter {
    fn submit(&mut self, block: &Block, indices: &[u32]) -> bool;
}

impl<F> Submitter for F
where
    F: FnMut(&Block, &[u32]) -> bool,
{
    fn submit(&mut self, block: &Block, indices: &[u32]) -> bool {
        self(block, indices)
    }
}

/// Progress of the current solve attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing has been generated, or the last attempt was abandoned.
    Idle,
    /// Generation `g` is stored; generation `g + 1` can be computed.
    Ready(u32),
    /// Every generation has been processed.
    Exhausted,
    /// A submission ended the attempt early.
    Stopped,
}

/// How a complete solve attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// All generations were processed.
    Exhausted { solutions: usize },
    /// The submitter asked to stop after the last of `solutions`.
    Stopped { solutions: usize },
}

/// Owns every table needed to solve for one set of parameters.
///
/// The tables are allocated once and reused by every attempt, so a `Solver` should be
/// kept around for as long as the parameters stay the same.
pub struct Solver {
    params: Params,
    /// Generations with even numbers.
    even: BucketStore,
    /// Generations with odd numbers.
    odd: BucketStore,
    tree: CollisionTree,
    block: Block,
    sub_counts: Vec<u8>,
    sub_slots: Vec<u32>,
    indices: Vec<u32>,
    solutions: usize,
    state: State,
}

impl Solver {
    pub fn new(params: Params) -> Self {
        Self::with_bucket_capacity(params, params.bucket_capacity())
    }

    /// Like [`Solver::new`], with `capacity` slots per bucket instead of the default
    /// birthday-bound estimate. Smaller tables save memory at the cost of more attempts
    /// abandoned with [`Error::BucketOverflow`].
    pub fn with_bucket_capacity(params: Params, capacity: usize) -> Self {
        let buckets = params.l1_buckets();
        debug!(
            n = params.n,
            k = params.k,
            buckets,
            capacity,
            "allocating solver tables"
        );

        Solver {
            params,
            even: BucketStore::new(buckets, capacity, params.value_words(0)),
            odd: BucketStore::new(buckets, capacity, params.value_words(1)),
            tree: CollisionTree::new(params.tree_capacity()),
            block: Block::default(),
            sub_counts: vec![0; params.l2_buckets()],
            sub_slots: vec![0; params.l2_buckets() * SUB_BUCKET_CAPACITY],
            indices: vec![0; params.solution_len()],
            solutions: 0,
            state: State::Idle,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The input of the current attempt, followed by the last solution written.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Number of solutions submitted during the current attempt.
    pub fn solutions(&self) -> usize {
        self.solutions
    }

    /// Runs a complete attempt over `input`: generation 0 followed by every collision
    /// generation.
    ///
    /// Capacity faults abandon the attempt and are returned as errors; see
    /// [`Error::is_resource_exhaustion`].
    pub fn solve<S: Submitter + ?Sized>(
        &mut self,
        input: &[u8],
        submitter: &mut S,
    ) -> Result<Outcome, Error> {
        self.generate(input)?;
        for generation in 1..=self.params.k {
            if self.advance(generation, submitter)?.is_break() {
                return Ok(Outcome::Stopped {
                    solutions: self.solutions,
                });
            }
        }
        Ok(Outcome::Exhausted {
            solutions: self.solutions,
        })
    }

    /// Computes `generation`, which must directly follow the last one computed.
    ///
    /// Solutions are handed to `submitter` as they are found during the final
    /// generation. Returns [`ControlFlow::Break`] if the submitter asked to stop.
    pub fn advance<S: Submitter + ?Sized>(
        &mut self,
        generation: u32,
        submitter: &mut S,
    ) -> Result<ControlFlow<()>, Error> {
        match self.state {
            State::Ready(g) if g + 1 == generation => (),
            State::Ready(g) => {
                return Err(Error::GenerationOutOfOrder {
                    expected: g + 1,
                    requested: generation,
                })
            }
            State::Exhausted | State::Stopped => {
                return Err(Error::GenerationOutOfOrder {
                    expected: self.params.k + 1,
                    requested: generation,
                })
            }
            State::Idle => return Err(Error::NotGenerated),
        }

        match self.collide(generation, submitter) {
            Ok(ControlFlow::Break(())) => {
                self.state = State::Stopped;
                Ok(ControlFlow::Break(()))
            }
            Ok(ControlFlow::Continue(())) => {
                self.state = if generation == self.params.k {
                    State::Exhausted
                } else {
                    State::Ready(generation)
                };
                Ok(ControlFlow::Continue(()))
            }
            Err(e) => {
                self.state = State::Idle;
                Err(e)
            }
        }
    }
}
