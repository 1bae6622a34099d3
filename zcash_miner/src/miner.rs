//! The mining loop: one solve attempt per nonce2 value, with shares handed to a sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use equihash_solver::{Block, Params, Solver, Submitter};
use tracing::{debug, info, warn};

use crate::{BlockHeader, Error, NonceSpace, Target};

/// Mining configuration that stays fixed for the lifetime of a [`Miner`].
#[derive(Clone, Debug)]
pub struct MinerConfig {
    pub params: Params,
    /// The nonce prefix assigned by the pool on subscription.
    pub nonce1: Vec<u8>,
    /// Abandon the current attempt as soon as a new job arrives.
    pub interrupt_on_new_job: bool,
    /// Slots per solver bucket; `None` sizes buckets from the parameters.
    pub bucket_capacity: Option<usize>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        MinerConfig {
            params: Params::zcash(),
            nonce1: vec![],
            interrupt_on_new_job: true,
            bucket_capacity: None,
        }
    }
}

/// Work assigned by the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    /// The header to solve; its nonce is replaced by the miner.
    pub header: BlockHeader,
}

/// A solution meeting the target, with every field hex-encoded as the pool expects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub job_id: String,
    /// The header time in its serialized byte order.
    pub time: String,
    pub nonce2: String,
    /// The compact length prefix followed by the packed solution.
    pub solution: String,
}

/// Receives shares from the miner.
pub trait ShareSink {
    fn submit_share(&mut self, share: Share);
}

impl ShareSink for Vec<Share> {
    fn submit_share(&mut self, share: Share) {
        self.push(share);
    }
}

/// Publishes new jobs to a running [`Miner`].
///
/// Clones share the same slot. Only the most recent unclaimed job is kept.
#[derive(Clone, Debug, Default)]
pub struct JobSignal {
    inner: Arc<JobSlot>,
}

#[derive(Debug, Default)]
struct JobSlot {
    pending: Mutex<Option<Job>>,
    raised: AtomicBool,
}

impl JobSignal {
    pub fn publish(&self, job: Job) {
        let mut pending = self.lock();
        *pending = Some(job);
        self.inner.raised.store(true, Ordering::Release);
    }

    /// Returns `true` if a job has been published and not yet claimed.
    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::Acquire)
    }

    fn take(&self) -> Option<Job> {
        let mut pending = self.lock();
        self.inner.raised.store(false, Ordering::Release);
        pending.take()
    }

    /// `raised` is only written with this lock held, so it tracks `pending` exactly.
    fn lock(&self) -> MutexGuard<'_, Option<Job>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Solutions produced by the solver, whether or not they met the target.
    pub found: u64,
    pub submitted: u64,
    /// Attempts abandoned because a new job arrived.
    pub interrupts: u64,
    pub jobs: u64,
    /// Attempts abandoned because a solver table overflowed.
    pub exhausted: u64,
}

/// How a single call to [`Miner::mine_once`] ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// No job has been received yet.
    NoJob,
    /// Every generation was processed for the nonce.
    Completed { solutions: usize },
    /// A new job arrived; the next attempt starts on it.
    Interrupted,
    /// A solver table overflowed; the nonce was skipped.
    Abandoned(equihash_solver::Error),
}

/// The solver hook: filters solutions by target and forwards shares.
struct Submission<'a, S> {
    job: &'a Job,
    nonce: &'a NonceSpace,
    target: &'a Target,
    signal: &'a JobSignal,
    interrupt: bool,
    sink: &'a mut S,
    stats: &'a mut Stats,
}

impl<S: ShareSink> Submitter for Submission<'_, S> {
    fn submit(&mut self, block: &Block, _: &[u32]) -> bool {
        self.stats.found += 1;
        if !self.target.is_met_by(block.as_bytes()) {
            debug!(job = %self.job.id, "solution above target");
            return false;
        }

        self.sink.submit_share(Share {
            job_id: self.job.id.clone(),
            time: hex::encode(self.job.header.time.to_le_bytes()),
            nonce2: hex::encode(self.nonce.nonce2()),
            solution: hex::encode(block.solution()),
        });
        self.stats.submitted += 1;
        info!(job = %self.job.id, "share submitted");

        self.interrupt && self.signal.is_raised()
    }
}

/// Repeatedly solves the current job, one nonce2 value per attempt.
pub struct Miner<S> {
    config: MinerConfig,
    solver: Solver,
    nonce: NonceSpace,
    job: Option<Job>,
    target: Target,
    signal: JobSignal,
    sink: S,
    stats: Stats,
}

impl<S: ShareSink> Miner<S> {
    pub fn new(config: MinerConfig, sink: S) -> Result<Self, Error> {
        let nonce = NonceSpace::new(&config.nonce1)?;
        info!(
            n = config.params.n(),
            k = config.params.k(),
            nonce1 = %hex::encode(&config.nonce1),
            "starting miner"
        );
        let solver = match config.bucket_capacity {
            Some(capacity) => Solver::with_bucket_capacity(config.params, capacity),
            None => Solver::new(config.params),
        };
        Ok(Miner {
            solver,
            config,
            nonce,
            job: None,
            target: Target::MAX,
            signal: JobSignal::default(),
            sink,
            stats: Stats::default(),
        })
    }

    /// A handle through which new jobs reach this miner.
    pub fn signal(&self) -> JobSignal {
        self.signal.clone()
    }

    pub fn set_target(&mut self, target: Target) {
        info!(%target, "new target");
        self.target = target;
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn nonce(&self) -> &NonceSpace {
        &self.nonce
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs one solve attempt on the current job and nonce.
    ///
    /// A pending job is picked up first, restarting nonce2 from zero. With
    /// [`MinerConfig::interrupt_on_new_job`] set, a job published during the attempt
    /// stops it between generations or right after a submitted share.
    pub fn mine_once(&mut self) -> Result<Attempt, Error> {
        if let Some(job) = self.signal.take() {
            info!(job = %job.id, "new job");
            self.stats.jobs += 1;
            self.job = Some(job);
            self.nonce.reset();
        }

        let Miner {
            config,
            solver,
            nonce,
            job,
            target,
            signal,
            sink,
            stats,
        } = self;
        let job = match job {
            Some(job) => job,
            None => return Ok(Attempt::NoJob),
        };

        let mut header = job.header.clone();
        header.nonce = *nonce.nonce();
        debug!(job = %job.id, nonce2 = %hex::encode(nonce.nonce2()), "solving");

        let mut submission = Submission {
            job,
            nonce,
            target,
            signal,
            interrupt: config.interrupt_on_new_job,
            sink,
            stats,
        };

        let mut result = solver.generate(&header.to_bytes());
        for generation in 1..=config.params.k() {
            if result.is_err() {
                break;
            }
            if config.interrupt_on_new_job && signal.is_raised() {
                submission.stats.interrupts += 1;
                debug!(generation, "interrupted by new job");
                return Ok(Attempt::Interrupted);
            }
            match solver.advance(generation, &mut submission) {
                Ok(flow) if flow.is_break() => {
                    submission.stats.interrupts += 1;
                    return Ok(Attempt::Interrupted);
                }
                Ok(_) => (),
                Err(e) => result = Err(e),
            }
        }

        let attempt = match result {
            Ok(()) => Attempt::Completed {
                solutions: solver.solutions(),
            },
            Err(e) if e.is_resource_exhaustion() => {
                warn!(error = %e, "abandoning nonce");
                submission.stats.exhausted += 1;
                Attempt::Abandoned(e)
            }
            Err(e) => return Err(e.into()),
        };
        nonce.increment()?;
        Ok(attempt)
    }
}
