//! A fixed workload for measuring solver throughput.

use std::time::{Duration, Instant};

use equihash_solver::{Block, Outcome, Params, Solver};
use tracing::{info, warn};

use crate::{BlockHeader, Error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchReport {
    pub iterations: u32,
    pub solutions: usize,
    /// Attempts abandoned because a solver table overflowed.
    pub exhausted: u32,
    pub elapsed: Duration,
}

impl BenchReport {
    pub fn solutions_per_second(&self) -> f64 {
        self.solutions as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

/// Solves `iterations` all-zero headers whose first four nonce bytes hold the
/// little-endian iteration counter.
pub fn benchmark(params: Params, iterations: u32) -> Result<BenchReport, Error> {
    let mut solver = Solver::new(params);
    let mut header = BlockHeader::default();
    let mut solutions = 0;
    let mut exhausted = 0;

    let start = Instant::now();
    for iteration in 0..iterations {
        header.nonce[..4].copy_from_slice(&iteration.to_le_bytes());
        match solver.solve(&header.to_bytes(), &mut |_: &Block, _: &[u32]| false) {
            Ok(Outcome::Exhausted { solutions: found } | Outcome::Stopped { solutions: found }) => {
                info!(iteration, solutions = found, "iteration finished");
                solutions += found;
            }
            Err(e) if e.is_resource_exhaustion() => {
                warn!(iteration, error = %e, "iteration abandoned");
                exhausted += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let report = BenchReport {
        iterations,
        solutions,
        exhausted,
        elapsed: start.elapsed(),
    };
    info!(
        solutions = report.solutions,
        seconds = report.elapsed.as_secs_f64(),
        "finished, {} total solutions",
        report.solutions
    );
    Ok(report)
}
