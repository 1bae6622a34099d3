//! Solver benchmark: repeatedly solves an all-zero header with a counting nonce.

use anyhow::Context;
use equihash_solver::Params;
use gumdrop::Options;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Options)]
struct BenchOptions {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "n", help = "Equihash n (default 200)")]
    n: Option<u32>,

    #[options(short = "k", help = "Equihash k (default 9)")]
    k: Option<u32>,

    #[options(no_short, help = "number of solve attempts (default 1)")]
    iterations: Option<u32>,

    #[options(no_short, help = "expected packed solution size in bytes")]
    solution_size: Option<usize>,
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() -> Result<(), anyhow::Error> {
    let opts = BenchOptions::parse_args_default_or_exit();
    init_tracing();

    let zcash = Params::zcash();
    let n = opts.n.unwrap_or(zcash.n());
    let k = opts.k.unwrap_or(zcash.k());
    let params = match opts.solution_size {
        Some(size) => Params::with_solution_size(n, k, size),
        None => Params::solver(n, k),
    }
    .with_context(|| format!("invalid Equihash parameters ({}, {})", n, k))?;

    let report = zcash_miner::benchmark(params, opts.iterations.unwrap_or(1))?;
    println!(
        "{} iterations, {} solutions in {:.2?} ({:.3} Sol/s)",
        report.iterations,
        report.solutions,
        report.elapsed,
        report.solutions_per_second()
    );
    Ok(())
}
