//! Monte Carlo random-walk simulation
//!
//! A run is built from two composable steps:
//! 1. [`generate_price_path`] walks one asset forward from its last known price
//! 2. [`blend_cumulative_returns`] reduces the per-asset paths to a single
//!    portfolio cumulative-return series
//!
//! Runs are independent. Every run gets its own seed derived from the master
//! seed, and every asset within a run draws from its own generator, so seeded
//! results are identical whether runs execute sequentially or on rayon's pool.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::model::{MonteCarloProgress, ReturnParameters, SimulationResult, pct_change};

/// How often (in runs) progress is traced
const TRACE_INTERVAL: usize = 50;

/// Simulate one asset's price path.
///
/// Returns `horizon + 1` prices starting at `start_price`, each the previous one
/// times `1 + draw`. Prices are not clamped, so pathological parameters may walk
/// through zero.
pub fn generate_price_path<R: Rng + ?Sized>(
    start_price: f64,
    params: &ReturnParameters,
    horizon: usize,
    rng: &mut R,
) -> Vec<f64> {
    let mut path = Vec::with_capacity(horizon + 1);
    path.push(start_price);

    let mut price = start_price;
    for _ in 0..horizon {
        price *= 1.0 + params.sample(rng);
        path.push(price);
    }
    path
}

/// Blend per-asset price paths into one portfolio cumulative-return series.
///
/// Each period's portfolio return is the weighted sum of the assets' simple
/// percent changes; the first period has no prior price and counts as zero, so
/// the series always starts at 1.0.
pub fn blend_cumulative_returns(paths: &[Vec<f64>], weights: &[f64]) -> Vec<f64> {
    let rows = paths.first().map_or(0, Vec::len);
    let mut portfolio_returns = vec![0.0; rows];

    for (path, weight) in paths.iter().zip(weights) {
        for (i, pair) in path.windows(2).take(rows.saturating_sub(1)).enumerate() {
            portfolio_returns[i + 1] += weight * pct_change(pair[0], pair[1]);
        }
    }

    let mut cumulative = 1.0;
    portfolio_returns
        .into_iter()
        .map(|r| {
            cumulative *= 1.0 + r;
            cumulative
        })
        .collect()
}

/// Run one complete trajectory for every asset and reduce it to the portfolio.
///
/// Each asset's generator is seeded from the run's stream, so no generator is
/// shared across assets.
pub fn simulate_run(
    parameters: &[ReturnParameters],
    weights: &[f64],
    horizon: usize,
    seed: u64,
) -> Vec<f64> {
    let mut run_rng = SmallRng::seed_from_u64(seed);

    let paths: Vec<Vec<f64>> = parameters
        .iter()
        .map(|params| {
            let mut asset_rng = SmallRng::from_rng(&mut run_rng);
            generate_price_path(params.last_price, params, horizon, &mut asset_rng)
        })
        .collect();

    blend_cumulative_returns(&paths, weights)
}

/// Derive one seed per run from a master seed
#[must_use]
pub fn derive_run_seeds(master_seed: u64, num_runs: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(master_seed);
    (0..num_runs).map(|_| rng.next_u64()).collect()
}

/// Run the full Monte Carlo simulation.
pub fn monte_carlo_simulate(
    parameters: &[ReturnParameters],
    weights: &[f64],
    config: &SimulationConfig,
) -> SimulationResult {
    let master_seed = config.seed.unwrap_or_else(rand::random);
    let runs = run_all(parameters, config, master_seed, |index, seed| {
        trace_run(index);
        simulate_run(parameters, weights, config.num_periods, seed)
    });
    finish(master_seed, runs)
}

/// Run the full Monte Carlo simulation with progress reporting.
///
/// Returns [`SimulationError::Cancelled`] if `progress` is cancelled before all
/// runs complete; no partial result is produced.
pub fn monte_carlo_simulate_with_progress(
    parameters: &[ReturnParameters],
    weights: &[f64],
    config: &SimulationConfig,
    progress: &MonteCarloProgress,
) -> Result<SimulationResult, SimulationError> {
    let master_seed = config.seed.unwrap_or_else(rand::random);
    let runs = run_all(parameters, config, master_seed, |index, seed| {
        if progress.is_cancelled() {
            return None;
        }
        trace_run(index);
        let run = simulate_run(parameters, weights, config.num_periods, seed);
        progress.increment();
        Some(run)
    });
    let runs = runs
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(SimulationError::Cancelled)?;
    Ok(finish(master_seed, runs))
}

fn trace_run(index: usize) {
    if index % TRACE_INTERVAL == 0 {
        tracing::trace!(run = index, "running Monte Carlo simulation");
    }
}

fn finish(seed: u64, runs: Vec<Vec<f64>>) -> SimulationResult {
    tracing::debug!(seed, runs = runs.len(), "Monte Carlo simulation complete");
    SimulationResult { seed, runs }
}

/// Apply `run_one` to every (run index, run seed), keeping run order.
fn run_all<T, F>(
    parameters: &[ReturnParameters],
    config: &SimulationConfig,
    master_seed: u64,
    run_one: F,
) -> Vec<T>
where
    T: Send,
    F: Fn(usize, u64) -> T + Sync + Send,
{
    let seeds = derive_run_seeds(master_seed, config.num_simulations);

    tracing::debug!(
        master_seed,
        runs = config.num_simulations,
        periods = config.num_periods,
        assets = parameters.len(),
        "starting Monte Carlo simulation"
    );

    #[cfg(feature = "parallel")]
    let runs = seeds
        .into_par_iter()
        .enumerate()
        .map(|(index, seed)| run_one(index, seed))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let runs = seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| run_one(index, seed))
        .collect();

    runs
}
