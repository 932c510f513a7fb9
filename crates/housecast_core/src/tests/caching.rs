//! Tests for result caching
//!
//! These tests verify that:
//! - `run_simulation` memoizes its result
//! - `summarize` is idempotent and simulates on demand
//! - Rerunning and reconfiguring replace the cached result
//! - Cancelled runs leave nothing cached

use crate::config::SimulationConfig;
use crate::error::{ConfigurationError, SimulationError};
use crate::model::{MonteCarloProgress, SimulationState};
use crate::simulator::MonteCarloSimulator;

use super::fixtures::county_history;

fn unseeded() -> MonteCarloSimulator {
    let config = SimulationConfig::new().with_simulations(50).with_periods(12);
    MonteCarloSimulator::new(&county_history(), config).unwrap()
}

#[test]
fn test_run_simulation_is_memoized() {
    let mut simulator = unseeded();
    assert!(!simulator.state().is_computed());

    let first = simulator.run_simulation().clone();
    assert!(simulator.state().is_computed());

    // Without a configured seed a recomputation would draw a new master seed
    let second = simulator.run_simulation();
    assert_eq!(&first, second);
}

#[test]
fn test_state_borrows_cached_result() {
    let mut simulator = unseeded();
    assert_eq!(simulator.state(), SimulationState::NotComputed);

    let seed = simulator.run_simulation().seed;
    match simulator.state() {
        SimulationState::Computed(result) => {
            assert_eq!(result.seed, seed);
            assert_eq!(Some(result), simulator.result());
        }
        SimulationState::NotComputed => panic!("expected a cached result"),
    }

    simulator.rerun_simulation();
    assert!(simulator.state().is_computed());
}

#[test]
fn test_summarize_runs_simulation_on_demand() {
    let mut simulator = unseeded();
    assert!(simulator.result().is_none());

    let summary = simulator.summarize();
    assert!(simulator.result().is_some());
    assert_eq!(summary.count, 50);
}

#[test]
fn test_summarize_is_bit_identical() {
    let mut simulator = unseeded();

    let first = simulator.summarize();
    let second = simulator.summarize();

    for ((k1, v1), (k2, v2)) in first.entries().into_iter().zip(second.entries()) {
        assert_eq!(k1, k2);
        assert_eq!(v1.to_bits(), v2.to_bits(), "{k1} changed between calls");
    }
}

#[test]
fn test_rerun_replaces_result() {
    let mut simulator = unseeded();
    let first = simulator.run_simulation().clone();
    let second = simulator.rerun_simulation().clone();

    assert_ne!(first.seed, second.seed);
    assert_eq!(simulator.result(), Some(&second));
}

#[test]
fn test_set_config_invalidates_cache() {
    let mut simulator = unseeded();
    simulator.run_simulation();

    simulator
        .set_config(SimulationConfig::new().with_simulations(5).with_periods(3))
        .unwrap();
    assert!(simulator.result().is_none());
    assert_eq!(simulator.run_simulation().num_runs(), 5);

    let err = simulator
        .set_config(SimulationConfig::new().with_simulations(0))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroSimulations);
    // A rejected config keeps the previous one and its result
    assert_eq!(simulator.config().num_simulations, 5);
    assert!(simulator.result().is_some());
}

#[test]
fn test_cancelled_run_caches_nothing() {
    let mut simulator = unseeded();
    let progress = MonteCarloProgress::new();
    progress.cancel();

    let err = simulator.run_simulation_with_progress(&progress).unwrap_err();
    assert_eq!(err, SimulationError::Cancelled);
    assert!(simulator.result().is_none());

    progress.reset();
    let result = simulator.run_simulation_with_progress(&progress).unwrap();
    assert_eq!(result.num_runs(), 50);
    assert_eq!(progress.completed(), 50);
}

#[test]
fn test_progress_run_reuses_cached_result() {
    let mut simulator = unseeded();
    let cached = simulator.run_simulation().clone();

    let progress = MonteCarloProgress::new();
    let result = simulator.run_simulation_with_progress(&progress).unwrap();
    assert_eq!(result, &cached);
    assert_eq!(progress.completed(), 0);
}
