//! Hand-checked projection scenarios
//!
//! These tests verify that:
//! - Flat history projects a flat portfolio
//! - A zero-variance walk compounds its mean exactly
//! - Weighted blending mixes simple returns of each asset

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{SimulationConfig, SimulatorBuilder};
use crate::model::{PortfolioWeights, PriceHistory, PriceRecord, ReturnParameters};
use crate::simulation::generate_price_path;
use crate::simulator::MonteCarloSimulator;

use super::fixtures::{flat_series, history, month};

/// Two assets with five years of flat history, N=1, T=3
#[test]
fn test_flat_two_asset_portfolio() {
    let history = history(vec![
        flat_series("Maricopa County, AZ", 420_000.0, 5),
        flat_series("Clark County, NV", 385_000.0, 5),
    ]);
    let weights = PortfolioWeights::equal()
        .with("Maricopa County, AZ", 0.5)
        .with("Clark County, NV", 0.5);
    let config = SimulationConfig::new().with_simulations(1).with_periods(3);

    let mut simulator = MonteCarloSimulator::with_weights(&history, &weights, config).unwrap();
    for p in simulator.parameters() {
        assert_eq!(p.mean(), 0.0);
        assert_eq!(p.std_dev(), 0.0);
    }

    let result = simulator.run_simulation();
    assert_eq!(result.num_runs(), 1);
    assert_eq!(result.run(0), Some(&[1.0, 1.0, 1.0, 1.0][..]));
}

/// Single asset, last price 100, mean return 1%, zero deviation, N=1, T=2
#[test]
fn test_zero_variance_single_asset() {
    // The second record's supplied return pins the mean at exactly 1%; the
    // first period never contributes a return.
    let history = PriceHistory::from_records([
        PriceRecord::new("A", month(0), 100.0),
        PriceRecord::new("A", month(1), 100.0).with_return(0.01),
    ])
    .unwrap();

    let mut simulator = SimulatorBuilder::new()
        .history(history)
        .simulations(1)
        .periods(2)
        .build()
        .unwrap();

    let params = simulator.parameters()[0].clone();
    assert_eq!(params.last_price, 100.0);
    assert_eq!(params.mean(), 0.01);
    assert_eq!(params.std_dev(), 0.0);

    let mut rng = SmallRng::seed_from_u64(0);
    let prices = generate_price_path(params.last_price, &params, 2, &mut rng);
    assert_eq!(prices.len(), 3);
    assert_eq!(prices[0], 100.0);
    assert!((prices[1] - 101.0).abs() < 1e-9);
    assert!((prices[2] - 102.01).abs() < 1e-9);

    // Each step's percent change reproduces the mean, so the portfolio
    // compounds at 1% per period.
    let cumulative = simulator.run_simulation().run(0).unwrap().to_vec();
    assert_eq!(cumulative.len(), 3);
    assert_eq!(cumulative[0], 1.0);
    assert!((cumulative[1] - 1.01).abs() < 1e-12);
    assert!((cumulative[2] - 1.0201).abs() < 1e-12);
}

/// Two deterministic assets blended 75/25
#[test]
fn test_weighted_blend_of_deterministic_assets() {
    let params = vec![
        ReturnParameters::new("Growth", 100.0, 0.02, 0.0).unwrap(),
        ReturnParameters::new("Decline", 100.0, -0.01, 0.0).unwrap(),
    ];
    let weights = PortfolioWeights::equal()
        .with("Growth", 0.75)
        .with("Decline", 0.25);
    let config = SimulationConfig::new()
        .with_simulations(3)
        .with_periods(4)
        .with_seed(11);

    let mut simulator = MonteCarloSimulator::from_parameters(params, &weights, config).unwrap();
    let result = simulator.run_simulation();

    // blended period return = 0.75 * 0.02 + 0.25 * -0.01 = 0.0125
    let expected: Vec<f64> = (0..=4).map(|i| 1.0125_f64.powi(i)).collect();
    for run in &result.runs {
        for (actual, expected) in run.iter().zip(&expected) {
            assert!((actual - expected).abs() < 1e-12);
        }
    }

    let summary = simulator.summarize();
    assert_eq!(summary.count, 3);
    assert!(summary.std.abs() < 1e-12);
    assert!((summary.ci_lower - summary.ci_upper).abs() < 1e-12);
}
