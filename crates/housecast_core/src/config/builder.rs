//! Simulator Builder
//!
//! Fluent API for assembling a price history, portfolio weights and run
//! configuration into a [`MonteCarloSimulator`].
//!
//! # Example
//!
//! ```ignore
//! use housecast_core::config::SimulatorBuilder;
//!
//! let mut simulator = SimulatorBuilder::new()
//!     .asset("Maricopa County, AZ", [
//!         (jiff::civil::date(2023, 1, 31), 412_000.0),
//!         (jiff::civil::date(2023, 2, 28), 415_500.0),
//!         (jiff::civil::date(2023, 3, 31), 419_250.0),
//!     ])
//!     .simulations(1_000)
//!     .years(5)
//!     .build()?;
//!
//! let summary = simulator.summarize();
//! ```

use jiff::civil::Date;

use super::SimulationConfig;
use crate::error::{ConfigurationError, SimulationError};
use crate::model::{AssetKey, PortfolioWeights, PriceHistory, PriceRecord};
use crate::simulator::MonteCarloSimulator;

/// Builder for [`MonteCarloSimulator`].
///
/// Input errors are remembered and reported by [`build`](Self::build), so the
/// chain never has to be broken up to handle them.
#[derive(Debug, Clone, Default)]
pub struct SimulatorBuilder {
    history: PriceHistory,
    weights: PortfolioWeights,
    config: SimulationConfig,
    error: Option<ConfigurationError>,
}

impl SimulatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Price History
    // =========================================================================

    /// Add (period, price) observations for an asset
    #[must_use]
    pub fn asset<I>(mut self, asset: impl Into<AssetKey>, prices: I) -> Self
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        let asset = asset.into();
        for (period, price) in prices {
            self = self.record(PriceRecord::new(asset.clone(), period, price));
        }
        self
    }

    /// Add one row of the input table
    #[must_use]
    pub fn record(mut self, record: PriceRecord) -> Self {
        if self.error.is_none()
            && let Err(e) = self.history.insert(record)
        {
            self.error = Some(e);
        }
        self
    }

    /// Replace the whole price history
    #[must_use]
    pub fn history(mut self, history: PriceHistory) -> Self {
        self.history = history;
        self
    }

    // =========================================================================
    // Weights
    // =========================================================================

    /// Set one asset's weight. Once any weight is set, every asset needs one.
    #[must_use]
    pub fn weight(mut self, asset: impl Into<AssetKey>, weight: f64) -> Self {
        self.weights.set(asset, weight);
        self
    }

    #[must_use]
    pub fn weights(mut self, weights: PortfolioWeights) -> Self {
        self.weights = weights;
        self
    }

    // =========================================================================
    // Run Configuration
    // =========================================================================

    #[must_use]
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn simulations(mut self, num_simulations: usize) -> Self {
        self.config.num_simulations = num_simulations;
        self
    }

    #[must_use]
    pub fn periods(mut self, num_periods: usize) -> Self {
        self.config.num_periods = num_periods;
        self
    }

    /// Project `years` years of monthly periods
    #[must_use]
    pub fn years(mut self, years: usize) -> Self {
        self.config = self.config.with_years(years);
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<MonteCarloSimulator, SimulationError> {
        if let Some(e) = self.error {
            return Err(e.into());
        }
        MonteCarloSimulator::with_weights(&self.history, &self.weights, self.config)
    }
}
