//! Monte Carlo portfolio simulator
//!
//! The simulator owns its inputs and its cached result. Return parameters are
//! estimated once at construction; the result matrix is computed on first use
//! and reused until the simulation is rerun or reconfigured.

use crate::config::SimulationConfig;
use crate::error::{ConfigurationError, SimulationError};
use crate::model::{
    AssetKey, ConfidenceInterval, MonteCarloProgress, PortfolioWeights, PriceHistory,
    ReturnParameters, SimulationResult, SimulationState, SummaryStatistics,
};
use crate::simulation::{monte_carlo_simulate, monte_carlo_simulate_with_progress};

#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    parameters: Vec<ReturnParameters>,
    /// Effective weights, aligned with `parameters`
    weights: Vec<f64>,
    config: SimulationConfig,
    cached: Option<SimulationResult>,
}

impl MonteCarloSimulator {
    /// Build an equally weighted simulator from a price history.
    pub fn new(history: &PriceHistory, config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_weights(history, &PortfolioWeights::equal(), config)
    }

    /// Build a simulator from a price history and explicit portfolio weights.
    pub fn with_weights(
        history: &PriceHistory,
        weights: &PortfolioWeights,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        if history.is_empty() {
            return Err(ConfigurationError::NoAssets.into());
        }

        let parameters = history
            .iter()
            .map(ReturnParameters::estimate)
            .collect::<Result<Vec<_>, _>>()?;

        for p in &parameters {
            tracing::debug!(
                asset = %p.asset,
                last_price = p.last_price,
                mean = p.mean(),
                std_dev = p.std_dev(),
                "estimated return parameters"
            );
        }

        Self::from_parameters(parameters, weights, config)
    }

    /// Build a simulator from already estimated parameters.
    pub fn from_parameters(
        parameters: Vec<ReturnParameters>,
        weights: &PortfolioWeights,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        if parameters.is_empty() {
            return Err(ConfigurationError::NoAssets.into());
        }

        let assets: Vec<AssetKey> = parameters.iter().map(|p| p.asset.clone()).collect();
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(ConfigurationError::DuplicateAsset(asset.clone()).into());
            }
        }

        let weights = weights.resolve(&assets)?;

        Ok(Self {
            parameters,
            weights,
            config,
            cached: None,
        })
    }

    /// Run the simulation unless a cached result exists, and return the matrix.
    pub fn run_simulation(&mut self) -> &SimulationResult {
        self.cached.get_or_insert_with(|| {
            monte_carlo_simulate(&self.parameters, &self.weights, &self.config)
        })
    }

    /// Like [`run_simulation`](Self::run_simulation), reporting progress and
    /// honoring cancellation. A cancelled run leaves the cache empty.
    pub fn run_simulation_with_progress(
        &mut self,
        progress: &MonteCarloProgress,
    ) -> Result<&SimulationResult, SimulationError> {
        let result = match self.cached.take() {
            Some(result) => result,
            None => monte_carlo_simulate_with_progress(
                &self.parameters,
                &self.weights,
                &self.config,
                progress,
            )?,
        };
        Ok(&*self.cached.insert(result))
    }

    /// Discard any cached result and simulate again.
    pub fn rerun_simulation(&mut self) -> &SimulationResult {
        self.cached = None;
        self.run_simulation()
    }

    /// Summary statistics of final cumulative returns, simulating first if needed.
    pub fn summarize(&mut self) -> SummaryStatistics {
        self.run_simulation().summary()
    }

    /// 95% confidence interval of final cumulative returns, simulating first if needed.
    pub fn confidence_interval(&mut self) -> ConfidenceInterval {
        self.run_simulation().confidence_interval()
    }

    /// Replace the configuration. Any cached result is discarded.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), ConfigurationError> {
        config.validate()?;
        self.config = config;
        self.cached = None;
        Ok(())
    }

    #[must_use]
    pub fn result(&self) -> Option<&SimulationResult> {
        self.cached.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> SimulationState<'_> {
        self.cached.as_ref().into()
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn parameters(&self) -> &[ReturnParameters] {
        &self.parameters
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetKey> {
        self.parameters.iter().map(|p| &p.asset)
    }

    /// Effective weights, in asset order
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Effective weights as an asset-keyed map
    #[must_use]
    pub fn portfolio_weights(&self) -> PortfolioWeights {
        self.assets()
            .zip(&self.weights)
            .fold(PortfolioWeights::equal(), |acc, (asset, w)| {
                acc.with(asset.clone(), *w)
            })
    }
}
