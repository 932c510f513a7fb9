//! Scenario files
//!
//! A scenario describes one projection as YAML:
//!
//! ```yaml
//! simulation:
//!   num_simulations: 1000
//!   num_periods: 60
//!   seed: 42
//! weights:
//!   "King County, WA": 0.6
//!   "Travis County, TX": 0.4
//! assets:
//!   - name: "King County, WA"
//!     prices:
//!       - { period: "2023-01-31", price: 812000.0 }
//!       - { period: "2023-02-28", price: 806500.0 }
//!   - name: "Travis County, TX"
//!     prices:
//!       - { period: "2023-01-31", price: 521000.0, return: -0.004 }
//! ```
//!
//! `simulation` and `weights` are optional; omitted weights mean equal weighting.

use std::fs;
use std::path::Path;

use housecast_core::model::{AssetSeries, PortfolioWeights, PriceHistory, PricePoint};
use housecast_core::{ConfigurationError, MonteCarloSimulator, SimulationConfig, SimulationError};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ScenarioError {
    Io(String),
    Parse(String),
    Simulation(SimulationError),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(msg) => write!(f, "IO error: {msg}"),
            ScenarioError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ScenarioError::Simulation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Simulation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SimulationError> for ScenarioError {
    fn from(err: SimulationError) -> Self {
        ScenarioError::Simulation(err)
    }
}

impl From<ConfigurationError> for ScenarioError {
    fn from(err: ConfigurationError) -> Self {
        ScenarioError::Simulation(err.into())
    }
}

/// One observation of an asset's price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub period: Date,
    pub price: f64,
    /// Precomputed periodic return, used instead of the one derived from prices
    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub periodic_return: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetData {
    pub name: String,
    pub prices: Vec<PriceData>,
}

impl AssetData {
    fn to_series(&self) -> Result<AssetSeries, ConfigurationError> {
        let mut series = AssetSeries::new(self.name.as_str());
        for p in &self.prices {
            series.push(PricePoint {
                period: p.period,
                price: p.price,
                periodic_return: p.periodic_return,
            })?;
        }
        Ok(series)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default, skip_serializing_if = "PortfolioWeights::is_equal_weighting")]
    pub weights: PortfolioWeights,
    #[serde(default)]
    pub assets: Vec<AssetData>,
}

impl Scenario {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScenarioError::Io(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content).map_err(|e| {
            ScenarioError::Parse(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Validated price table. An asset listed twice is rejected.
    pub fn history(&self) -> Result<PriceHistory, ConfigurationError> {
        let mut history = PriceHistory::new();
        for asset in &self.assets {
            if history.get(&asset.name.as_str().into()).is_some() {
                return Err(ConfigurationError::DuplicateAsset(asset.name.as_str().into()));
            }
            history.insert_series(asset.to_series()?);
        }
        Ok(history)
    }

    /// Build a simulator using `config` in place of the scenario's own settings
    pub fn simulator(&self, config: SimulationConfig) -> Result<MonteCarloSimulator, ScenarioError> {
        let history = self.history()?;
        Ok(MonteCarloSimulator::with_weights(
            &history,
            &self.weights,
            config,
        )?)
    }
}

/// Command-line settings that take precedence over the scenario file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub simulations: Option<usize>,
    pub periods: Option<usize>,
    pub years: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(n) = self.simulations {
            config = config.with_simulations(n);
        }
        if let Some(years) = self.years {
            config = config.with_years(years);
        }
        if let Some(periods) = self.periods {
            config = config.with_periods(periods);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}
