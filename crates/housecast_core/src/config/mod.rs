//! Simulation configuration
//!
//! `SimulationConfig` holds the run-shape knobs of a Monte Carlo projection.
//! The price history and portfolio weights are passed to the simulator
//! separately, since they are data rather than settings.
//!
//! # Builder DSL
//!
//! ```ignore
//! use housecast_core::config::SimulatorBuilder;
//!
//! let simulator = SimulatorBuilder::new()
//!     .asset("King County, WA", king_county_prices)
//!     .asset("Travis County, TX", travis_county_prices)
//!     .weight("King County, WA", 0.6)
//!     .weight("Travis County, TX", 0.4)
//!     .simulations(1_000)
//!     .years(10)
//!     .seed(42)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

pub mod builder;

pub use builder::SimulatorBuilder;

/// Simulated periods per year (monthly price series)
pub const PERIODS_PER_YEAR: usize = 12;

/// Default projection horizon in years
pub const DEFAULT_PROJECTION_YEARS: usize = 8;

fn default_num_simulations() -> usize {
    500
}

fn default_num_periods() -> usize {
    PERIODS_PER_YEAR * DEFAULT_PROJECTION_YEARS
}

/// Run-shape configuration for a Monte Carlo projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent runs
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,

    /// Number of future periods to project per run
    #[serde(default = "default_num_periods")]
    pub num_periods: usize,

    /// Master seed for reproducible runs. `None` draws a fresh seed per simulation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: default_num_simulations(),
            num_periods: default_num_periods(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    #[must_use]
    pub fn with_periods(mut self, num_periods: usize) -> Self {
        self.num_periods = num_periods;
        self
    }

    /// Project `years` years of monthly periods
    #[must_use]
    pub fn with_years(mut self, years: usize) -> Self {
        self.num_periods = years * PERIODS_PER_YEAR;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.num_simulations == 0 {
            return Err(ConfigurationError::ZeroSimulations);
        }
        if self.num_periods == 0 {
            return Err(ConfigurationError::ZeroPeriods);
        }
        Ok(())
    }
}
