//! Return-distribution parameters estimated from price history

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InsufficientHistoryError, SimulationError};

use super::history::AssetSeries;
use super::ids::AssetKey;

/// Parameters of one asset's random walk.
///
/// Each simulated period draws a return from `Normal(mean, std_dev)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterFields", into = "ParameterFields")]
pub struct ReturnParameters {
    pub asset: AssetKey,
    /// Most recent historical price, the starting point of every path
    pub last_price: f64,
    distribution: Normal<f64>,
}

/// Flat serialized form of [`ReturnParameters`]
#[derive(Serialize, Deserialize)]
struct ParameterFields {
    asset: AssetKey,
    last_price: f64,
    mean: f64,
    std_dev: f64,
}

impl TryFrom<ParameterFields> for ReturnParameters {
    type Error = ConfigurationError;

    fn try_from(fields: ParameterFields) -> Result<Self, Self::Error> {
        Self::new(fields.asset, fields.last_price, fields.mean, fields.std_dev)
    }
}

impl From<ReturnParameters> for ParameterFields {
    fn from(params: ReturnParameters) -> Self {
        Self {
            mean: params.mean(),
            std_dev: params.std_dev(),
            asset: params.asset,
            last_price: params.last_price,
        }
    }
}

impl ReturnParameters {
    pub fn new(
        asset: impl Into<AssetKey>,
        last_price: f64,
        mean: f64,
        std_dev: f64,
    ) -> Result<Self, ConfigurationError> {
        let asset = asset.into();
        let distribution = Normal::new(mean, std_dev)
            .ok()
            .filter(|_| last_price.is_finite() && mean.is_finite() && std_dev.is_finite());
        match distribution {
            Some(distribution) => Ok(Self {
                asset,
                last_price,
                distribution,
            }),
            None => Err(ConfigurationError::InvalidParameters {
                asset,
                mean,
                std_dev,
            }),
        }
    }

    /// Estimate parameters from an asset's history.
    ///
    /// Periods without a defined return are excluded from the statistics.
    pub fn estimate(series: &AssetSeries) -> Result<Self, SimulationError> {
        if series.len() < 2 {
            return Err(InsufficientHistoryError {
                asset: series.asset().clone(),
                observations: series.len(),
            }
            .into());
        }

        let returns = series.defined_returns();
        let last_price = series.last_price().ok_or_else(|| InsufficientHistoryError {
            asset: series.asset().clone(),
            observations: 0,
        })?;

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

        Ok(Self::new(
            series.asset().clone(),
            last_price,
            mean,
            variance.sqrt(),
        )?)
    }

    /// Mean periodic return
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.distribution.mean()
    }

    /// Population standard deviation of historical returns
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.distribution.std_dev()
    }

    /// Draw one periodic return. A zero `std_dev` yields exactly `mean`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.distribution.sample(rng)
    }
}
