//! Portfolio weights across simulated assets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

use super::ids::AssetKey;

/// Tolerance when checking that caller-supplied weights sum to one
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Mapping from asset to its share of the portfolio.
///
/// An empty mapping means "equal weighting across every asset present".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioWeights {
    weights: BTreeMap<AssetKey, f64>,
}

impl PortfolioWeights {
    /// Equal weighting across whatever assets the simulator is built with
    #[must_use]
    pub fn equal() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, asset: impl Into<AssetKey>, weight: f64) -> Self {
        self.set(asset, weight);
        self
    }

    pub fn set(&mut self, asset: impl Into<AssetKey>, weight: f64) {
        self.weights.insert(asset.into(), weight);
    }

    #[must_use]
    pub fn is_equal_weighting(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn get(&self, asset: &AssetKey) -> Option<f64> {
        self.weights.get(asset).copied()
    }

    /// Resolve weights against the asset set, in the order of `assets`.
    ///
    /// The returned weights are normalized so they sum to 1.0.
    pub fn resolve(&self, assets: &[AssetKey]) -> Result<Vec<f64>, ConfigurationError> {
        if assets.is_empty() {
            return Err(ConfigurationError::NoAssets);
        }

        if self.weights.is_empty() {
            let share = 1.0 / assets.len() as f64;
            return Ok(vec![share; assets.len()]);
        }

        if let Some(unknown) = self.weights.keys().find(|k| !assets.contains(k)) {
            return Err(ConfigurationError::UnknownWeight(unknown.clone()));
        }

        let mut resolved = Vec::with_capacity(assets.len());
        for asset in assets {
            let weight = self
                .get(asset)
                .ok_or_else(|| ConfigurationError::MissingWeight(asset.clone()))?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    asset: asset.clone(),
                    weight,
                });
            }
            resolved.push(weight);
        }

        let sum: f64 = resolved.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigurationError::WeightsDoNotSumToOne { sum });
        }

        for w in &mut resolved {
            *w /= sum;
        }
        Ok(resolved)
    }
}
