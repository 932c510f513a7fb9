//! Historical price series supplied by the data-loading layer
//!
//! The input table is keyed by (asset, period). Rows are grouped per asset into
//! an [`AssetSeries`] kept sorted by period, so callers may hand rows over in
//! any order.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

use super::ids::AssetKey;

/// Percent change between two consecutive prices
#[must_use]
#[inline]
pub fn pct_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous
}

/// One row of the input table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub asset: AssetKey,
    pub period: Date,
    pub price: f64,
    /// Precomputed return for this period, if the loader already has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodic_return: Option<f64>,
}

impl PriceRecord {
    #[must_use]
    pub fn new(asset: impl Into<AssetKey>, period: Date, price: f64) -> Self {
        Self {
            asset: asset.into(),
            period,
            price,
            periodic_return: None,
        }
    }

    #[must_use]
    pub fn with_return(mut self, periodic_return: f64) -> Self {
        self.periodic_return = Some(periodic_return);
        self
    }
}

/// A single observation within an asset's series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub period: Date,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodic_return: Option<f64>,
}

/// Ordered price observations for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSeries {
    asset: AssetKey,
    points: Vec<PricePoint>,
}

impl AssetSeries {
    #[must_use]
    pub fn new(asset: impl Into<AssetKey>) -> Self {
        Self {
            asset: asset.into(),
            points: Vec::new(),
        }
    }

    /// Build a series from (period, price) pairs.
    pub fn from_prices<I>(asset: impl Into<AssetKey>, prices: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        let mut series = Self::new(asset);
        for (period, price) in prices {
            series.push(PricePoint {
                period,
                price,
                periodic_return: None,
            })?;
        }
        Ok(series)
    }

    /// Insert an observation, keeping the series sorted by period.
    pub fn push(&mut self, point: PricePoint) -> Result<(), ConfigurationError> {
        if !point.price.is_finite() || point.price <= 0.0 {
            return Err(ConfigurationError::InvalidPrice {
                asset: self.asset.clone(),
                period: point.period,
                price: point.price,
            });
        }
        if let Some(value) = point.periodic_return
            && !value.is_finite()
        {
            return Err(ConfigurationError::InvalidReturn {
                asset: self.asset.clone(),
                period: point.period,
                value,
            });
        }

        match self
            .points
            .binary_search_by(|p| p.period.cmp(&point.period))
        {
            Ok(_) => Err(ConfigurationError::DuplicatePeriod {
                asset: self.asset.clone(),
                period: point.period,
            }),
            Err(idx) => {
                self.points.insert(idx, point);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn asset(&self) -> &AssetKey {
        &self.asset
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price at the most recent period
    #[must_use]
    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    /// Periodic return for every observation.
    ///
    /// The first observation has no prior price, so its return is always
    /// `None`, even when one was supplied. Later supplied returns win over
    /// the derived ones.
    #[must_use]
    pub fn periodic_returns(&self) -> Vec<Option<f64>> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let prev = i.checked_sub(1)?;
                Some(
                    point
                        .periodic_return
                        .unwrap_or_else(|| pct_change(self.points[prev].price, point.price)),
                )
            })
            .collect()
    }

    /// Only the defined periodic returns, in period order
    #[must_use]
    pub fn defined_returns(&self) -> Vec<f64> {
        self.periodic_returns().into_iter().flatten().collect()
    }
}

/// Input price table grouped by asset.
///
/// Assets are kept ordered by key so seeded simulations do not depend on the
/// order rows were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    series: BTreeMap<AssetKey, AssetSeries>,
}

impl PriceHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = PriceRecord>,
    {
        let mut history = Self::new();
        for record in records {
            history.insert(record)?;
        }
        Ok(history)
    }

    pub fn insert(&mut self, record: PriceRecord) -> Result<(), ConfigurationError> {
        let PriceRecord {
            asset,
            period,
            price,
            periodic_return,
        } = record;
        self.series
            .entry(asset.clone())
            .or_insert_with(|| AssetSeries::new(asset))
            .push(PricePoint {
                period,
                price,
                periodic_return,
            })
    }

    /// Add a whole series, replacing any existing series for the same asset.
    pub fn insert_series(&mut self, series: AssetSeries) {
        self.series.insert(series.asset().clone(), series);
    }

    #[must_use]
    pub fn get(&self, asset: &AssetKey) -> Option<&AssetSeries> {
        self.series.get(asset)
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetKey> {
        self.series.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetSeries> {
        self.series.values()
    }

    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<AssetSeries> for PriceHistory {
    fn from_iter<T: IntoIterator<Item = AssetSeries>>(iter: T) -> Self {
        let mut history = Self::new();
        for series in iter {
            history.insert_series(series);
        }
        history
    }
}
