use std::fmt;

use jiff::civil::Date;

use crate::model::AssetKey;

/// Errors raised while validating simulator inputs
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The price table contained no assets
    NoAssets,
    ZeroSimulations,
    ZeroPeriods,
    /// The same asset appears more than once
    DuplicateAsset(AssetKey),
    /// A present asset has no weight in the supplied weights
    MissingWeight(AssetKey),
    /// The supplied weights name an asset that is not in the price table
    UnknownWeight(AssetKey),
    /// A weight is negative or non-finite
    InvalidWeight { asset: AssetKey, weight: f64 },
    WeightsDoNotSumToOne { sum: f64 },
    /// A historical price is non-finite or not strictly positive
    InvalidPrice {
        asset: AssetKey,
        period: Date,
        price: f64,
    },
    /// A caller-supplied periodic return is non-finite
    InvalidReturn {
        asset: AssetKey,
        period: Date,
        value: f64,
    },
    DuplicatePeriod { asset: AssetKey, period: Date },
    /// Estimated distribution parameters cannot drive a random walk
    InvalidParameters {
        asset: AssetKey,
        mean: f64,
        std_dev: f64,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NoAssets => write!(f, "price history contains no assets"),
            ConfigurationError::ZeroSimulations => {
                write!(f, "number of simulations must be at least 1")
            }
            ConfigurationError::ZeroPeriods => {
                write!(f, "number of projected periods must be at least 1")
            }
            ConfigurationError::DuplicateAsset(asset) => {
                write!(f, "asset {asset} appears more than once")
            }
            ConfigurationError::MissingWeight(asset) => {
                write!(f, "no portfolio weight given for asset {asset}")
            }
            ConfigurationError::UnknownWeight(asset) => {
                write!(f, "weight given for unknown asset {asset}")
            }
            ConfigurationError::InvalidWeight { asset, weight } => {
                write!(f, "invalid weight {weight} for asset {asset}")
            }
            ConfigurationError::WeightsDoNotSumToOne { sum } => {
                write!(f, "portfolio weights sum to {sum}, expected 1.0")
            }
            ConfigurationError::InvalidPrice {
                asset,
                period,
                price,
            } => write!(f, "invalid price {price} for asset {asset} at {period}"),
            ConfigurationError::InvalidReturn {
                asset,
                period,
                value,
            } => write!(f, "invalid periodic return {value} for asset {asset} at {period}"),
            ConfigurationError::DuplicatePeriod { asset, period } => {
                write!(f, "asset {asset} has more than one price for {period}")
            }
            ConfigurationError::InvalidParameters {
                asset,
                mean,
                std_dev,
            } => write!(
                f,
                "invalid return parameters for asset {asset} (mean={mean}, std_dev={std_dev})"
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// An asset has too few price observations to estimate a return distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientHistoryError {
    pub asset: AssetKey,
    pub observations: usize,
}

impl fmt::Display for InsufficientHistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "asset {} has {} price observation(s), at least 2 are required",
            self.asset, self.observations
        )
    }
}

impl std::error::Error for InsufficientHistoryError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Configuration(ConfigurationError),
    InsufficientHistory(InsufficientHistoryError),
    /// Monte Carlo simulation was cancelled by user request
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Configuration(e) => write!(f, "configuration error: {e}"),
            SimulationError::InsufficientHistory(e) => write!(f, "{e}"),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Configuration(e) => Some(e),
            SimulationError::InsufficientHistory(e) => Some(e),
            SimulationError::Cancelled => None,
        }
    }
}

impl From<ConfigurationError> for SimulationError {
    fn from(err: ConfigurationError) -> Self {
        SimulationError::Configuration(err)
    }
}

impl From<InsufficientHistoryError> for SimulationError {
    fn from(err: InsufficientHistoryError) -> Self {
        SimulationError::InsufficientHistory(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
