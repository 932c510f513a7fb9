//! Simulation results and derived statistics
//!
//! The result matrix stores one cumulative-return sequence per run. Rows are
//! period indices (0..=T, row 0 always 1.0) and columns are runs.

use serde::{Deserialize, Serialize};

use crate::statistics::{describe, quantile_sorted, sorted_copy};

/// Lower quantile of the 95% confidence interval
pub const CI_LOWER_QUANTILE: f64 = 0.025;
/// Upper quantile of the 95% confidence interval
pub const CI_UPPER_QUANTILE: f64 = 0.975;

/// Keys of [`SummaryStatistics::entries`], in order
pub const SUMMARY_KEYS: [&str; 10] = [
    "count",
    "mean",
    "std",
    "min",
    "25%",
    "50%",
    "75%",
    "max",
    "95% CI Lower",
    "95% CI Upper",
];

/// Cumulative-return trajectories from every Monte Carlo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Master seed the run seeds were derived from
    pub seed: u64,
    /// `runs[run][period]`
    pub runs: Vec<Vec<f64>>,
}

impl SimulationResult {
    #[must_use]
    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    /// Number of rows (projected periods + 1)
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.runs.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn run(&self, index: usize) -> Option<&[f64]> {
        self.runs.get(index).map(Vec::as_slice)
    }

    /// Every run's value at one period
    #[must_use]
    pub fn row(&self, period: usize) -> Option<Vec<f64>> {
        if period >= self.num_periods() {
            return None;
        }
        Some(self.runs.iter().map(|run| run[period]).collect())
    }

    /// Final-period cumulative return of every run
    #[must_use]
    pub fn final_values(&self) -> Vec<f64> {
        self.runs
            .iter()
            .filter_map(|run| run.last().copied())
            .collect()
    }

    /// The matrix in row-major form: `rows[period][run]`
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.num_periods())
            .map(|p| self.runs.iter().map(|run| run[p]).collect())
            .collect()
    }

    /// Per-period quantile across runs (e.g. 0.5 for the median trajectory)
    #[must_use]
    pub fn percentile_path(&self, q: f64) -> Vec<f64> {
        (0..self.num_periods())
            .map(|p| {
                let column: Vec<f64> = self.runs.iter().map(|run| run[p]).collect();
                quantile_sorted(&sorted_copy(&column), q)
            })
            .collect()
    }

    #[must_use]
    pub fn confidence_interval(&self) -> ConfidenceInterval {
        ConfidenceInterval::from_values(&self.final_values())
    }

    #[must_use]
    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics::from_values(&self.final_values())
    }
}

/// 95% confidence interval of final cumulative returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let sorted = sorted_copy(values);
        Self {
            lower: quantile_sorted(&sorted, CI_LOWER_QUANTILE),
            upper: quantile_sorted(&sorted, CI_UPPER_QUANTILE),
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Descriptive statistics of the final-period distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
    #[serde(rename = "95% CI Lower")]
    pub ci_lower: f64,
    #[serde(rename = "95% CI Upper")]
    pub ci_upper: f64,
}

impl SummaryStatistics {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let stats = describe(values);
        let ci = ConfidenceInterval::from_values(values);
        Self {
            count: stats.count,
            mean: stats.mean,
            std: stats.std,
            min: stats.min,
            p25: stats.p25,
            p50: stats.p50,
            p75: stats.p75,
            max: stats.max,
            ci_lower: ci.lower,
            ci_upper: ci.upper,
        }
    }

    #[must_use]
    pub fn confidence_interval(&self) -> ConfidenceInterval {
        ConfidenceInterval {
            lower: self.ci_lower,
            upper: self.ci_upper,
        }
    }

    /// Labeled entries keyed by [`SUMMARY_KEYS`]
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        let values = [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
            self.ci_lower,
            self.ci_upper,
        ];
        std::array::from_fn(|i| (SUMMARY_KEYS[i], values[i]))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

/// Cache status of a simulator instance, borrowing the cached result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SimulationState<'a> {
    #[default]
    NotComputed,
    Computed(&'a SimulationResult),
}

impl<'a> From<Option<&'a SimulationResult>> for SimulationState<'a> {
    fn from(result: Option<&'a SimulationResult>) -> Self {
        match result {
            Some(result) => SimulationState::Computed(result),
            None => SimulationState::NotComputed,
        }
    }
}

impl<'a> SimulationState<'a> {
    #[must_use]
    pub fn result(&self) -> Option<&'a SimulationResult> {
        match self {
            SimulationState::NotComputed => None,
            SimulationState::Computed(result) => Some(result),
        }
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, SimulationState::Computed(_))
    }
}
