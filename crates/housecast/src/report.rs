//! Reporting of simulation outcomes

use housecast_core::model::{
    ConfidenceInterval, PortfolioWeights, ReturnParameters, SummaryStatistics,
};
use housecast_core::{MonteCarloSimulator, SimulationConfig};
use serde::Serialize;

/// Everything needed to reproduce and inspect one projection
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    /// Master seed actually used, even when the config left it unset
    pub seed: u64,
    pub parameters: Vec<ReturnParameters>,
    pub weights: PortfolioWeights,
    pub confidence_interval: ConfidenceInterval,
    pub summary: SummaryStatistics,
    /// `cumulative_returns[period][run]`
    pub cumulative_returns: Vec<Vec<f64>>,
}

impl SimulationReport {
    /// Collect a report, running the simulation first if needed
    pub fn from_simulator(simulator: &mut MonteCarloSimulator) -> Self {
        let result = simulator.run_simulation();
        let seed = result.seed;
        let cumulative_returns = result.to_rows();
        let confidence_interval = result.confidence_interval();
        let summary = result.summary();

        Self {
            config: *simulator.config(),
            seed,
            parameters: simulator.parameters().to_vec(),
            weights: simulator.portfolio_weights(),
            confidence_interval,
            summary,
            cumulative_returns,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render summary statistics as a two-column table, one statistic per line
#[must_use]
pub fn format_summary(summary: &SummaryStatistics) -> String {
    let entries = summary.entries();
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    entries
        .iter()
        .map(|(key, value)| {
            if *key == "count" {
                format!("{key:<width$}  {}\n", summary.count)
            } else {
                format!("{key:<width$}  {value:.6}\n")
            }
        })
        .collect()
}
