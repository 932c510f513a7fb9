mod history;
mod ids;
mod parameters;
mod progress;
mod results;
mod weights;

pub use history::{AssetSeries, PriceHistory, PricePoint, PriceRecord, pct_change};
pub use ids::AssetKey;
pub use parameters::ReturnParameters;
pub use progress::MonteCarloProgress;
pub use results::{
    CI_LOWER_QUANTILE, CI_UPPER_QUANTILE, ConfidenceInterval, SUMMARY_KEYS, SimulationResult,
    SimulationState, SummaryStatistics,
};
pub use weights::{PortfolioWeights, WEIGHT_SUM_TOLERANCE};
