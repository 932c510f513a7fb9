//! Command-line front end for housecast projections
//!
//! Loads a YAML scenario, runs the Monte Carlo simulator, prints summary
//! statistics and optionally writes a JSON report.

// ============================================================================
// Modules
// ============================================================================

pub mod logging;
pub mod report;
pub mod scenario;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use logging::init_logging;
pub use report::{SimulationReport, format_summary};
pub use scenario::{ConfigOverrides, Scenario, ScenarioError};
