//! Monte Carlo portfolio projection for housing price series
//!
//! This crate projects the future value of a weighted portfolio of assets
//! (typically county-level home value indices) by random-walk simulation:
//! - Per-asset mean and standard deviation of historical periodic returns
//! - Independent normal random walks from each asset's last known price
//! - Weighted blending of simple returns into a portfolio cumulative return
//! - Distribution of final outcomes with a 95% confidence interval
//!
//! # Builder DSL
//!
//! ```ignore
//! use housecast_core::SimulatorBuilder;
//!
//! let mut simulator = SimulatorBuilder::new()
//!     .history(price_history)
//!     .simulations(500)
//!     .years(8)
//!     .build()?;
//!
//! let matrix = simulator.run_simulation();
//! let summary = simulator.summarize();
//! println!("95% CI: [{:.3}, {:.3}]", summary.ci_lower, summary.ci_upper);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod simulation;
pub mod simulator;
pub mod statistics;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{SimulationConfig, SimulatorBuilder};
pub use error::{ConfigurationError, InsufficientHistoryError, SimulationError};
pub use simulator::MonteCarloSimulator;
