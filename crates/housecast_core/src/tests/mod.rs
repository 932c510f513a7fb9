//! Integration tests for the housecast simulator
//!
//! Tests are organized by topic:
//! - `construction` - Input validation and weight resolution
//! - `scenarios` - Small hand-checked projections
//! - `properties` - Shape, bounds and determinism of simulated output
//! - `caching` - Memoization, reruns, reconfiguration and cancellation

mod caching;
mod properties;
mod scenarios;
