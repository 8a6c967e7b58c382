//! Demand characterization and stock-control recommendations.
//!
//! [`pattern`] classifies the demand trend and derives a reorder point from
//! a daily series; [`stock`] combines that pattern with the current on-hand
//! quantity into min/max/reorder bounds and a stock-status classification.
//! Deterministic, no IO.

pub mod pattern;
pub mod stock;

pub use pattern::{DemandAnalyzer, DemandPattern, Trend, DEFAULT_LEAD_TIME_DAYS, SERVICE_LEVEL_Z};
pub use stock::{OptimalStockCalculator, OptimalStockLevel, StockStatus};
