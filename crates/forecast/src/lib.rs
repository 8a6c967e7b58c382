//! Forecast methods for the demand engine.
//!
//! Three interchangeable algorithms over a built [`stockcast_series::TimeSeries`],
//! each producing a one-step-ahead prediction (quantity, revenue) and a
//! residual-based confidence score. Deterministic, no IO.

pub mod method;
pub mod stats;

mod moving_average;
mod seasonal;
mod smoothing;

pub use method::{Forecast, ForecastMethod, MethodKind};
