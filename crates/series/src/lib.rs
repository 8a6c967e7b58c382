//! Time-series construction for the forecasting engine.
//!
//! Raw sale-line records come in as [`SaleObservation`]s; this crate turns
//! them into a regular, gap-filled [`TimeSeries`] at a chosen granularity.
//! Pure, deterministic, no IO.

pub mod builder;
pub mod series;

pub use builder::TimeSeriesBuilder;
pub use series::{Granularity, SaleObservation, TimeSeries, TimeSeriesPoint};
