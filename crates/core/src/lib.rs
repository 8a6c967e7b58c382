//! `stockcast-core` — shared foundation for the forecasting engine.
//!
//! This crate contains the strongly-typed identifiers and the engine error
//! model. It carries no numeric logic and no infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{EngineError, EngineResult};
pub use id::{ProductId, WarehouseId};
