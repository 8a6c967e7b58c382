//! `stockcast-engine` — the forecast orchestrator and its collaborator ports.
//!
//! The engine validates requests, drives the series builder and the selected
//! method (or the demand analyzer and the stock calculator), and upserts the
//! result rows through store ports. Each operation is a self-contained
//! synchronous computation; there is no shared mutable state between
//! requests, and same-key races are resolved by the store's atomic upsert.

pub mod memory;
pub mod orchestrator;
pub mod ports;
pub mod request;
pub mod result;

pub use memory::{
    InMemoryDemandPatternStore, InMemoryForecastStore, InMemoryLeadTimes,
    InMemoryOptimalStockStore, InMemorySalesHistory, InMemoryStockLevels,
};
pub use orchestrator::{ForecastEngine, DEFAULT_ANALYSIS_PERIOD_DAYS};
pub use ports::{
    DemandPatternStore, ForecastStore, LeadTimes, OptimalStockStore, PortError, SalesHistory,
    StockLevels,
};
pub use request::ForecastRequest;
pub use result::{ForecastKey, ForecastResult};
