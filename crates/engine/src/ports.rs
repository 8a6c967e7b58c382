//! Collaborator contracts the engine consumes and exposes.
//!
//! The engine stays storage-agnostic: sales history, stock snapshots and
//! lead times are read through these traits, and result rows are written
//! through them. Port failures are carried as `anyhow::Error` and surface to
//! callers as `EngineError::UpstreamUnavailable` with no local recovery.

use chrono::NaiveDate;

use stockcast_core::{ProductId, WarehouseId};
use stockcast_demand::{DemandPattern, OptimalStockLevel};
use stockcast_series::SaleObservation;

use crate::result::{ForecastKey, ForecastResult};

/// Error type shared by all ports.
pub type PortError = anyhow::Error;

/// Historical sales, owned by the sales subsystem.
pub trait SalesHistory: Send + Sync {
    /// Observations for the scope since `since` (inclusive), in
    /// chronological order. A `None` warehouse means all warehouses for the
    /// product.
    fn fetch_sales(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
        since: NaiveDate,
    ) -> Result<Vec<SaleObservation>, PortError>;
}

/// On-hand stock, owned by the inventory subsystem.
pub trait StockLevels: Send + Sync {
    fn fetch_current_stock(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<i64, PortError>;
}

/// Supplier lead times, owned by purchasing. `None` means no lead time on
/// record; the engine falls back to its default.
pub trait LeadTimes: Send + Sync {
    fn fetch_lead_time(&self, product_id: ProductId) -> Result<Option<u32>, PortError>;
}

/// Persistence for forecast rows. `upsert` must be atomic insert-or-replace
/// on the natural key so concurrent same-key writers resolve to last writer
/// wins rather than duplicates.
pub trait ForecastStore: Send + Sync {
    fn upsert(&self, result: ForecastResult) -> Result<(), PortError>;
    fn get(&self, key: &ForecastKey) -> Result<Option<ForecastResult>, PortError>;
}

/// Persistence for demand patterns, keyed by (product, warehouse).
pub trait DemandPatternStore: Send + Sync {
    fn upsert(&self, pattern: DemandPattern) -> Result<(), PortError>;
    fn get(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<Option<DemandPattern>, PortError>;
}

/// Persistence for optimal stock levels, keyed by (product, warehouse).
pub trait OptimalStockStore: Send + Sync {
    fn upsert(&self, level: OptimalStockLevel) -> Result<(), PortError>;
    fn get(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<OptimalStockLevel>, PortError>;
}
