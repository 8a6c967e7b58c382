//! In-memory port implementations for tests, examples and embedding.
//!
//! Upserts are plain `HashMap` inserts under a mutex, which gives the
//! last-writer-wins semantics the store contracts require.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use stockcast_core::{ProductId, WarehouseId};
use stockcast_demand::{DemandPattern, OptimalStockLevel};
use stockcast_series::SaleObservation;

use crate::ports::{
    DemandPatternStore, ForecastStore, LeadTimes, OptimalStockStore, PortError, SalesHistory,
    StockLevels,
};
use crate::result::{ForecastKey, ForecastResult};

#[derive(Debug, Default)]
pub struct InMemorySalesHistory {
    inner: Mutex<Vec<SaleObservation>>,
}

impl InMemorySalesHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, observation: SaleObservation) {
        self.inner.lock().unwrap().push(observation);
    }

    pub fn record_all(&self, observations: impl IntoIterator<Item = SaleObservation>) {
        self.inner.lock().unwrap().extend(observations);
    }
}

impl SalesHistory for InMemorySalesHistory {
    fn fetch_sales(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
        since: NaiveDate,
    ) -> Result<Vec<SaleObservation>, PortError> {
        let mut observations: Vec<SaleObservation> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.product_id == product_id && o.occurred_on >= since)
            .filter(|o| match warehouse_id {
                Some(w) => o.warehouse_id == Some(w),
                None => true,
            })
            .cloned()
            .collect();
        observations.sort_by_key(|o| o.occurred_on);
        Ok(observations)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStockLevels {
    inner: Mutex<HashMap<(ProductId, WarehouseId), i64>>,
}

impl InMemoryStockLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, product_id: ProductId, warehouse_id: WarehouseId, quantity: i64) {
        self.inner
            .lock()
            .unwrap()
            .insert((product_id, warehouse_id), quantity);
    }
}

impl StockLevels for InMemoryStockLevels {
    fn fetch_current_stock(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<i64, PortError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .get(&(product_id, warehouse_id))
            .copied()
            .unwrap_or(0))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLeadTimes {
    inner: Mutex<HashMap<ProductId, u32>>,
}

impl InMemoryLeadTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, product_id: ProductId, days: u32) {
        self.inner.lock().unwrap().insert(product_id, days);
    }
}

impl LeadTimes for InMemoryLeadTimes {
    fn fetch_lead_time(&self, product_id: ProductId) -> Result<Option<u32>, PortError> {
        Ok(self.inner.lock().unwrap().get(&product_id).copied())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryForecastStore {
    inner: Mutex<HashMap<ForecastKey, ForecastResult>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<ForecastResult> {
        self.inner.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl ForecastStore for InMemoryForecastStore {
    fn upsert(&self, result: ForecastResult) -> Result<(), PortError> {
        self.inner.lock().unwrap().insert(result.key(), result);
        Ok(())
    }

    fn get(&self, key: &ForecastKey) -> Result<Option<ForecastResult>, PortError> {
        Ok(self.inner.lock().unwrap().get(key).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDemandPatternStore {
    inner: Mutex<HashMap<(ProductId, Option<WarehouseId>), DemandPattern>>,
}

impl InMemoryDemandPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl DemandPatternStore for InMemoryDemandPatternStore {
    fn upsert(&self, pattern: DemandPattern) -> Result<(), PortError> {
        self.inner
            .lock()
            .unwrap()
            .insert((pattern.product_id, pattern.warehouse_id), pattern);
        Ok(())
    }

    fn get(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<Option<DemandPattern>, PortError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .get(&(product_id, warehouse_id))
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOptimalStockStore {
    inner: Mutex<HashMap<(ProductId, WarehouseId), OptimalStockLevel>>,
}

impl InMemoryOptimalStockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl OptimalStockStore for InMemoryOptimalStockStore {
    fn upsert(&self, level: OptimalStockLevel) -> Result<(), PortError> {
        self.inner
            .lock()
            .unwrap()
            .insert((level.product_id, level.warehouse_id), level);
        Ok(())
    }

    fn get(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<OptimalStockLevel>, PortError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .get(&(product_id, warehouse_id))
            .cloned())
    }
}
