use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, warn};

use stockcast_core::{EngineError, EngineResult, ProductId, WarehouseId};
use stockcast_demand::{
    DemandAnalyzer, DemandPattern, OptimalStockCalculator, OptimalStockLevel,
    DEFAULT_LEAD_TIME_DAYS,
};
use stockcast_forecast::ForecastMethod;
use stockcast_series::{Granularity, SaleObservation, TimeSeries, TimeSeriesBuilder};

use crate::ports::{
    DemandPatternStore, ForecastStore, LeadTimes, OptimalStockStore, SalesHistory, StockLevels,
};
use crate::request::{validate_period_days, ForecastRequest};
use crate::result::{ForecastKey, ForecastResult};

/// Lookback used by demand analysis when the caller does not choose one.
pub const DEFAULT_ANALYSIS_PERIOD_DAYS: u32 = 90;

/// The forecast orchestrator.
///
/// Validates requests, reads history and snapshots through the collaborator
/// ports, runs the pure computation crates, and upserts the result rows.
/// Every operation is a bounded synchronous pass over an in-memory series;
/// failed reads and writes surface as errors for the caller to retry.
pub struct ForecastEngine {
    sales: Arc<dyn SalesHistory>,
    stock: Arc<dyn StockLevels>,
    lead_times: Arc<dyn LeadTimes>,
    forecasts: Arc<dyn ForecastStore>,
    patterns: Arc<dyn DemandPatternStore>,
    stock_levels: Arc<dyn OptimalStockStore>,
}

impl ForecastEngine {
    pub fn new(
        sales: Arc<dyn SalesHistory>,
        stock: Arc<dyn StockLevels>,
        lead_times: Arc<dyn LeadTimes>,
        forecasts: Arc<dyn ForecastStore>,
        patterns: Arc<dyn DemandPatternStore>,
        stock_levels: Arc<dyn OptimalStockStore>,
    ) -> Self {
        Self {
            sales,
            stock,
            lead_times,
            forecasts,
            patterns,
            stock_levels,
        }
    }

    /// Generate and store one forecast for the requested scope.
    pub fn generate_forecast(&self, request: &ForecastRequest) -> EngineResult<ForecastResult> {
        let method = request.validated_method()?;
        let as_of = Utc::now().date_naive();

        let series = self.build_series(
            request.product_id,
            request.warehouse_id,
            request.period_type,
            request.period_days,
            as_of,
        )?;

        let forecast = match method.forecast(&series) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    product = %request.product_id,
                    method = %method.kind(),
                    error = %e,
                    "forecast method failed"
                );
                return Err(e);
            }
        };

        let row = ForecastResult {
            product_id: request.product_id,
            warehouse_id: request.warehouse_id,
            method: method.kind(),
            period_type: request.period_type,
            forecast_date: as_of,
            predicted_quantity: forecast.quantity,
            predicted_revenue: forecast.revenue,
            confidence_level: forecast.confidence,
            data_points: forecast.data_points,
            actual_quantity: None,
            actual_revenue: None,
            generated_at: Utc::now(),
        };
        self.forecasts.upsert(row.clone())?;

        info!(
            product = %row.product_id,
            method = %row.method,
            predicted_quantity = row.predicted_quantity,
            confidence = row.confidence_level,
            "forecast generated"
        );
        Ok(row)
    }

    /// Analyze the demand pattern for a scope and store it.
    ///
    /// `period_days` defaults to [`DEFAULT_ANALYSIS_PERIOD_DAYS`].
    pub fn analyze_demand(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
        period_days: Option<u32>,
    ) -> EngineResult<DemandPattern> {
        let period_days = period_days.unwrap_or(DEFAULT_ANALYSIS_PERIOD_DAYS);
        validate_period_days(period_days)?;

        let as_of = Utc::now().date_naive();
        let since = lookback_start(as_of, period_days);
        let observations = self.sales.fetch_sales(product_id, warehouse_id, since)?;

        // The daily series gates on minimum demand; the weekly and monthly
        // views of the same window exist only for their averages.
        let daily = TimeSeriesBuilder::new(Granularity::Daily, period_days).build(
            product_id,
            warehouse_id,
            as_of,
            &observations,
        )?;
        let weekly = rebucket(
            Granularity::Weekly,
            period_days,
            product_id,
            warehouse_id,
            as_of,
            &observations,
        )?;
        let monthly = rebucket(
            Granularity::Monthly,
            period_days,
            product_id,
            warehouse_id,
            as_of,
            &observations,
        )?;

        let lead_time_days = self
            .lead_times
            .fetch_lead_time(product_id)?
            .unwrap_or(DEFAULT_LEAD_TIME_DAYS);

        let pattern = DemandAnalyzer::new()
            .with_lead_time_days(lead_time_days)
            .analyze(&daily, &weekly, &monthly, Utc::now());
        self.patterns.upsert(pattern.clone())?;

        info!(
            product = %product_id,
            trend = %pattern.trend,
            average_daily_sales = pattern.average_daily_sales,
            reorder_point = pattern.recommended_reorder_point,
            "demand pattern analyzed"
        );
        Ok(pattern)
    }

    /// Compute and store optimal stock bounds for a concrete warehouse.
    ///
    /// Runs a fresh demand analysis (which is upserted as a side effect) and
    /// reads the current stock as a one-time snapshot.
    pub fn calculate_optimal(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> EngineResult<OptimalStockLevel> {
        let pattern = self.analyze_demand(product_id, Some(warehouse_id), None)?;
        let current_stock = self.stock.fetch_current_stock(product_id, warehouse_id)?;

        let level = OptimalStockCalculator::new().calculate(
            &pattern,
            warehouse_id,
            current_stock,
            Utc::now(),
        );
        self.stock_levels.upsert(level.clone())?;

        info!(
            product = %product_id,
            warehouse = %warehouse_id,
            status = %level.stock_status,
            min = level.optimal_min_stock,
            max = level.optimal_max_stock,
            "optimal stock level calculated"
        );
        Ok(level)
    }

    /// Record observed demand against a stored forecast for back-testing.
    pub fn record_actuals(
        &self,
        key: &ForecastKey,
        actual_quantity: f64,
        actual_revenue: f64,
    ) -> EngineResult<ForecastResult> {
        if !(actual_quantity.is_finite() && actual_quantity >= 0.0)
            || !(actual_revenue.is_finite() && actual_revenue >= 0.0)
        {
            return Err(EngineError::invalid_parameter(
                "actuals must be finite and >= 0",
            ));
        }

        let mut row = self.forecasts.get(key)?.ok_or_else(|| {
            EngineError::invalid_parameter(format!(
                "no forecast stored for product {} on {}",
                key.product_id, key.forecast_date
            ))
        })?;
        row.actual_quantity = Some(actual_quantity);
        row.actual_revenue = Some(actual_revenue);
        self.forecasts.upsert(row.clone())?;
        Ok(row)
    }

    fn build_series(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
        granularity: Granularity,
        period_days: u32,
        as_of: NaiveDate,
    ) -> EngineResult<TimeSeries> {
        let since = lookback_start(as_of, period_days);
        let observations = self.sales.fetch_sales(product_id, warehouse_id, since)?;
        TimeSeriesBuilder::new(granularity, period_days).build(
            product_id,
            warehouse_id,
            as_of,
            &observations,
        )
    }
}

fn rebucket(
    granularity: Granularity,
    period_days: u32,
    product_id: ProductId,
    warehouse_id: Option<WarehouseId>,
    as_of: NaiveDate,
    observations: &[SaleObservation],
) -> EngineResult<TimeSeries> {
    TimeSeriesBuilder::new(granularity, period_days)
        .with_min_active_periods(0)
        .build(product_id, warehouse_id, as_of, observations)
}

fn lookback_start(as_of: NaiveDate, period_days: u32) -> NaiveDate {
    as_of - Duration::days(period_days as i64 - 1)
}
