use chrono::{Duration, NaiveDate};

use stockcast_core::{EngineError, EngineResult, ProductId, WarehouseId};

use crate::series::{Granularity, SaleObservation, TimeSeries, TimeSeriesPoint};

/// Minimum number of non-zero-demand buckets a series needs before any
/// forecast method may run on it.
pub const DEFAULT_MIN_ACTIVE_PERIODS: usize = 2;

/// Builds a regular, gap-filled [`TimeSeries`] from raw observations.
///
/// The window covers exactly `period_days` of history ending at `as_of`
/// (inclusive). Observations are summed into fixed-width buckets anchored at
/// the window start; buckets with no sales are synthesized with zero
/// quantity and revenue.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder {
    granularity: Granularity,
    period_days: u32,
    min_active_periods: usize,
}

impl TimeSeriesBuilder {
    pub fn new(granularity: Granularity, period_days: u32) -> Self {
        Self {
            granularity,
            period_days,
            min_active_periods: DEFAULT_MIN_ACTIVE_PERIODS,
        }
    }

    /// Override the non-zero-bucket gate. Re-bucketing an already accepted
    /// series for auxiliary averages uses 0.
    pub fn with_min_active_periods(mut self, min_active_periods: usize) -> Self {
        self.min_active_periods = min_active_periods;
        self
    }

    /// Bucket `observations` into the window `[as_of - period_days + 1, as_of]`.
    ///
    /// Observations outside the window are ignored. Whatever warehouses the
    /// given observations carry are summed together; scoping (single
    /// warehouse vs all-warehouse aggregate) is the fetcher's contract.
    pub fn build(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
        as_of: NaiveDate,
        observations: &[SaleObservation],
    ) -> EngineResult<TimeSeries> {
        if self.period_days == 0 {
            return Err(EngineError::invalid_parameter("period_days must be >= 1"));
        }

        let width = self.granularity.bucket_days() as i64;
        let window_start = as_of - Duration::days(self.period_days as i64 - 1);
        let bucket_count = (self.period_days as usize).div_ceil(width as usize);

        let mut points: Vec<TimeSeriesPoint> = (0..bucket_count)
            .map(|i| TimeSeriesPoint {
                period_start: window_start + Duration::days(i as i64 * width),
                quantity: 0.0,
                revenue: 0.0,
            })
            .collect();

        for obs in observations {
            let offset = (obs.occurred_on - window_start).num_days();
            if offset < 0 || obs.occurred_on > as_of {
                continue;
            }
            let idx = (offset / width) as usize;
            points[idx].quantity += obs.quantity as f64;
            points[idx].revenue += obs.revenue;
        }

        let series = TimeSeries {
            product_id,
            warehouse_id,
            granularity: self.granularity,
            points,
        };

        if series.active_periods() < self.min_active_periods {
            return Err(EngineError::insufficient_data(format!(
                "need at least {} periods with demand, got {} over {} days",
                self.min_active_periods,
                series.active_periods(),
                self.period_days
            )));
        }

        Ok(series)
    }
}
