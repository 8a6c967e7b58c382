use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::{ProductId, WarehouseId};

/// Bucket size used to aggregate raw sales into a time series.
///
/// Weekly and monthly buckets are fixed-width windows (7 and 30 days)
/// anchored at the start of the lookback window, so every lookback of
/// `period_days` produces a deterministic bucket count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Width of one bucket, in days.
    pub fn bucket_days(&self) -> u32 {
        match self {
            Granularity::Daily => 1,
            Granularity::Weekly => 7,
            Granularity::Monthly => 30,
        }
    }

    /// Length of one seasonal cycle at this granularity, in buckets
    /// (days per week, weeks per month, months per year).
    pub fn seasonal_cycle(&self) -> usize {
        match self {
            Granularity::Daily => 7,
            Granularity::Weekly => 4,
            Granularity::Monthly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl core::fmt::Display for Granularity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One historical sale event for a product. Read-only input, owned by the
/// sales subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleObservation {
    pub product_id: ProductId,
    /// `None` when the record is already an all-warehouse aggregate.
    pub warehouse_id: Option<WarehouseId>,
    pub occurred_on: NaiveDate,
    pub quantity: i64,
    pub revenue: f64,
}

/// One bucket of the regularized series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period_start: NaiveDate,
    pub quantity: f64,
    pub revenue: f64,
}

/// Regular, gap-filled sequence derived from observations.
///
/// Points are in chronological order, oldest first, and cover the lookback
/// window exactly: a period with no sales is a real zero data point, not a
/// gap. Created per request and discarded after use; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub product_id: ProductId,
    pub warehouse_id: Option<WarehouseId>,
    pub granularity: Granularity,
    pub points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity).collect()
    }

    pub fn revenues(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.revenue).collect()
    }

    /// Number of buckets with non-zero demand.
    pub fn active_periods(&self) -> usize {
        self.points.iter().filter(|p| p.quantity > 0.0).count()
    }
}
