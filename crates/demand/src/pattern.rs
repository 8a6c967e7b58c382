use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::{ProductId, WarehouseId};
use stockcast_forecast::stats;
use stockcast_series::TimeSeries;

/// Service-level z-score used to size safety stock (~95% service level).
pub const SERVICE_LEVEL_Z: f64 = 1.65;

/// Supplier lead time assumed when the collaborator has none on record.
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// Periods considered by the trend regression.
const TREND_WINDOW: usize = 30;

/// Slope threshold for trend classification, as a fraction of the daily
/// average per period.
const TREND_SLOPE_RATIO: f64 = 0.05;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl core::fmt::Display for Trend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate demand characterization for a (product, warehouse) scope.
///
/// At most one live record per scope; each analysis overwrites the prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPattern {
    pub product_id: ProductId,
    pub warehouse_id: Option<WarehouseId>,
    pub trend: Trend,
    pub average_daily_sales: f64,
    pub average_weekly_sales: f64,
    pub average_monthly_sales: f64,
    /// Extra units held to absorb demand variability during lead time.
    pub recommended_safety_stock: i64,
    /// Stock level at which replenishment must be triggered.
    pub recommended_reorder_point: i64,
    /// Suggested replenishment lot (~one month of supply).
    pub recommended_order_quantity: i64,
    /// Lead time the recommendations were sized with, in days.
    pub lead_time_days: u32,
    pub analyzed_at: DateTime<Utc>,
}

/// Computes a [`DemandPattern`] from pre-built series.
///
/// The daily series drives the trend and the reorder math; the weekly and
/// monthly series are independently re-bucketed views over the same window,
/// used only for their averages.
#[derive(Debug, Clone)]
pub struct DemandAnalyzer {
    lead_time_days: u32,
}

impl DemandAnalyzer {
    pub fn new() -> Self {
        Self {
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
        }
    }

    pub fn with_lead_time_days(mut self, lead_time_days: u32) -> Self {
        self.lead_time_days = lead_time_days.max(1);
        self
    }

    pub fn analyze(
        &self,
        daily: &TimeSeries,
        weekly: &TimeSeries,
        monthly: &TimeSeries,
        analyzed_at: DateTime<Utc>,
    ) -> DemandPattern {
        let daily_quantities = daily.quantities();
        let average_daily_sales = stats::mean(&daily_quantities);
        let average_weekly_sales = stats::mean(&weekly.quantities());
        let average_monthly_sales = stats::mean(&monthly.quantities());

        let lead_time = self.lead_time_days as f64;
        let safety_stock =
            SERVICE_LEVEL_Z * stats::stddev(&daily_quantities) * lead_time.sqrt();
        let reorder_point = average_daily_sales * lead_time + safety_stock;

        DemandPattern {
            product_id: daily.product_id,
            warehouse_id: daily.warehouse_id,
            trend: classify_trend(&daily_quantities, average_daily_sales),
            average_daily_sales,
            average_weekly_sales,
            average_monthly_sales,
            recommended_safety_stock: safety_stock.ceil() as i64,
            recommended_reorder_point: reorder_point.ceil() as i64,
            recommended_order_quantity: average_monthly_sales.ceil() as i64,
            lead_time_days: self.lead_time_days,
            analyzed_at,
        }
    }
}

impl Default for DemandAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Least-squares slope over the last `min(len, 30)` periods, classified
/// against +/-5% of the daily average per period.
fn classify_trend(quantities: &[f64], average_daily_sales: f64) -> Trend {
    let window = quantities.len().min(TREND_WINDOW);
    if window < 2 {
        return Trend::Stable;
    }

    let tail = &quantities[quantities.len() - window..];
    let points: Vec<(f64, f64)> = tail
        .iter()
        .enumerate()
        .map(|(i, q)| (i as f64, *q))
        .collect();
    let (slope, _) = stats::linear_fit(&points);

    let threshold = TREND_SLOPE_RATIO * average_daily_sales;
    if slope > threshold {
        Trend::Increasing
    } else if slope < -threshold {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use stockcast_series::{Granularity, TimeSeriesPoint};

    fn series(granularity: Granularity, quantities: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let width = granularity.bucket_days() as i64;
        TimeSeries {
            product_id: ProductId::new(),
            warehouse_id: None,
            granularity,
            points: quantities
                .iter()
                .enumerate()
                .map(|(i, q)| TimeSeriesPoint {
                    period_start: start + Duration::days(i as i64 * width),
                    quantity: *q,
                    revenue: *q * 10.0,
                })
                .collect(),
        }
    }

    fn analyze(daily_quantities: &[f64]) -> DemandPattern {
        // Re-bucket by hand: weekly/monthly sums of the daily values.
        let weekly: Vec<f64> = daily_quantities
            .chunks(7)
            .map(|c| c.iter().sum())
            .collect();
        let monthly: Vec<f64> = daily_quantities
            .chunks(30)
            .map(|c| c.iter().sum())
            .collect();

        DemandAnalyzer::new().analyze(
            &series(Granularity::Daily, daily_quantities),
            &series(Granularity::Weekly, &weekly),
            &series(Granularity::Monthly, &monthly),
            Utc::now(),
        )
    }

    #[test]
    fn clear_growth_classifies_as_increasing() {
        let pattern = analyze(&[10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0]);
        assert_eq!(pattern.trend, Trend::Increasing);
    }

    #[test]
    fn clear_decline_classifies_as_decreasing() {
        let pattern = analyze(&[22.0, 20.0, 18.0, 16.0, 14.0, 12.0, 10.0]);
        assert_eq!(pattern.trend, Trend::Decreasing);
    }

    #[test]
    fn flat_demand_classifies_as_stable() {
        let pattern = analyze(&[10.0, 11.0, 10.0, 9.0, 10.0, 10.0, 10.0]);
        assert_eq!(pattern.trend, Trend::Stable);
    }

    #[test]
    fn all_zero_demand_is_stable() {
        let pattern = analyze(&[0.0; 30]);
        assert_eq!(pattern.trend, Trend::Stable);
        assert_eq!(pattern.recommended_reorder_point, 0);
    }

    #[test]
    fn constant_demand_needs_no_safety_stock() {
        let pattern = analyze(&[10.0; 28]);
        assert_eq!(pattern.recommended_safety_stock, 0);
        // Reorder point is exactly lead-time demand.
        assert_eq!(pattern.recommended_reorder_point, 70);
    }

    #[test]
    fn variable_demand_adds_safety_stock() {
        let pattern = analyze(&[5.0, 15.0, 5.0, 15.0, 5.0, 15.0, 5.0, 15.0]);
        assert!(pattern.recommended_safety_stock > 0);
        assert!(
            pattern.recommended_reorder_point
                > (pattern.average_daily_sales * DEFAULT_LEAD_TIME_DAYS as f64) as i64
        );
    }

    #[test]
    fn weekly_and_monthly_averages_track_the_daily_average() {
        let pattern = analyze(&[10.0; 90]);
        assert!((pattern.average_weekly_sales - 7.0 * pattern.average_daily_sales).abs() < 1.0);
        assert!((pattern.average_monthly_sales - 30.0 * pattern.average_daily_sales).abs() < 1.0);
    }

    #[test]
    fn trend_window_caps_at_thirty_periods() {
        // Old decline followed by 30 flat periods: only the tail counts.
        let mut values = vec![100.0; 10];
        values.extend(vec![10.0; 30]);
        let pattern = analyze(&values);
        assert_eq!(pattern.trend, Trend::Stable);
    }
}
