use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::{ProductId, WarehouseId};

use crate::pattern::DemandPattern;

/// Fraction of the minimum stock below which the situation is critical.
const CRITICAL_RATIO: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Optimal,
    Low,
    Critical,
    Overstock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Optimal => "optimal",
            StockStatus::Low => "low",
            StockStatus::Critical => "critical",
            StockStatus::Overstock => "overstock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock-control recommendation for a (product, warehouse) pair.
///
/// `current_stock` is a snapshot read at calculation time and is not kept in
/// sync afterward; re-run the calculation to refresh it. Overwritten per
/// (product, warehouse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalStockLevel {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub current_stock: i64,
    /// Level below which reorder must trigger.
    pub optimal_min_stock: i64,
    /// Min stock plus one month of additional cover.
    pub optimal_max_stock: i64,
    /// Same value as min stock today; kept separate because reorder policy
    /// may diverge from min-stock policy later.
    pub optimal_reorder_point: i64,
    /// Suggested replenishment lot (~one month of supply).
    pub optimal_reorder_quantity: i64,
    pub stock_status: StockStatus,
    pub calculated_at: DateTime<Utc>,
}

/// Derives an [`OptimalStockLevel`] from a demand pattern and a stock snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalStockCalculator;

impl OptimalStockCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(
        &self,
        pattern: &DemandPattern,
        warehouse_id: WarehouseId,
        current_stock: i64,
        calculated_at: DateTime<Utc>,
    ) -> OptimalStockLevel {
        let min_stock = pattern.recommended_reorder_point.max(0);
        let monthly_cover = pattern.average_monthly_sales.ceil().max(0.0) as i64;
        let max_stock = min_stock + monthly_cover;

        OptimalStockLevel {
            product_id: pattern.product_id,
            warehouse_id,
            current_stock,
            optimal_min_stock: min_stock,
            optimal_max_stock: max_stock,
            optimal_reorder_point: min_stock,
            optimal_reorder_quantity: monthly_cover,
            stock_status: classify(current_stock, min_stock, max_stock),
            calculated_at,
        }
    }
}

fn classify(current: i64, min_stock: i64, max_stock: i64) -> StockStatus {
    if (current as f64) < min_stock as f64 * CRITICAL_RATIO {
        StockStatus::Critical
    } else if current < min_stock {
        StockStatus::Low
    } else if current <= max_stock {
        StockStatus::Optimal
    } else {
        StockStatus::Overstock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Trend;

    fn pattern(reorder_point: i64, average_monthly_sales: f64) -> DemandPattern {
        DemandPattern {
            product_id: ProductId::new(),
            warehouse_id: None,
            trend: Trend::Stable,
            average_daily_sales: average_monthly_sales / 30.0,
            average_weekly_sales: average_monthly_sales / 30.0 * 7.0,
            average_monthly_sales,
            recommended_safety_stock: 0,
            recommended_reorder_point: reorder_point,
            recommended_order_quantity: average_monthly_sales.ceil() as i64,
            lead_time_days: 7,
            analyzed_at: Utc::now(),
        }
    }

    fn level(reorder_point: i64, monthly: f64, current: i64) -> OptimalStockLevel {
        OptimalStockCalculator::new().calculate(
            &pattern(reorder_point, monthly),
            WarehouseId::new(),
            current,
            Utc::now(),
        )
    }

    #[test]
    fn three_on_hand_against_min_ten_is_critical() {
        let level = level(10, 300.0, 3);
        assert_eq!(level.stock_status, StockStatus::Critical);
    }

    #[test]
    fn half_of_min_is_low_not_critical() {
        let level = level(10, 300.0, 5);
        assert_eq!(level.stock_status, StockStatus::Low);
    }

    #[test]
    fn within_bounds_is_optimal() {
        let at_min = level(10, 300.0, 10);
        assert_eq!(at_min.stock_status, StockStatus::Optimal);
        let at_max = level(10, 300.0, 310);
        assert_eq!(at_max.stock_status, StockStatus::Optimal);
    }

    #[test]
    fn above_max_is_overstock() {
        let level = level(10, 300.0, 311);
        assert_eq!(level.stock_status, StockStatus::Overstock);
    }

    #[test]
    fn max_is_min_plus_one_month_of_cover() {
        let level = level(40, 120.0, 0);
        assert_eq!(level.optimal_min_stock, 40);
        assert_eq!(level.optimal_max_stock, 160);
        assert_eq!(level.optimal_reorder_point, 40);
        assert_eq!(level.optimal_reorder_quantity, 120);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: min <= reorder point <= max for every computed level.
            #[test]
            fn bounds_are_ordered(
                reorder_point in 0i64..100_000,
                monthly in 0.0f64..100_000.0,
                current in -1_000i64..1_000_000,
            ) {
                let level = level(reorder_point, monthly, current);
                prop_assert!(level.optimal_min_stock <= level.optimal_reorder_point);
                prop_assert!(level.optimal_reorder_point <= level.optimal_max_stock);
            }
        }
    }
}
