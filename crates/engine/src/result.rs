use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::{ProductId, WarehouseId};
use stockcast_forecast::MethodKind;
use stockcast_series::Granularity;

/// Natural key of a forecast row. Re-running a forecast for the same key
/// overwrites the prior result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastKey {
    pub product_id: ProductId,
    pub warehouse_id: Option<WarehouseId>,
    pub forecast_date: NaiveDate,
    pub method: MethodKind,
}

/// One persisted forecast outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub product_id: ProductId,
    pub warehouse_id: Option<WarehouseId>,
    pub method: MethodKind,
    pub period_type: Granularity,
    pub forecast_date: NaiveDate,
    pub predicted_quantity: f64,
    pub predicted_revenue: f64,
    /// Confidence in [0, 100].
    pub confidence_level: f64,
    /// Series length the prediction was computed from.
    pub data_points: usize,
    /// Filled in after the forecast period closes, for back-testing.
    pub actual_quantity: Option<f64>,
    pub actual_revenue: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

impl ForecastResult {
    pub fn key(&self) -> ForecastKey {
        ForecastKey {
            product_id: self.product_id,
            warehouse_id: self.warehouse_id,
            forecast_date: self.forecast_date,
            method: self.method,
        }
    }

    /// Forecast accuracy in percent, once actuals are known.
    ///
    /// `None` until actuals are recorded or when the actual quantity is zero
    /// (relative error is undefined there).
    pub fn accuracy(&self) -> Option<f64> {
        let actual = self.actual_quantity?;
        if actual <= 0.0 {
            return None;
        }
        let error = (actual - self.predicted_quantity).abs() / actual;
        Some((1.0 - error) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(predicted: f64, actual: Option<f64>) -> ForecastResult {
        ForecastResult {
            product_id: ProductId::new(),
            warehouse_id: None,
            method: MethodKind::MovingAverage,
            period_type: Granularity::Daily,
            forecast_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            predicted_quantity: predicted,
            predicted_revenue: predicted * 10.0,
            confidence_level: 80.0,
            data_points: 30,
            actual_quantity: actual,
            actual_revenue: actual.map(|a| a * 10.0),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn accuracy_requires_actuals() {
        assert_eq!(row(10.0, None).accuracy(), None);
        assert_eq!(row(10.0, Some(0.0)).accuracy(), None);
    }

    #[test]
    fn exact_prediction_scores_hundred() {
        assert_eq!(row(10.0, Some(10.0)).accuracy(), Some(100.0));
    }

    #[test]
    fn twenty_percent_error_scores_eighty() {
        let accuracy = row(8.0, Some(10.0)).accuracy().unwrap();
        assert!((accuracy - 80.0).abs() < 1e-9);
    }
}
