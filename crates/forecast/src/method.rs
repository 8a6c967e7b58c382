use serde::{Deserialize, Serialize};

use stockcast_core::EngineResult;
use stockcast_series::TimeSeries;

use crate::{moving_average, seasonal, smoothing};

/// Method identity, without parameters. Used for request parsing and as part
/// of the forecast row's natural key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    MovingAverage,
    ExponentialSmoothing,
    SeasonalDecomposition,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::MovingAverage => "moving_average",
            MethodKind::ExponentialSmoothing => "exponential_smoothing",
            MethodKind::SeasonalDecomposition => "seasonal_decomposition",
        }
    }
}

impl core::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forecast method with its validated parameters.
///
/// One variant per algorithm rather than a trait hierarchy: method selection
/// stays a simple exhaustive dispatch over an enumerated set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForecastMethod {
    MovingAverage { window_size: usize },
    ExponentialSmoothing { alpha: f64 },
    SeasonalDecomposition,
}

/// Output of a forecast method: one future period beyond the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub quantity: f64,
    pub revenue: f64,
    /// Confidence in [0, 100]; strictly decreases as residual variation grows.
    pub confidence: f64,
    /// Number of series buckets the prediction was computed from.
    pub data_points: usize,
}

impl ForecastMethod {
    pub fn kind(&self) -> MethodKind {
        match self {
            ForecastMethod::MovingAverage { .. } => MethodKind::MovingAverage,
            ForecastMethod::ExponentialSmoothing { .. } => MethodKind::ExponentialSmoothing,
            ForecastMethod::SeasonalDecomposition => MethodKind::SeasonalDecomposition,
        }
    }

    /// Run the method over a built series.
    ///
    /// Predictions are clamped to >= 0: a declining trend can push the raw
    /// math negative, but a demand forecast never is.
    pub fn forecast(&self, series: &TimeSeries) -> EngineResult<Forecast> {
        let mut forecast = match self {
            ForecastMethod::MovingAverage { window_size } => {
                moving_average::forecast(series, *window_size)?
            }
            ForecastMethod::ExponentialSmoothing { alpha } => {
                smoothing::forecast(series, *alpha)?
            }
            ForecastMethod::SeasonalDecomposition => seasonal::forecast(series)?,
        };

        forecast.quantity = forecast.quantity.max(0.0);
        forecast.revenue = forecast.revenue.max(0.0);
        Ok(forecast)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, NaiveDate};
    use stockcast_core::ProductId;
    use stockcast_series::{Granularity, TimeSeries, TimeSeriesPoint};

    /// Daily series from explicit (quantity, revenue) pairs, oldest first.
    pub fn daily_series(values: &[(f64, f64)]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        TimeSeries {
            product_id: ProductId::new(),
            warehouse_id: None,
            granularity: Granularity::Daily,
            points: values
                .iter()
                .enumerate()
                .map(|(i, (quantity, revenue))| TimeSeriesPoint {
                    period_start: start + Duration::days(i as i64),
                    quantity: *quantity,
                    revenue: *revenue,
                })
                .collect(),
        }
    }

    pub fn daily_quantities(quantities: &[f64]) -> TimeSeries {
        let pairs: Vec<(f64, f64)> = quantities.iter().map(|q| (*q, *q * 10.0)).collect();
        daily_series(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::daily_quantities;
    use super::*;

    #[test]
    fn constant_series_predicts_the_constant_under_every_method() {
        let series = daily_quantities(&[10.0; 14]);
        let methods = [
            ForecastMethod::MovingAverage { window_size: 7 },
            ForecastMethod::ExponentialSmoothing { alpha: 0.3 },
            ForecastMethod::SeasonalDecomposition,
        ];

        for method in methods {
            let forecast = method.forecast(&series).unwrap();
            assert!(
                (forecast.quantity - 10.0).abs() < 1e-9,
                "{}: quantity = {}",
                method.kind(),
                forecast.quantity
            );
            assert_eq!(forecast.confidence, 100.0, "{}", method.kind());
        }
    }

    #[test]
    fn predictions_are_never_negative() {
        // Steep decline drives the smoothed revenue extrapolation toward zero.
        let series = daily_quantities(&[50.0, 30.0, 10.0, 1.0, 0.0, 0.0, 0.0]);
        let forecast = ForecastMethod::ExponentialSmoothing { alpha: 1.0 }
            .forecast(&series)
            .unwrap();
        assert!(forecast.quantity >= 0.0);
        assert!(forecast.revenue >= 0.0);
    }
}
