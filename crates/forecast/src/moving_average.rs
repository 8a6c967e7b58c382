use stockcast_core::{EngineError, EngineResult};
use stockcast_series::TimeSeries;

use crate::method::Forecast;
use crate::stats;

/// Moving-average forecast: the mean of the last `window_size` buckets.
///
/// `window_size` is clamped to `[1, series length]`. Revenue is predicted as
/// quantity times the mean revenue-per-unit over the same window.
pub(crate) fn forecast(series: &TimeSeries, window_size: usize) -> EngineResult<Forecast> {
    if series.is_empty() {
        return Err(EngineError::insufficient_data("series has no periods"));
    }

    let window = window_size.clamp(1, series.len());
    let tail = &series.points[series.len() - window..];

    let quantities: Vec<f64> = tail.iter().map(|p| p.quantity).collect();
    let quantity = stats::mean(&quantities);

    let window_quantity: f64 = quantities.iter().sum();
    let window_revenue: f64 = tail.iter().map(|p| p.revenue).sum();
    let revenue_per_unit = if window_quantity > 0.0 {
        window_revenue / window_quantity
    } else {
        0.0
    };

    Ok(Forecast {
        quantity,
        revenue: quantity * revenue_per_unit,
        confidence: stats::confidence_from_cv(stats::coefficient_of_variation(&quantities)),
        data_points: series.len(),
    })
}
