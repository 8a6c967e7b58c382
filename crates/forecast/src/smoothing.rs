use stockcast_core::{EngineError, EngineResult};
use stockcast_series::TimeSeries;

use crate::method::Forecast;
use crate::stats;

/// Single exponential smoothing over the full series.
///
/// `S0 = x0`, `St = alpha * xt + (1 - alpha) * S(t-1)`; the last smoothed
/// value is the one-step-ahead forecast. Revenue is smoothed the same way on
/// the revenue series. Confidence comes from the variation of the one-step
/// residuals `xt - S(t-1)`.
pub(crate) fn forecast(series: &TimeSeries, alpha: f64) -> EngineResult<Forecast> {
    if series.is_empty() {
        return Err(EngineError::insufficient_data("series has no periods"));
    }

    let (quantity, residuals) = smooth(&series.quantities(), alpha);
    let (revenue, _) = smooth(&series.revenues(), alpha);

    Ok(Forecast {
        quantity,
        revenue,
        confidence: stats::confidence_from_cv(stats::coefficient_of_variation(&residuals)),
        data_points: series.len(),
    })
}

/// Returns the last smoothed value and the one-step residuals.
fn smooth(values: &[f64], alpha: f64) -> (f64, Vec<f64>) {
    let mut smoothed = values[0];
    let mut residuals = Vec::with_capacity(values.len().saturating_sub(1));

    for x in &values[1..] {
        residuals.push(x - smoothed);
        smoothed = alpha * x + (1.0 - alpha) * smoothed;
    }

    (smoothed, residuals)
}
