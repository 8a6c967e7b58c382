use stockcast_core::{EngineError, EngineResult};
use stockcast_series::TimeSeries;

use crate::method::Forecast;
use crate::stats;

/// Seasonal decomposition forecast.
///
/// Classic decomposition into trend (centered moving average of one cycle),
/// seasonal indices (per-position mean ratio of actual to trend, normalized
/// to average 1) and residuals. The prediction extrapolates the trend one
/// step by linear fit and re-applies the index for the next period's
/// position in the cycle.
///
/// Requires at least two full cycles; fails with a distinct error so callers
/// can suggest a simpler method instead of silently falling back.
pub(crate) fn forecast(series: &TimeSeries) -> EngineResult<Forecast> {
    let cycle = series.granularity.seasonal_cycle();
    let required = 2 * cycle;
    if series.len() < required {
        return Err(EngineError::insufficient_seasonal_history(
            required,
            series.len(),
        ));
    }

    let quantity = decompose(&series.quantities(), cycle);
    let revenue = decompose(&series.revenues(), cycle);

    Ok(Forecast {
        quantity: quantity.prediction,
        revenue: revenue.prediction,
        confidence: stats::confidence_from_cv(stats::coefficient_of_variation(
            &quantity.residuals,
        )),
        data_points: series.len(),
    })
}

struct Decomposition {
    prediction: f64,
    residuals: Vec<f64>,
}

fn decompose(values: &[f64], cycle: usize) -> Decomposition {
    let n = values.len();
    let half = cycle / 2;

    // Centered moving average of one cycle; defined for the interior indices.
    let trend: Vec<(usize, f64)> = (0..=n - cycle)
        .map(|start| (start + half, stats::mean(&values[start..start + cycle])))
        .collect();

    // Per-position mean ratio of actual to trend.
    let mut ratio_sums = vec![0.0; cycle];
    let mut ratio_counts = vec![0usize; cycle];
    for (idx, t) in &trend {
        if *t > f64::EPSILON {
            ratio_sums[idx % cycle] += values[*idx] / t;
            ratio_counts[idx % cycle] += 1;
        }
    }
    let mut indices: Vec<f64> = (0..cycle)
        .map(|pos| {
            if ratio_counts[pos] > 0 {
                ratio_sums[pos] / ratio_counts[pos] as f64
            } else {
                1.0
            }
        })
        .collect();

    // Normalize so the indices average to 1 across the cycle.
    let index_mean = stats::mean(&indices);
    if index_mean > f64::EPSILON {
        for index in &mut indices {
            *index /= index_mean;
        }
    }

    // Extrapolate the trend one step past the series.
    let fit_points: Vec<(f64, f64)> = trend.iter().map(|(i, t)| (*i as f64, *t)).collect();
    let (slope, intercept) = stats::linear_fit(&fit_points);
    let trend_next = slope * n as f64 + intercept;

    let residuals: Vec<f64> = trend
        .iter()
        .map(|(idx, t)| values[*idx] - t * indices[idx % cycle])
        .collect();

    Decomposition {
        prediction: trend_next * indices[n % cycle],
        residuals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::test_support::daily_quantities;

    #[test]
    fn requires_two_full_cycles() {
        let series = daily_quantities(&[10.0; 10]);
        let err = forecast(&series).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientSeasonalHistory {
                required: 14,
                actual: 10
            }
        ));
    }

    #[test]
    fn constant_series_predicts_the_constant() {
        let series = daily_quantities(&[10.0; 14]);
        let forecast = forecast(&series).unwrap();
        assert!((forecast.quantity - 10.0).abs() < 1e-9);
        assert_eq!(forecast.confidence, 100.0);
    }

    #[test]
    fn recovers_a_repeating_weekly_pattern() {
        // Three identical weeks with a weekend spike; the next period lands
        // on the first position of the cycle.
        let week = [10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 30.0];
        let mut values = Vec::new();
        for _ in 0..3 {
            values.extend_from_slice(&week);
        }

        let series = daily_quantities(&values);
        let forecast = forecast(&series).unwrap();
        assert!(
            (forecast.quantity - 10.0).abs() < 1e-9,
            "quantity = {}",
            forecast.quantity
        );
    }

    #[test]
    fn trend_extrapolation_follows_growth() {
        // Linear growth, no seasonality: indices stay ~1 and the fitted trend
        // carries the slope forward.
        let values: Vec<f64> = (0..14).map(|i| 10.0 + i as f64).collect();
        let series = daily_quantities(&values);
        let forecast = forecast(&series).unwrap();
        assert!(
            (forecast.quantity - 24.0).abs() < 0.5,
            "quantity = {}",
            forecast.quantity
        );
    }
}
