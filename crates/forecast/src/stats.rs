//! Small statistics helpers shared by the forecast methods and the demand
//! analyzer. All deterministic.

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Population standard deviation (n), deterministic.
pub fn stddev(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs
        .iter()
        .map(|x| {
            let d = x - m;
            d * d
        })
        .sum::<f64>()
        / (xs.len() as f64);
    var.sqrt()
}

/// Coefficient of variation: stddev / |mean|, 0 when the mean is 0.
///
/// The absolute value keeps the ratio non-negative for series whose mean is
/// negative (residual series), so the derived confidence stays in [0, 100].
pub fn coefficient_of_variation(xs: &[f64]) -> f64 {
    let m = mean(xs);
    if m.abs() <= f64::EPSILON {
        return 0.0;
    }
    stddev(xs) / m.abs()
}

/// Confidence in [0, 100] from a coefficient of variation.
pub fn confidence_from_cv(cv: f64) -> f64 {
    (100.0 - (cv * 100.0).min(100.0)).max(0.0)
}

/// Least-squares linear fit over `(x, y)` points, returning `(slope, intercept)`.
///
/// Degenerate inputs (fewer than 2 points, or zero x-variance) fit a flat
/// line through the mean.
pub fn linear_fit(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    if points.len() < 2 {
        return (0.0, points.first().map(|p| p.1).unwrap_or(0.0));
    }

    let x_mean = points.iter().map(|p| p.0).sum::<f64>() / n;
    let y_mean = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in points {
        sxx += (x - x_mean) * (x - x_mean);
        sxy += (x - x_mean) * (y - y_mean);
    }

    if sxx <= f64::EPSILON {
        return (0.0, y_mean);
    }

    let slope = sxy / sxx;
    (slope, y_mean - slope * x_mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn stddev_of_constant_is_zero() {
        assert_eq!(stddev(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn cv_guards_zero_mean() {
        assert_eq!(coefficient_of_variation(&[1.0, -1.0]), 0.0);
    }

    #[test]
    fn confidence_is_bounded() {
        assert_eq!(confidence_from_cv(0.0), 100.0);
        assert_eq!(confidence_from_cv(1.0), 0.0);
        assert_eq!(confidence_from_cv(7.5), 0.0);
    }

    #[test]
    fn fits_exact_line() {
        let points: Vec<(f64, f64)> = (0..7).map(|i| (i as f64, 10.0 + 2.0 * i as f64)).collect();
        let (slope, intercept) = linear_fit(&points);
        assert!((slope - 2.0).abs() < 1e-9);
        assert!((intercept - 10.0).abs() < 1e-9);
    }

    #[test]
    fn flat_fit_for_single_point() {
        let (slope, intercept) = linear_fit(&[(3.0, 42.0)]);
        assert_eq!(slope, 0.0);
        assert_eq!(intercept, 42.0);
    }
}
