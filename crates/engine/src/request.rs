use serde::{Deserialize, Serialize};

use stockcast_core::{EngineError, EngineResult, ProductId, WarehouseId};
use stockcast_forecast::{ForecastMethod, MethodKind};
use stockcast_series::Granularity;

/// Default moving-average window when the request omits one.
pub const DEFAULT_WINDOW_SIZE: usize = 7;

/// Default smoothing factor when the request omits one.
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Lookback bounds accepted by every operation, in days.
pub const MIN_PERIOD_DAYS: u32 = 7;
pub const MAX_PERIOD_DAYS: u32 = 365;

/// Parameters for one forecast run. Constructed per call, validated,
/// consumed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub product_id: ProductId,
    /// `None` aggregates across all warehouses for the product.
    pub warehouse_id: Option<WarehouseId>,
    pub method: MethodKind,
    pub period_type: Granularity,
    /// Lookback window size in days.
    pub period_days: u32,
    /// Moving average only.
    pub window_size: Option<usize>,
    /// Exponential smoothing only, 0 < alpha <= 1.
    pub alpha: Option<f64>,
}

impl ForecastRequest {
    /// Validate the method-specific parameters and the lookback window,
    /// producing the parameterized method to dispatch on.
    pub fn validated_method(&self) -> EngineResult<ForecastMethod> {
        validate_period_days(self.period_days)?;

        match self.method {
            MethodKind::MovingAverage => {
                let window_size = self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
                if window_size < 1 {
                    return Err(EngineError::invalid_parameter(
                        "window_size must be >= 1 for moving_average",
                    ));
                }
                Ok(ForecastMethod::MovingAverage { window_size })
            }
            MethodKind::ExponentialSmoothing => {
                let alpha = self.alpha.unwrap_or(DEFAULT_ALPHA);
                if !(alpha.is_finite() && alpha > 0.0 && alpha <= 1.0) {
                    return Err(EngineError::invalid_parameter(format!(
                        "alpha must be in (0, 1] for exponential_smoothing, got {alpha}"
                    )));
                }
                Ok(ForecastMethod::ExponentialSmoothing { alpha })
            }
            MethodKind::SeasonalDecomposition => Ok(ForecastMethod::SeasonalDecomposition),
        }
    }
}

/// Lookback validation shared by all three entry points.
pub(crate) fn validate_period_days(period_days: u32) -> EngineResult<()> {
    if !(MIN_PERIOD_DAYS..=MAX_PERIOD_DAYS).contains(&period_days) {
        return Err(EngineError::invalid_parameter(format!(
            "period_days must be in [{MIN_PERIOD_DAYS}, {MAX_PERIOD_DAYS}], got {period_days}"
        )));
    }
    Ok(())
}
