//! Engine error model.
//!
//! Keep this focused on the failures the three engine operations can report.
//! There is no retry or fallback here: a method that cannot honor its
//! precondition fails loudly instead of substituting another method's output.

use thiserror::Error;

/// Result type used across the engine crates.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An out-of-range or malformed request parameter. Reported immediately,
    /// never retried.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few non-zero demand periods for any forecast method. The caller
    /// may widen the lookback window and try again.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The seasonal method specifically lacks two full cycles. Reported
    /// distinctly from generic insufficient data so callers can suggest a
    /// simpler method.
    #[error("insufficient seasonal history: need {required} periods, got {actual}")]
    InsufficientSeasonalHistory { required: usize, actual: usize },

    /// A collaborator read or write failed. Surfaced as-is; retry policy
    /// belongs to the caller.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] anyhow::Error),
}

impl EngineError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    pub fn insufficient_seasonal_history(required: usize, actual: usize) -> Self {
        Self::InsufficientSeasonalHistory { required, actual }
    }
}
