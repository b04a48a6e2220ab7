use chrono::NaiveDateTime;

/// Failures of the alignment and integration core.
///
/// Missing or NaN irradiance is deliberately absent from this list: it is
/// replaced by zero forcing where it is read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("Shape mismatch for {what}: {left} vs {right}")]
    ShapeMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("Insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Series is not strictly ascending at index {index}")]
    UnorderedSeries { index: usize },

    #[error("Forecast starts at {forecast_start} before history ends at {historical_end}")]
    NonMonotonicBoundary {
        historical_end: NaiveDateTime,
        forecast_start: NaiveDateTime,
    },
}
