// Core error kinds for the resampling and delta pipeline
use thiserror::Error;

/// Errors surfaced by the domain transformer and delta engine.
///
/// Every kind indicates bad input data, not a transient failure. The core
/// performs no partial recovery; callers receive the error unhandled.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Trace cannot define a function from distance to time.
    #[error("invalid trace for {driver}: {reason}")]
    InvalidTrace { driver: String, reason: String },

    /// Query distance strictly outside the observed range of a trace.
    /// Extrapolated lap time or speed is physically meaningless.
    #[error("distance {distance_m:.3} m outside observed range [{min_m:.3} m, {max_m:.3} m]")]
    OutOfRange {
        distance_m: f64,
        min_m: f64,
        max_m: f64,
    },

    /// Grid span too small to hold at least two points.
    #[error("cannot build grid: span {span_m:.3} m with step {step_m} m")]
    EmptyGrid { span_m: f64, step_m: f64 },

    /// Two resampled traces were not built on the same grid.
    #[error("resampled traces were built on different grids")]
    GridMismatch,
}
