// Shared distance grid: the common sampling basis for both drivers
use crate::domain::errors::AnalysisError;

/// Evenly spaced distances covering [0, span], inclusive of the upper
/// bound when it lands on a step. Immutable once built; two resampled
/// traces only compare when they carry an equal grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGrid {
    step_m: f64,
    points: Vec<f64>,
}

impl DistanceGrid {
    /// Build a grid from 0 to `span_m` with the given step.
    ///
    /// Fails when the span cannot hold at least two points (span below one
    /// step, non-positive, or not finite).
    pub fn with_span(span_m: f64, step_m: f64) -> Result<Self, AnalysisError> {
        if !span_m.is_finite() || !(step_m > 0.0) || span_m < step_m {
            return Err(AnalysisError::EmptyGrid { span_m, step_m });
        }

        // The epsilon keeps float division from dropping the final point
        // when span_m is an exact multiple of step_m.
        let intervals = (span_m / step_m + 1e-9).floor() as usize;
        let points = (0..=intervals).map(|i| i as f64 * step_m).collect();

        Ok(Self { step_m, points })
    }

    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Last grid point; the furthest distance the analysis covers.
    pub fn upper_bound_m(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }
}
