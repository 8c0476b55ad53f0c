// Domain transformer: time-indexed traces onto a shared distance grid
use crate::domain::errors::AnalysisError;
use crate::domain::grid::DistanceGrid;
use crate::domain::resampled::ResampledTrace;
use crate::domain::telemetry::TelemetryTrace;

/// Piecewise-linear map from distance to one telemetry channel.
///
/// Knots are a trace's strictly increasing sample distances. Queries
/// strictly outside the knot range are refused rather than extrapolated.
#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    knots_m: Vec<f64>,
    values: Vec<f64>,
}

impl LinearInterpolant {
    fn new(knots_m: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(knots_m.len(), values.len());
        debug_assert!(knots_m.len() >= 2);
        Self { knots_m, values }
    }

    /// First knot distance.
    pub fn min_m(&self) -> f64 {
        self.knots_m[0]
    }

    /// Last knot distance.
    pub fn max_m(&self) -> f64 {
        self.knots_m[self.knots_m.len() - 1]
    }

    /// Evaluate the channel at a query distance.
    ///
    /// Exact knot distances reproduce the sample value; distances between
    /// two knots `d0 < d1` blend linearly with `(d - d0) / (d1 - d0)`.
    pub fn eval(&self, distance_m: f64) -> Result<f64, AnalysisError> {
        let (min_m, max_m) = (self.min_m(), self.max_m());
        if !(distance_m >= min_m && distance_m <= max_m) {
            return Err(AnalysisError::OutOfRange {
                distance_m,
                min_m,
                max_m,
            });
        }

        // Largest segment start i with knots[i] <= d, clamped so a query
        // at the final knot lands on the last segment.
        let i = self
            .knots_m
            .partition_point(|&k| k <= distance_m)
            .saturating_sub(1)
            .min(self.knots_m.len() - 2);

        let (d0, d1) = (self.knots_m[i], self.knots_m[i + 1]);
        let alpha = (distance_m - d0) / (d1 - d0);
        Ok(self.values[i] + (self.values[i + 1] - self.values[i]) * alpha)
    }
}

/// Distance-to-time and distance-to-speed interpolants for one trace.
#[derive(Debug, Clone)]
pub struct TraceInterpolants {
    pub time: LinearInterpolant,
    pub speed: LinearInterpolant,
}

/// Build both channel interpolants over a trace's sample distances.
///
/// The trace's constructor has already de-duplicated distances and
/// enforced strict monotonicity, so the knot domain is well formed here.
pub fn build(trace: &TelemetryTrace) -> TraceInterpolants {
    let knots_m: Vec<f64> = trace.samples().iter().map(|s| s.distance_m).collect();
    let time_s = trace.samples().iter().map(|s| s.time_s).collect();
    let speed_kmh = trace.samples().iter().map(|s| s.speed_kmh).collect();

    TraceInterpolants {
        time: LinearInterpolant::new(knots_m.clone(), time_s),
        speed: LinearInterpolant::new(knots_m, speed_kmh),
    }
}

/// Shared grid for a driver pair: spans from 0 to the shorter trace's
/// furthest recorded distance.
pub fn make_grid(
    a: &TelemetryTrace,
    b: &TelemetryTrace,
    step_m: f64,
) -> Result<DistanceGrid, AnalysisError> {
    let span_m = a.max_distance_m().min(b.max_distance_m());
    DistanceGrid::with_span(span_m, step_m)
}

/// Evaluate both channel interpolants at every grid point.
///
/// This is the step that converts a time-domain series into a
/// position-domain series; everything downstream operates in the shared
/// distance coordinate system.
pub fn resample(
    trace: &TelemetryTrace,
    grid: &DistanceGrid,
) -> Result<ResampledTrace, AnalysisError> {
    let interpolants = build(trace);

    let mut elapsed_s = Vec::with_capacity(grid.len());
    let mut speed_kmh = Vec::with_capacity(grid.len());
    for &distance_m in grid.points() {
        elapsed_s.push(interpolants.time.eval(distance_m)?);
        speed_kmh.push(interpolants.speed.eval(distance_m)?);
    }

    Ok(ResampledTrace {
        driver: trace.driver().to_string(),
        grid: grid.clone(),
        elapsed_s,
        speed_kmh,
    })
}
