// Distance-domain telemetry: one driver's channels sampled on the shared grid
use crate::domain::grid::DistanceGrid;

/// Interpolated elapsed-time and speed channels on a distance grid.
///
/// Both channel vectors have the same length as the grid, with no gaps.
/// Elapsed time is non-decreasing when the source trace was valid.
#[derive(Debug, Clone)]
pub struct ResampledTrace {
    pub driver: String,
    pub grid: DistanceGrid,
    pub elapsed_s: Vec<f64>,
    pub speed_kmh: Vec<f64>,
}
