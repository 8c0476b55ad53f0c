// Pointwise time gap between two drivers and its derived summary
use crate::domain::grid::DistanceGrid;

/// Tolerance for the soft check of the final delta against the official
/// session gap.
pub const GAP_TOLERANCE_S: f64 = 0.001;

/// One grid position on the delta curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaPoint {
    pub index: usize,
    pub distance_m: f64,
    pub delta_s: f64,
}

/// Signed time gap sampled on the shared grid.
///
/// Sign convention: `dt[i] = t_reference[i] - t_comparison[i]`, so a
/// negative value means the reference driver reached that distance first
/// (is ahead), a positive value means the comparison driver is ahead.
#[derive(Debug, Clone)]
pub struct DeltaSeries {
    grid: DistanceGrid,
    dt_s: Vec<f64>,
}

impl DeltaSeries {
    pub(crate) fn new(grid: DistanceGrid, dt_s: Vec<f64>) -> Self {
        debug_assert_eq!(grid.len(), dt_s.len());
        Self { grid, dt_s }
    }

    pub fn grid(&self) -> &DistanceGrid {
        &self.grid
    }

    pub fn dt_s(&self) -> &[f64] {
        &self.dt_s
    }

    /// Delta at the last grid point; the reconstructed session gap.
    pub fn final_delta_s(&self) -> f64 {
        self.dt_s.last().copied().unwrap_or(0.0)
    }

    /// Smallest and largest delta over the whole grid.
    pub fn range_s(&self) -> (f64, f64) {
        self.dt_s
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Derive the read-only summary statistics.
    pub fn summary(&self) -> DeltaSummary {
        let mut max_positive: Option<DeltaPoint> = None;
        let mut max_negative: Option<DeltaPoint> = None;

        for (i, &dt) in self.dt_s.iter().enumerate() {
            if dt > 0.0 && max_positive.is_none_or(|p| dt > p.delta_s) {
                max_positive = Some(self.point(i));
            }
            if dt < 0.0 && max_negative.is_none_or(|p| dt < p.delta_s) {
                max_negative = Some(self.point(i));
            }
        }

        DeltaSummary {
            final_delta_s: self.final_delta_s(),
            max_positive,
            max_negative,
            zero_crossings: self.zero_crossings(),
        }
    }

    /// Sign changes between non-zero samples. Exact zeros carry no sign of
    /// their own, so a run of zeros between two samples of the same sign
    /// is a single non-crossing segment, and an identical-trace delta
    /// (zero everywhere) reports no crossings at all.
    fn zero_crossings(&self) -> Vec<DeltaPoint> {
        let mut crossings = Vec::new();
        let mut last_sign = 0i8;

        for (i, &dt) in self.dt_s.iter().enumerate() {
            let sign = if dt > 0.0 {
                1
            } else if dt < 0.0 {
                -1
            } else {
                continue;
            };
            if last_sign != 0 && sign != last_sign {
                crossings.push(self.point(i));
            }
            last_sign = sign;
        }

        crossings
    }

    fn point(&self, index: usize) -> DeltaPoint {
        DeltaPoint {
            index,
            distance_m: self.grid.points()[index],
            delta_s: self.dt_s[index],
        }
    }
}

/// Read-only derived statistics over one delta series.
#[derive(Debug, Clone)]
pub struct DeltaSummary {
    pub final_delta_s: f64,
    /// Where the comparison driver was furthest ahead, if ever.
    pub max_positive: Option<DeltaPoint>,
    /// Where the reference driver was furthest ahead, if ever.
    pub max_negative: Option<DeltaPoint>,
    /// Spatial lead changes, in grid order.
    pub zero_crossings: Vec<DeltaPoint>,
}

impl DeltaSummary {
    /// Soft self-check: does the reconstructed final delta agree with the
    /// externally known official session gap? Disagreement is a diagnostic,
    /// never an error.
    pub fn gap_agrees_with(&self, official_gap_s: f64, tolerance_s: f64) -> bool {
        (self.final_delta_s - official_gap_s).abs() <= tolerance_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(dt_s: Vec<f64>) -> DeltaSeries {
        let span = (dt_s.len() - 1) as f64;
        DeltaSeries::new(DistanceGrid::with_span(span, 1.0).unwrap(), dt_s)
    }

    #[test]
    fn test_single_crossing_through_zero_run() {
        let summary = series(vec![-1.0, -1.0, 0.0, 1.0, 1.0]).summary();
        assert_eq!(summary.zero_crossings.len(), 1);
        assert_eq!(summary.zero_crossings[0].index, 3);
    }

    #[test]
    fn test_all_zero_delta_has_no_crossings() {
        let summary = series(vec![0.0; 5]).summary();
        assert!(summary.zero_crossings.is_empty());
        assert_eq!(summary.final_delta_s, 0.0);
    }

    #[test]
    fn test_zero_run_within_same_sign_is_not_a_crossing() {
        let summary = series(vec![-1.0, 0.0, 0.0, -0.5, -0.2]).summary();
        assert!(summary.zero_crossings.is_empty());
    }

    #[test]
    fn test_multiple_lead_changes() {
        let summary = series(vec![-0.2, 0.1, 0.3, -0.1, 0.2]).summary();
        let indices: Vec<usize> = summary.zero_crossings.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![1, 3, 4]);
    }

    #[test]
    fn test_extrema_locate_largest_gaps() {
        let summary = series(vec![-0.2, -0.5, 0.1, 0.4, 0.3]).summary();
        let max_negative = summary.max_negative.unwrap();
        let max_positive = summary.max_positive.unwrap();
        assert_eq!(max_negative.index, 1);
        assert_eq!(max_negative.delta_s, -0.5);
        assert_eq!(max_positive.index, 3);
        assert_eq!(max_positive.delta_s, 0.4);
    }

    #[test]
    fn test_uniform_sign_leaves_opposite_extreme_absent() {
        let summary = series(vec![-0.1, -0.2, -0.3]).summary();
        assert!(summary.max_positive.is_none());
        assert!(summary.max_negative.is_some());
    }

    #[test]
    fn test_gap_agreement_within_tolerance() {
        let summary = series(vec![-0.1, -0.2, -0.3005]).summary();
        assert!(summary.gap_agrees_with(-0.300, GAP_TOLERANCE_S));
        assert!(!summary.gap_agrees_with(-0.310, GAP_TOLERANCE_S));
    }

    #[test]
    fn test_range_spans_min_and_max() {
        let s = series(vec![-0.2, 0.4, 0.1]);
        assert_eq!(s.range_s(), (-0.2, 0.4));
    }
}
