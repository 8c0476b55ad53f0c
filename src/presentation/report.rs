// Plain-text session report for stdout
use std::cmp::Ordering;
use std::fmt::Write;

use crate::application::analysis_service::AnalysisResult;
use crate::domain::delta::DeltaPoint;
use crate::infrastructure::config::{AnalysisConfig, CornerConfig};

/// A corner annotates a report position only when it lies this close.
const CORNER_MATCH_RADIUS_M: f64 = 200.0;

/// Render the delta summary as a human-readable report.
pub fn render(result: &AnalysisResult, cfg: &AnalysisConfig) -> String {
    let summary = result.delta.summary();
    let (reference, comparison) = (&result.reference.driver, &result.comparison.driver);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} vs {} | {} {} {}",
        reference, comparison, cfg.session.year, cfg.session.circuit, cfg.session.kind
    );
    let _ = writeln!(
        out,
        "Analysed {} points at {} m spacing over {:.0} m",
        result.delta.grid().len(),
        result.delta.grid().step_m(),
        result.delta.grid().upper_bound_m()
    );

    let final_delta_s = summary.final_delta_s;
    let leader = if final_delta_s < 0.0 { reference } else { comparison };
    let _ = writeln!(
        out,
        "Final gap: {:+.3}s ({} ahead at the line)",
        final_delta_s, leader
    );

    if let Some(p) = summary.max_negative {
        let _ = writeln!(
            out,
            "{} furthest ahead: {:+.3}s at {:.0} m{}",
            reference,
            p.delta_s,
            p.distance_m,
            corner_label(&cfg.corners, p.distance_m)
        );
    }
    if let Some(p) = summary.max_positive {
        let _ = writeln!(
            out,
            "{} furthest ahead: {:+.3}s at {:.0} m{}",
            comparison,
            p.delta_s,
            p.distance_m,
            corner_label(&cfg.corners, p.distance_m)
        );
    }

    if summary.zero_crossings.is_empty() {
        let _ = writeln!(out, "No lead changes");
    } else {
        let _ = writeln!(out, "Lead changes:");
        for crossing in &summary.zero_crossings {
            let _ = writeln!(
                out,
                "  {}",
                describe_crossing(crossing, reference, comparison, &cfg.corners)
            );
        }
    }

    out
}

fn describe_crossing(
    crossing: &DeltaPoint,
    reference: &str,
    comparison: &str,
    corners: &[CornerConfig],
) -> String {
    let gainer = if crossing.delta_s < 0.0 {
        reference
    } else {
        comparison
    };
    format!(
        "{:.0} m{}: {} takes the lead",
        crossing.distance_m,
        corner_label(corners, crossing.distance_m),
        gainer
    )
}

fn corner_label(corners: &[CornerConfig], distance_m: f64) -> String {
    match nearest_corner(corners, distance_m) {
        Some(corner) => format!(" (near {})", corner.name),
        None => String::new(),
    }
}

fn nearest_corner(corners: &[CornerConfig], distance_m: f64) -> Option<&CornerConfig> {
    corners
        .iter()
        .filter(|c| (c.distance_m - distance_m).abs() <= CORNER_MATCH_RADIUS_M)
        .min_by(|a, b| {
            (a.distance_m - distance_m)
                .abs()
                .partial_cmp(&(b.distance_m - distance_m).abs())
                .unwrap_or(Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delta::DeltaSeries;
    use crate::domain::grid::DistanceGrid;
    use crate::domain::resampled::ResampledTrace;

    fn result_with_delta(dt_s: Vec<f64>, step_m: f64) -> AnalysisResult {
        let span = (dt_s.len() - 1) as f64 * step_m;
        let grid = DistanceGrid::with_span(span, step_m).unwrap();
        let elapsed: Vec<f64> = (0..grid.len()).map(|i| i as f64).collect();
        let reference = ResampledTrace {
            driver: "VER".to_string(),
            grid: grid.clone(),
            elapsed_s: elapsed.clone(),
            speed_kmh: vec![200.0; grid.len()],
        };
        let comparison = ResampledTrace {
            driver: "SAI".to_string(),
            grid: grid.clone(),
            elapsed_s: elapsed,
            speed_kmh: vec![200.0; grid.len()],
        };
        AnalysisResult {
            reference,
            comparison,
            delta: DeltaSeries::new(grid, dt_s),
        }
    }

    #[test]
    fn test_nearest_corner_within_radius() {
        let cfg = AnalysisConfig::default();
        let corner = nearest_corner(&cfg.corners, 690.0).unwrap();
        assert_eq!(corner.name, "Roggia");
        assert_eq!(corner.distance_m, 680.0);
    }

    #[test]
    fn test_no_corner_outside_radius() {
        let cfg = AnalysisConfig::default();
        assert!(nearest_corner(&cfg.corners, 2500.0).is_none());
    }

    #[test]
    fn test_report_names_leader_at_the_line() {
        let cfg = AnalysisConfig::default();
        let report = render(&result_with_delta(vec![0.0, -0.1, -0.2], 100.0), &cfg);
        assert!(report.contains("VER ahead at the line"));
        assert!(report.contains("No lead changes"));
    }

    #[test]
    fn test_report_annotates_lead_change_with_corner() {
        let cfg = AnalysisConfig::default();
        // Sign flips at index 7 of a 100 m grid: 700 m, next to Roggia.
        let dt = vec![-0.1, -0.1, -0.1, -0.1, -0.1, -0.1, -0.1, 0.1, 0.1];
        let report = render(&result_with_delta(dt, 100.0), &cfg);
        assert!(report.contains("Lead changes:"));
        assert!(report.contains("700 m (near Roggia): SAI takes the lead"));
    }
}
