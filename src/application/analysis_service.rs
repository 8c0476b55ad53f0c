// Analysis service - Use case wiring ingestion to the resampling core
use std::sync::Arc;

use anyhow::Context;

use crate::application::delta_engine;
use crate::application::session_repository::{SessionQuery, SessionRepository};
use crate::application::transformer;
use crate::domain::delta::{DeltaSeries, GAP_TOLERANCE_S};
use crate::domain::resampled::ResampledTrace;
use crate::infrastructure::config::AnalysisConfig;

/// Everything the report and export consumers need: both distance-domain
/// traces and the delta between them, all on one grid.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub reference: ResampledTrace,
    pub comparison: ResampledTrace,
    pub delta: DeltaSeries,
}

#[derive(Clone)]
pub struct AnalysisService {
    repository: Arc<dyn SessionRepository>,
}

impl AnalysisService {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Run the full pipeline for the configured driver pair: fetch the
    /// session, pick each driver's fastest lap, resample both onto the
    /// shared distance grid, and compute the delta.
    pub async fn analyse(&self, cfg: &AnalysisConfig) -> anyhow::Result<AnalysisResult> {
        let query = SessionQuery {
            year: cfg.session.year,
            circuit: cfg.session.circuit.clone(),
            session_type: cfg.session.kind.clone(),
        };
        tracing::info!(
            "Loading {} {} {}",
            query.year,
            query.circuit,
            query.session_type
        );
        let session = self.repository.fetch_session(&query).await?;
        tracing::debug!("Session contains {} laps", session.lap_count());

        let reference_lap = session
            .fastest_lap(&cfg.drivers.reference)
            .with_context(|| format!("no laps found for driver {}", cfg.drivers.reference))?;
        let comparison_lap = session
            .fastest_lap(&cfg.drivers.comparison)
            .with_context(|| format!("no laps found for driver {}", cfg.drivers.comparison))?;
        tracing::info!(
            "{} fastest: {:.3}s (lap {})",
            reference_lap.driver,
            reference_lap.lap_time_s,
            reference_lap.number
        );
        tracing::info!(
            "{} fastest: {:.3}s (lap {})",
            comparison_lap.driver,
            comparison_lap.lap_time_s,
            comparison_lap.number
        );

        tracing::info!(
            "Resampling telemetry to distance domain (step={}m)",
            cfg.grid.step_metres
        );
        let grid = transformer::make_grid(
            &reference_lap.trace,
            &comparison_lap.trace,
            cfg.grid.step_metres,
        )?;
        let reference = transformer::resample(&reference_lap.trace, &grid)?;
        let comparison = transformer::resample(&comparison_lap.trace, &grid)?;
        let delta = delta_engine::compute_delta(&reference, &comparison)?;

        let (lo, hi) = delta.range_s();
        tracing::info!(
            "Grid: {} points | dt range: [{:.3}s, {:.3}s]",
            grid.len(),
            lo,
            hi
        );

        let summary = delta.summary();
        for crossing in &summary.zero_crossings {
            tracing::debug!(
                "Lead change at {:.0} m (grid index {})",
                crossing.distance_m,
                crossing.index
            );
        }
        if let Some(official_gap_s) = cfg.session.official_gap_s {
            if !summary.gap_agrees_with(official_gap_s, GAP_TOLERANCE_S) {
                tracing::warn!(
                    "final delta {:.4}s disagrees with official gap {:.4}s",
                    summary.final_delta_s,
                    official_gap_s
                );
            }
        }

        Ok(AnalysisResult {
            reference,
            comparison,
            delta,
        })
    }
}
