// Data export: CSV and JSON outputs for external analysis
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;

use crate::application::analysis_service::AnalysisResult;
use crate::infrastructure::config::AnalysisConfig;

fn build_filename(cfg: &AnalysisConfig, ext: &str) -> PathBuf {
    PathBuf::from(&cfg.output.dir).join(format!(
        "{}_{}_{}_vs_{}.{}",
        cfg.session.year,
        cfg.session.circuit.to_lowercase(),
        cfg.drivers.reference,
        cfg.drivers.comparison,
        ext
    ))
}

fn ensure_output_dir(cfg: &AnalysisConfig) -> Result<()> {
    fs::create_dir_all(&cfg.output.dir)
        .with_context(|| format!("failed to create output dir {}", cfg.output.dir))
}

/// Export the aligned channels to CSV, one row per grid point.
pub fn export_csv(result: &AnalysisResult, cfg: &AnalysisConfig) -> Result<PathBuf> {
    ensure_output_dir(cfg)?;
    let path = build_filename(cfg, "csv");
    let (reference, comparison) = (&cfg.drivers.reference, &cfg.drivers.comparison);

    let grid = result.delta.grid();
    let mut out = String::with_capacity(grid.len() * 64);
    out.push_str(&format!(
        "distance_m,speed_{reference}_kmh,speed_{comparison}_kmh,elapsed_{reference}_s,elapsed_{comparison}_s,delta_s\n"
    ));
    for i in 0..grid.len() {
        out.push_str(&format!(
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}\n",
            grid.points()[i],
            result.reference.speed_kmh[i],
            result.comparison.speed_kmh[i],
            result.reference.elapsed_s[i],
            result.comparison.elapsed_s[i],
            result.delta.dt_s()[i],
        ));
    }

    fs::write(&path, out).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("CSV exported: {}", path.display());
    Ok(path)
}

/// Export the aligned channels to JSON with a metadata envelope.
pub fn export_json(result: &AnalysisResult, cfg: &AnalysisConfig) -> Result<PathBuf> {
    ensure_output_dir(cfg)?;
    let path = build_filename(cfg, "json");
    let (reference, comparison) = (&cfg.drivers.reference, &cfg.drivers.comparison);

    let delta = &result.delta;
    let (delta_min, delta_max) = delta.range_s();

    let mut telemetry = serde_json::Map::new();
    telemetry.insert("distance_m".to_string(), json!(delta.grid().points()));
    telemetry.insert(
        format!("speed_{reference}_kmh"),
        json!(result.reference.speed_kmh),
    );
    telemetry.insert(
        format!("speed_{comparison}_kmh"),
        json!(result.comparison.speed_kmh),
    );
    telemetry.insert(
        format!("elapsed_{reference}_s"),
        json!(result.reference.elapsed_s),
    );
    telemetry.insert(
        format!("elapsed_{comparison}_s"),
        json!(result.comparison.elapsed_s),
    );
    telemetry.insert("delta_s".to_string(), json!(delta.dt_s()));

    let payload = json!({
        "metadata": {
            "session": {
                "year": cfg.session.year,
                "circuit": cfg.session.circuit,
                "type": cfg.session.kind,
            },
            "drivers": {
                "reference": reference,
                "comparison": comparison,
            },
            "grid_step_m": cfg.grid.step_metres,
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "total_points": delta.grid().len(),
            "delta_range_s": { "min": delta_min, "max": delta_max },
            "final_gap_s": delta.final_delta_s(),
        },
        "telemetry": telemetry,
    });

    let body = serde_json::to_string_pretty(&payload)?;
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("JSON exported: {}", path.display());
    Ok(path)
}
