// Session analysis configuration loaded from YAML
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub session: SessionConfig,
    pub drivers: DriverConfig,
    pub grid: GridConfig,
    pub output: OutputConfig,
    pub corners: Vec<CornerConfig>,
    pub cache_dir: String,
    pub timing_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub year: u16,
    pub circuit: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Officially published gap between the two laps, when known. Used
    /// only for the warning-level convergence check.
    pub official_gap_s: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DriverConfig {
    pub reference: String,
    pub comparison: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub step_metres: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
}

/// A named corner at a distance along the lap, for report annotations.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CornerConfig {
    pub name: String,
    pub distance_m: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            drivers: DriverConfig::default(),
            grid: GridConfig::default(),
            output: OutputConfig::default(),
            corners: default_corners(),
            cache_dir: ".telemetry_cache".to_string(),
            timing_base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            year: 2023,
            circuit: "Monza".to_string(),
            kind: "Q".to_string(),
            official_gap_s: None,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            reference: "VER".to_string(),
            comparison: "SAI".to_string(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { step_metres: 1.0 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

fn default_corners() -> Vec<CornerConfig> {
    [
        ("T1 Grande", 295.0),
        ("T2 Grande", 370.0),
        ("Roggia", 680.0),
        ("Roggia", 750.0),
        ("Lesmo 1", 1430.0),
        ("Lesmo 2", 1650.0),
        ("Ascari", 3450.0),
        ("Ascari", 3560.0),
        ("Ascari", 3640.0),
        ("Parabolica", 4400.0),
    ]
    .into_iter()
    .map(|(name, distance_m)| CornerConfig {
        name: name.to_string(),
        distance_m,
    })
    .collect()
}

/// Load the analysis configuration from a YAML file.
///
/// A missing file is not an error: the defaults describe the Monza 2023
/// reference session.
pub fn load_analysis_config(path: &Path) -> anyhow::Result<AnalysisConfig> {
    if !path.exists() {
        tracing::warn!("Config not found at {}, using defaults", path.display());
        return Ok(AnalysisConfig::default());
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Yaml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_reference_session() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.session.year, 2023);
        assert_eq!(cfg.session.circuit, "Monza");
        assert_eq!(cfg.session.kind, "Q");
        assert_eq!(cfg.drivers.reference, "VER");
        assert_eq!(cfg.drivers.comparison, "SAI");
        assert_eq!(cfg.grid.step_metres, 1.0);
        assert!(cfg.session.official_gap_s.is_none());
        assert!(!cfg.corners.is_empty());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = load_analysis_config(Path::new("/nonexistent/session.yaml")).unwrap();
        assert_eq!(cfg.session.circuit, "Monza");
    }

    #[test]
    fn test_partial_yaml_overrides_keep_remaining_defaults() {
        let yaml = r#"
session:
  year: 2024
  circuit: Suzuka
  type: R
  official_gap_s: -0.013
drivers:
  reference: VER
  comparison: NOR
grid:
  step_metres: 5
"#;
        let settings = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap();
        let cfg: AnalysisConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.session.year, 2024);
        assert_eq!(cfg.session.circuit, "Suzuka");
        assert_eq!(cfg.session.kind, "R");
        assert_eq!(cfg.session.official_gap_s, Some(-0.013));
        assert_eq!(cfg.drivers.comparison, "NOR");
        assert_eq!(cfg.grid.step_metres, 5.0);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.output.dir, "output");
        assert_eq!(cfg.cache_dir, ".telemetry_cache");
    }

    #[test]
    fn test_corner_list_from_yaml() {
        let yaml = r#"
corners:
  - name: "Copse"
    distance_m: 780
  - name: "Maggotts"
    distance_m: 2120
"#;
        let settings = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap();
        let cfg: AnalysisConfig = settings.try_deserialize().unwrap();
        assert_eq!(cfg.corners.len(), 2);
        assert_eq!(cfg.corners[0].name, "Copse");
        assert_eq!(cfg.corners[1].distance_m, 2120.0);
    }
}
