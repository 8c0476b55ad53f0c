// CLI argument definitions
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Spatial telemetry reconstruction for timed motorsport sessions.
#[derive(Debug, Parser)]
#[command(
    name = "lap-delta",
    version,
    about = "Distance-domain delta analysis between two drivers' fastest laps"
)]
pub struct Cli {
    /// Path to the session configuration file.
    #[arg(long, default_value = "configs/monza_2023.yaml")]
    pub config: PathBuf,

    /// Export the resampled data in the specified format.
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["lap-delta"]);
        assert_eq!(cli.config, PathBuf::from("configs/monza_2023.yaml"));
        assert!(cli.export.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parses_export_format() {
        let cli = Cli::parse_from(["lap-delta", "--export", "both"]);
        assert_eq!(cli.export, Some(ExportFormat::Both));

        let cli = Cli::parse_from(["lap-delta", "--export", "csv", "-v"]);
        assert_eq!(cli.export, Some(ExportFormat::Csv));
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_export_format() {
        assert!(Cli::try_parse_from(["lap-delta", "--export", "xml"]).is_err());
    }
}
