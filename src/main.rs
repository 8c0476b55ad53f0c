// Main entry point - Dependency injection and pipeline execution
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::analysis_service::AnalysisService;
use crate::infrastructure::config::load_analysis_config;
use crate::infrastructure::export;
use crate::infrastructure::timing_api::HttpSessionRepository;
use crate::presentation::cli::{Cli, ExportFormat};
use crate::presentation::report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration
    let cfg = load_analysis_config(&cli.config)?;

    // Wire repository (infrastructure) into the analysis use case
    let repository = Arc::new(HttpSessionRepository::new(
        cfg.timing_base_url.clone(),
        cfg.cache_dir.clone(),
    ));
    let service = AnalysisService::new(repository);

    let result = service.analyse(&cfg).await?;

    print!("{}", report::render(&result, &cfg));

    if matches!(cli.export, Some(ExportFormat::Csv | ExportFormat::Both)) {
        export::export_csv(&result, &cfg)?;
    }
    if matches!(cli.export, Some(ExportFormat::Json | ExportFormat::Both)) {
        export::export_json(&result, &cfg)?;
    }

    tracing::info!("Done");
    Ok(())
}

fn init_tracing(verbose: bool) {
    // Hold noisy HTTP internals at warn unless RUST_LOG overrides them.
    let default_directive = if verbose {
        "debug,reqwest=warn,hyper=warn"
    } else {
        "info,reqwest=warn,hyper=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
