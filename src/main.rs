//! nestgen CLI entrypoint
//! Parses the blueprint argument and runs one generation pass.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use nestgen::application::{GenerateProjectRequest, GenerateProjectUseCase};
use nestgen::core::Config;
use nestgen::generation::TracingReporter;
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nestgen")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Environment:\n  NESTGEN_TEMPLATE_DIR  template directory (default: templates)\n  NESTGEN_OUTPUT_DIR    output root (default: nest_project)"
)]
struct Cli {
    /// Blueprint file (YAML, or JSON when it ends in .json)
    #[arg(value_name = "BLUEPRINT", default_value = nestgen::core::config::DEFAULT_BLUEPRINT_FILE)]
    blueprint: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG wins; INFO otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = Config::resolve(Some(cli.blueprint.as_path())).context("Invalid configuration")?;
    info!(
        blueprint = %config.blueprint_path.display(),
        templates = %config.template_dir.display(),
        output = %config.output_dir.display(),
        "Starting nestgen"
    );

    let use_case = GenerateProjectUseCase::with_filesystem(Arc::new(TracingReporter::new()));
    let response = use_case
        .execute(GenerateProjectRequest::from(config))
        .context("Generation failed")?;

    let summary = &response.summary;
    info!(
        "✅ Generated {} with {} module(s) into {} ({} file(s) written, {} failed)",
        summary.root_name,
        summary.module_count(),
        response.output_path.display(),
        summary.artifacts_written,
        summary.artifacts_failed
    );

    Ok(())
}
