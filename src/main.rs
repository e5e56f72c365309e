//! flatrent CLI entry point

use anyhow::{Context, Result};
use flatrent::config::{cli::Cli, toml as config_toml, validator, PipelineConfig};
use flatrent::output::{json, text};
use flatrent::pipeline::Pipeline;
use flatrent::{loader, util};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;
    let config = config_toml::load_config(&cli)?;
    util::logging::init_logging(config.runtime.verbosity);

    println!("flatrent v{}", env!("CARGO_PKG_VERSION"));
    println!();

    validator::validate_config(&config).context("Configuration validation failed")?;
    let pipeline_config = PipelineConfig::from(&config);

    text::print_configuration(&config, &pipeline_config);
    println!();

    let records = loader::load(&config.paths.input)
        .with_context(|| format!("Failed to load input file: {}", config.paths.input.display()))?;
    let loaded = records.len();
    tracing::info!(records = loaded, path = %config.paths.input.display(), "input loaded");

    if config.runtime.dry_run {
        println!("Dry run mode - {} record(s) loaded and validated successfully", loaded);
        return Ok(());
    }

    // The report shows the records as loaded, so feed the pipeline a copy.
    let outcome = Pipeline::new(pipeline_config)
        .run(records.clone())
        .context("Pipeline failed")?;

    text::write_report(&config.paths.report, &records, &outcome.results)?;

    if let Some(ref path) = config.output.json_output {
        let summary = json::build_summary(&outcome, &pipeline_config, loaded);
        json::write_json_output(path, &summary, config.output.pretty)?;
        tracing::info!(path = %path.display(), "JSON summary written");
    }

    text::print_results(&outcome, loaded, &config.paths.report);
    Ok(())
}
