//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(ref input) = cli.input {
        config.paths.input = input.clone();
    }
    if let Some(ref report) = cli.output {
        config.paths.report = report.clone();
    }

    if let Some(count) = cli.workers {
        config.workers.count = count;
    }
    if let Some(capacity) = cli.buffer_capacity {
        config.workers.buffer_capacity = Some(capacity);
    }

    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.compact_json {
        config.output.pretty = false;
    }

    config.runtime.dry_run = cli.dry_run;
    config.runtime.verbosity = cli.verbose;

    config
}

/// Build the effective configuration: defaults, then config file, then CLI
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config.paths.input, PathBuf::from("data.txt"));
        assert_eq!(config.paths.report, PathBuf::from("results.txt"));
        assert_eq!(config.workers.count, DEFAULT_WORKERS);
        assert!(config.workers.buffer_capacity.is_none());
        assert!(config.output.pretty);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [paths]
            input = "flats.txt"
            report = "out/report.txt"

            [workers]
            count = 3
            buffer_capacity = 4

            [output]
            json_output = "summary.json"
            pretty = false
        "#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.paths.input, PathBuf::from("flats.txt"));
        assert_eq!(config.paths.report, PathBuf::from("out/report.txt"));
        assert_eq!(config.workers.count, 3);
        assert_eq!(config.workers.buffer_capacity, Some(4));
        assert_eq!(config.output.json_output, Some(PathBuf::from("summary.json")));
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(parse_toml_string("[workers]\ncount = \"six\"").is_err());
    }

    #[test]
    fn test_parse_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[workers]\ncount = 2").unwrap();

        let config = parse_toml_file(file.path()).unwrap();
        assert_eq!(config.workers.count, 2);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = parse_toml_string("[workers]\ncount = 2\nbuffer_capacity = 9").unwrap();
        let cli = Cli::try_parse_from(["flatrent", "in.txt", "-w", "4", "--dry-run", "-v"]).unwrap();

        let merged = merge_cli_with_config(&cli, config);
        assert_eq!(merged.paths.input, PathBuf::from("in.txt"));
        assert_eq!(merged.paths.report, PathBuf::from("results.txt"));
        assert_eq!(merged.workers.count, 4);
        assert_eq!(merged.workers.buffer_capacity, Some(9));
        assert!(merged.runtime.dry_run);
        assert_eq!(merged.runtime.verbosity, 1);
    }
}
