//! Configuration validation

use super::*;
use anyhow::Result;
use std::path::Path;

/// Upper bound on the worker pool size
pub const MAX_WORKERS: usize = 256;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_paths(&config.paths)?;
    validate_workers(&config.workers)?;
    validate_output(&config.output, &config.paths)?;

    Ok(())
}

/// Validate input and report paths
pub fn validate_paths(paths: &PathsConfig) -> Result<()> {
    if paths.input.as_os_str().is_empty() {
        anyhow::bail!("input path must not be empty");
    }

    if paths.report.as_os_str().is_empty() {
        anyhow::bail!("report path must not be empty");
    }

    if same_path(&paths.input, &paths.report) {
        anyhow::bail!(
            "report path {} would overwrite the input file",
            paths.report.display()
        );
    }

    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if workers.count == 0 {
        anyhow::bail!("workers.count must be at least 1");
    }

    if workers.count > MAX_WORKERS {
        anyhow::bail!(
            "workers.count must be at most {}, got {}",
            MAX_WORKERS,
            workers.count
        );
    }

    if workers.buffer_capacity == Some(0) {
        anyhow::bail!("workers.buffer_capacity must be at least 1");
    }

    let cpus = num_cpus::get();
    if workers.count > cpus * 4 {
        tracing::warn!(
            workers = workers.count,
            cpus,
            "worker count is far above the available CPU count"
        );
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig, paths: &PathsConfig) -> Result<()> {
    if let Some(ref json) = output.json_output {
        if json.as_os_str().is_empty() {
            anyhow::bail!("json_output path must not be empty");
        }
        if same_path(json, &paths.report) || same_path(json, &paths.input) {
            anyhow::bail!(
                "json_output {} collides with the input or report path",
                json.display()
            );
        }
    }

    Ok(())
}

/// Compare paths, resolving them when both exist on disk
fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_worker_count() {
        let mut workers = WorkerConfig::default();
        assert!(validate_workers(&workers).is_ok());

        workers.count = 0;
        assert!(validate_workers(&workers).is_err());

        workers.count = MAX_WORKERS + 1;
        assert!(validate_workers(&workers).is_err());
    }

    #[test]
    fn test_validate_buffer_capacity() {
        let mut workers = WorkerConfig::default();
        workers.buffer_capacity = Some(0);
        assert!(validate_workers(&workers).is_err());

        workers.buffer_capacity = Some(1);
        assert!(validate_workers(&workers).is_ok());
    }

    #[test]
    fn test_validate_report_overwrites_input() {
        let paths = PathsConfig {
            input: PathBuf::from("flats.txt"),
            report: PathBuf::from("flats.txt"),
        };
        assert!(validate_paths(&paths).is_err());
    }

    #[test]
    fn test_validate_report_overwrites_input_via_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flats.txt");
        std::fs::write(&input, "").unwrap();

        let paths = PathsConfig {
            input: input.clone(),
            report: dir.path().join(".").join("flats.txt"),
        };
        assert!(validate_paths(&paths).is_err());
    }

    #[test]
    fn test_validate_json_output_collision() {
        let paths = PathsConfig::default();
        let output = OutputConfig {
            json_output: Some(paths.report.clone()),
            pretty: true,
        };
        assert!(validate_output(&output, &paths).is_err());

        let output = OutputConfig {
            json_output: Some(PathBuf::from("summary.json")),
            pretty: true,
        };
        assert!(validate_output(&output, &paths).is_ok());
    }
}
