//! Input file loading
//!
//! Parses the semicolon-delimited property list into [`Record`]s. Each non-blank
//! line must hold exactly three fields: `street;unit_number;monthly_rent`.
//! Any malformed line aborts the whole load.

use crate::record::Record;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field delimiter used by the input format
pub const FIELD_DELIMITER: char = ';';

/// Errors raised while loading the input file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open input file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Load all records from `path` in file order
pub fn load(path: &Path) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    read_records(BufReader::new(file)).map_err(|err| match err {
        LoadError::Read { source, .. } => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse records from any buffered reader
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, LoadError> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read {
            path: PathBuf::new(),
            source,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let position = records.len();
        records.push(parse_line(&line, idx + 1, position)?);
    }

    tracing::debug!(count = records.len(), "loaded records");
    Ok(records)
}

/// Parse a single input line (1-based `line` for error messages)
pub fn parse_line(line: &str, line_no: usize, position: usize) -> Result<Record, LoadError> {
    let malformed = |reason: String| LoadError::Malformed { line: line_no, reason };

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != 3 {
        return Err(malformed(format!(
            "expected 3 fields separated by '{}', found {}",
            FIELD_DELIMITER,
            fields.len()
        )));
    }

    let street = fields[0];
    let unit_number: i64 = fields[1]
        .trim()
        .parse()
        .map_err(|e| malformed(format!("invalid unit number '{}': {}", fields[1], e)))?;
    let monthly_rent: f64 = fields[2]
        .trim()
        .parse()
        .map_err(|e| malformed(format!("invalid monthly rent '{}': {}", fields[2], e)))?;

    if !monthly_rent.is_finite() || monthly_rent < 0.0 {
        return Err(malformed(format!(
            "monthly rent must be a non-negative number, got {}",
            fields[2]
        )));
    }

    Ok(Record::new(street, unit_number, monthly_rent, position))
}
