//! Human-readable text output
//!
//! Two outputs live here: the fixed-width report file and the console summary
//! printed after a run. The report layout is a fixed presentation contract; the
//! widths below must not drift.

use crate::config::{Config, PipelineConfig};
use crate::pipeline::{PipelineOutcome, ResultSet};
use crate::record::Record;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const RULE_WIDTH: usize = 43;
const EMPTY_RULE_WIDTH: usize = 19;
const EMPTY_INDENT: usize = 12;

/// Write the fixed-width report to `path`, replacing any existing file
pub fn write_report(path: &Path, original: &[Record], results: &ResultSet) -> crate::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    render_report(&mut writer, original, results)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = original.len(), matched = results.len(), "report written");
    Ok(())
}

/// Render the report: original data in load order, then sorted results
pub fn render_report<W: Write>(w: &mut W, original: &[Record], results: &ResultSet) -> io::Result<()> {
    writeln!(w, "{:>28}", "Original data")?;
    write_table(w, original.iter())?;

    write!(w, "\n\n\n")?;

    writeln!(w, "{:>25}", "Results")?;
    if results.is_empty() {
        write_no_results(w)
    } else {
        write_table(w, results.records())
    }
}

fn write_table<'a, W, I>(w: &mut W, rows: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a Record>,
{
    write_rule(w)?;
    writeln!(
        w,
        "|{:>3}|{:>22}|{:>8}|{:>6}|{:>8}|",
        "Id", "Street", "Number", "Rent", "Total rent"
    )?;
    write_rule(w)?;

    for (idx, record) in rows.enumerate() {
        writeln!(w, "|{:>3}{:>34}", idx + 1, record.to_string())?;
        write_rule(w)?;
    }
    Ok(())
}

fn write_no_results<W: Write>(w: &mut W) -> io::Result<()> {
    let indent = " ".repeat(EMPTY_INDENT);
    let rule = "-".repeat(EMPTY_RULE_WIDTH);
    writeln!(w, "{}{}", indent, rule)?;
    writeln!(w, "{}|No Results Found!|", indent)?;
    writeln!(w, "{}{}", indent, rule)
}

fn write_rule<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(RULE_WIDTH))
}

/// Print the effective configuration before a run
pub fn print_configuration(config: &Config, pipeline: &PipelineConfig) {
    print!("{}", config);
    println!(
        "  Horizon: {} years ({} months)",
        pipeline.horizon_years,
        pipeline.horizon_months()
    );
    println!("  Filter:  monthly rent in {}", pipeline.rent_range);
}

/// Print a run summary to the console
pub fn print_results(outcome: &PipelineOutcome, loaded: usize, report: &Path) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                       RUN SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    println!("Elapsed Time: {:.3}s", outcome.elapsed.as_secs_f64());
    println!();

    println!("Records:");
    println!("  Loaded:   {}", format_number(loaded));
    println!("  Matched:  {}", format_number(outcome.matched()));
    println!("  Filtered: {}", format_number(loaded.saturating_sub(outcome.matched())));
    println!();

    println!("Intake Buffer:");
    println!("  Relayed:        {}", format_number(outcome.intake.relayed));
    println!("  Peak occupancy: {}", format_number(outcome.intake.peak_occupancy));
    println!();

    println!("Workers:");
    for worker in &outcome.workers {
        println!(
            "  #{:<2} processed {:>6}  forwarded {:>6}",
            worker.worker_id,
            format_number(worker.processed),
            format_number(worker.forwarded)
        );
    }
    println!();

    println!("Report: {}", report.display());
    println!("═══════════════════════════════════════════════════════════");
}

/// Format a number with thousands separators
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
