// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report generation pipeline
//!
//! Reads `go test -json` output from a file or stdin, aggregates it, renders
//! the Markdown report and writes it to the configured output path.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Local};
use gotest_events::aggregate;
use tracing::{debug, info};

use crate::config::Config;
use crate::render::MarkdownReport;

/// Aggregate a `go test -json` stream and render it as Markdown
///
/// # Errors
///
/// Returns an error if the stream cannot be read or contains a malformed line.
pub fn generate_report<R: BufRead>(
    reader: R,
    generated_at: DateTime<Local>,
) -> anyhow::Result<String> {
    let run = aggregate(reader).context("Error processing test events")?;
    info!(
        total = run.summary.total,
        passed = run.summary.passed,
        failed = run.summary.failed,
        skipped = run.summary.skipped,
        "Aggregated test events"
    );

    MarkdownReport::new(&run, generated_at)
        .render()
        .context("Error rendering report")
}

/// Run the full pipeline described by `config`, returning the report path
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be
/// read or decoded, or the report cannot be written.
pub fn run(config: &Config) -> anyhow::Result<PathBuf> {
    config.validate()?;
    let generated_at = Local::now();

    let markdown = match &config.input {
        Some(path) => {
            debug!(input = %path.display(), "Reading test events from file");
            let file = File::open(path)
                .with_context(|| format!("Error opening input file {}", path.display()))?;
            generate_report(BufReader::new(file), generated_at)?
        }
        None => {
            debug!("Reading test events from stdin");
            generate_report(io::stdin().lock(), generated_at)?
        }
    };

    let output = config.output_path();
    fs::write(&output, markdown)
        .with_context(|| format!("Error writing report to {}", output.display()))?;
    info!(output = %output.display(), "Report written");

    Ok(output)
}
