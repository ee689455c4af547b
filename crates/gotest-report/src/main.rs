// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-report: Markdown reports from `go test -json` output
//!
//! Example:
//!   go test -json ./... | gotest-report --output test-report.md

use std::process::ExitCode;

use clap::Parser;
use gotest_report::app;
use gotest_report::config::Config;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the result line
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match app::run(&config) {
        Ok(output) => {
            println!("Report generated successfully: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
