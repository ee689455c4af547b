// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for flag parsing and logging configuration
//!
//! These tests verify flag combinations and their effect on the resolved
//! configuration.

use clap::Parser;
use gotest_report::config::{Config, ConfigError};
use std::path::PathBuf;
use tracing::Level;

// ============================================================================
// Short vs long flag equivalence tests
// ============================================================================

#[test]
fn test_short_and_long_input_equivalent() {
    let short = Config::try_parse_from(["gotest-report", "-i", "in.json"]).expect("short parse");
    let long =
        Config::try_parse_from(["gotest-report", "--input", "in.json"]).expect("long parse");

    assert_eq!(short.input, long.input);
    assert_eq!(short.input, Some(PathBuf::from("in.json")));
}

#[test]
fn test_short_and_long_output_equivalent() {
    let short = Config::try_parse_from(["gotest-report", "-o", "out.md"]).expect("short parse");
    let long =
        Config::try_parse_from(["gotest-report", "--output", "out.md"]).expect("long parse");

    assert_eq!(short.output_path(), long.output_path());
    assert_eq!(short.output_path(), PathBuf::from("out.md"));
}

#[test]
fn test_no_flags_uses_defaults() {
    let config = Config::try_parse_from(["gotest-report"]).expect("parse should succeed");
    assert_eq!(config.output_path(), PathBuf::from("test-report.md"));
    assert_eq!(config.log_level(), Level::INFO);
}

// ============================================================================
// Logging flag tests
// ============================================================================

#[test]
fn test_verbose_sets_debug_log_level() {
    let config = Config::try_parse_from(["gotest-report", "-v"]).expect("parse should succeed");
    assert!(config.verbose);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_sets_warn_log_level() {
    let config =
        Config::try_parse_from(["gotest-report", "--quiet"]).expect("parse should succeed");
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_combined_vq_flags() {
    let config = Config::try_parse_from(["gotest-report", "-vq"]).expect("parse should succeed");
    assert!(config.verbose);
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    let result = Config::try_parse_from(["gotest-report", "--verbose=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

// ============================================================================
// Version and help
// ============================================================================

#[test]
fn test_version_flag() {
    let err = Config::try_parse_from(["gotest-report", "--version"]).expect_err("version exits");
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    assert!(err.to_string().contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_rejected() {
    let result = Config::try_parse_from(["gotest-report", "--format", "html"]);
    assert!(result.is_err());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_missing_input_file() {
    let config = Config::try_parse_from(["gotest-report", "-i", "/nonexistent/go-test.json"])
        .expect("parse should succeed");
    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InputNotFound(_)));
    assert!(err.to_string().contains("/nonexistent/go-test.json"));
}
