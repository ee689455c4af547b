// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! `go test -json` event records
//!
//! Each line of `go test -json` output is one [`TestEvent`]. Field names are
//! accepted both in Go's exported form (`"Action"`) and lowercase
//! (`"action"`); missing fields take their zero value.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AggregateError;

/// Lifecycle action carried by an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The test has started running
    Run,
    /// The test has been paused
    Pause,
    /// The test has continued running
    Cont,
    /// The test passed
    Pass,
    /// The benchmark printed log output but did not fail
    Bench,
    /// The test or benchmark failed
    Fail,
    /// The test was skipped
    Skip,
    /// The test printed output
    Output,
    /// Any action this tool does not know about (`start`, ...)
    #[default]
    #[serde(other)]
    Other,
}

impl Action {
    /// Whether this action creates a result entry on first sight
    #[must_use]
    pub fn is_lifecycle(self) -> bool {
        matches!(self, Self::Run | Self::Pass | Self::Fail | Self::Skip)
    }
}

/// A single event from `go test -json` output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestEvent {
    /// When the event was recorded
    #[serde(default, alias = "Time")]
    pub time: Option<DateTime<Utc>>,
    /// What happened
    #[serde(default, alias = "Action")]
    pub action: Action,
    /// Fully-qualified test name; empty for package-level events
    #[serde(default, alias = "Test")]
    pub test: String,
    /// Package under test
    #[serde(default, alias = "Package")]
    pub package: String,
    /// Output fragment (only for `output` events)
    #[serde(default, alias = "Output")]
    pub output: Option<String>,
    /// Elapsed seconds (only for `pass` and `fail` events)
    #[serde(default, alias = "Elapsed")]
    pub elapsed: Option<f64>,
}

impl TestEvent {
    /// Decode one line of `go test -json` output
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::Decode` tagged with `line` if the text is not a
    /// valid event.
    pub fn from_line(text: &str, line: usize) -> Result<Self, AggregateError> {
        Self::from_slice(text.as_bytes(), line)
    }

    /// Decode one raw line of `go test -json` output
    ///
    /// Invalid UTF-8 is a decode error for that line, not a read error.
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::Decode` tagged with `line` if the bytes are not
    /// a valid event.
    pub fn from_slice(bytes: &[u8], line: usize) -> Result<Self, AggregateError> {
        serde_json::from_slice(bytes).map_err(|source| AggregateError::Decode { line, source })
    }

    /// Whether the event belongs to the package rather than a test
    #[must_use]
    pub fn is_package_level(&self) -> bool {
        self.test.is_empty()
    }

    /// Event timestamp, treating Go's zero time as absent
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.time.filter(|t| t.year() > 1)
    }

    /// Elapsed seconds, if reported and positive
    #[must_use]
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.elapsed.filter(|e| *e > 0.0)
    }

    /// The output text with one trailing newline removed, or `None` if nothing remains
    #[must_use]
    pub fn output_fragment(&self) -> Option<&str> {
        let text = self.output.as_deref()?;
        let text = text.strip_suffix('\n').unwrap_or(text);
        (!text.is_empty()).then_some(text)
    }
}
