// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Event aggregation
//!
//! This module turns the flat `go test -json` event stream into a tree of
//! [`TestResult`]s keyed by test name, plus summary counters over root tests.
//!
//! Aggregation runs in two phases. [`Aggregator::process_event`] creates and
//! updates entries and buffers output as events arrive; [`Aggregator::finish`]
//! attaches the buffered output and computes root ordering, package groups
//! and counters.
//!
//! # Example
//!
//! ```
//! use gotest_events::aggregate::aggregate_str;
//!
//! let input = r#"{"Action":"run","Test":"TestA"}
//! {"Action":"pass","Test":"TestA","Elapsed":1.5}"#;
//! let run = aggregate_str(input).unwrap();
//! assert_eq!(run.summary.passed, 1);
//! assert_eq!(run.summary.total_duration_secs, 1.5);
//! ```

use crate::error::AggregateError;
use crate::event::{Action, TestEvent};
use crate::result::{TestResult, TestStatus, parent_name};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;
use tracing::{debug, warn};

/// Package group used for tests whose events carry no package
pub const UNKNOWN_PACKAGE: &str = "unknown";

// ============================================================================
// Aggregated model
// ============================================================================

/// Summary counters over root tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Root tests seen
    pub total: usize,
    /// Root tests that passed
    pub passed: usize,
    /// Root tests that failed
    pub failed: usize,
    /// Root tests that were skipped
    pub skipped: usize,
    /// Sum of root test durations in seconds
    pub total_duration_secs: f64,
}

impl RunSummary {
    fn record(&mut self, result: &TestResult) {
        self.total += 1;
        self.total_duration_secs += result.duration_secs;
        match result.status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
            TestStatus::Unknown => {}
        }
    }

    /// Root tests that never reached a terminal status
    #[must_use]
    pub fn unknown(&self) -> usize {
        self.total
            .saturating_sub(self.passed + self.failed + self.skipped)
    }

    /// Percentage of root tests that passed, or `None` for an empty run
    #[must_use]
    pub fn pass_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.passed as f64 / self.total as f64 * 100.0)
    }
}

/// Aggregated results of one test run
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestRun {
    /// Every test and subtest seen, keyed by full name
    pub results: BTreeMap<String, TestResult>,
    /// Root test names, sorted ascending
    pub root_names: Vec<String>,
    /// Root test names grouped by package, each group sorted
    pub package_groups: BTreeMap<String, Vec<String>>,
    /// Counters over root tests
    pub summary: RunSummary,
}

impl TestRun {
    /// Look up a result by full name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.get(name)
    }

    /// Whether the stream contained no tests at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Check if no root test failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    /// Root results in name order
    pub fn roots(&self) -> impl Iterator<Item = &TestResult> {
        self.root_names.iter().filter_map(|name| self.results.get(name))
    }

    /// Direct subtests of `name`, sorted by name
    #[must_use]
    pub fn children_of(&self, name: &str) -> Vec<&TestResult> {
        let mut children: Vec<&TestResult> = self
            .results
            .get(name)
            .map(|r| r.children.iter().filter_map(|c| self.results.get(c)).collect())
            .unwrap_or_default();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    /// Root tests that failed or have a failed direct subtest
    #[must_use]
    pub fn failed_roots(&self) -> Vec<&TestResult> {
        self.roots()
            .filter(|r| r.failed() || self.children_of(&r.name).iter().any(|c| c.failed()))
            .collect()
    }

    /// All results, longest first (ties broken by name)
    #[must_use]
    pub fn durations_ranked(&self) -> Vec<&TestResult> {
        let mut ranked: Vec<&TestResult> = self.results.values().collect();
        ranked.sort_by(|a, b| {
            b.duration_secs
                .total_cmp(&a.duration_secs)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Incremental aggregator for `go test -json` output
#[derive(Debug, Default)]
pub struct Aggregator {
    results: BTreeMap<String, TestResult>,
    start_times: HashMap<String, DateTime<Utc>>,
    pending_output: HashMap<String, Vec<String>>,
    lines_read: usize,
    first_blank: Option<usize>,
}

impl Aggregator {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines processed so far, blank lines included
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Results accumulated so far
    #[must_use]
    pub fn results(&self) -> &BTreeMap<String, TestResult> {
        &self.results
    }

    /// Decode and process a single line of output
    ///
    /// See [`Aggregator::process_bytes`].
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::Decode` if the line is not a valid event.
    pub fn process_line(&mut self, line: &str) -> Result<(), AggregateError> {
        self.process_bytes(line.as_bytes())
    }

    /// Decode and process a single raw line of output
    ///
    /// Blank lines are only accepted at the end of the stream: a blank line
    /// followed by another event fails with the blank line's number.
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::Decode` if the line is not a valid event or an
    /// earlier blank line turns out not to be trailing.
    pub fn process_bytes(&mut self, line: &[u8]) -> Result<(), AggregateError> {
        self.lines_read += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            self.first_blank.get_or_insert(self.lines_read);
            return Ok(());
        }
        if let Some(blank) = self.first_blank.take() {
            // Decoding the empty line produces its EOF error.
            return TestEvent::from_slice(b"", blank).map(drop);
        }

        let event = TestEvent::from_slice(line, self.lines_read)?;
        self.process_event(event);
        Ok(())
    }

    /// Apply a decoded event
    pub fn process_event(&mut self, event: TestEvent) {
        if event.is_package_level() {
            return;
        }

        if event.action.is_lifecycle() {
            self.ensure_entry(&event.test, &event.package);
        }

        match event.action {
            Action::Run => {
                if let Some(started) = event.timestamp() {
                    self.start_times.insert(event.test, started);
                }
            }
            Action::Pass => self.resolve(&event, TestStatus::Pass),
            Action::Fail => self.resolve(&event, TestStatus::Fail),
            Action::Skip => {
                self.start_times.remove(&event.test);
                if let Some(result) = self.results.get_mut(&event.test) {
                    set_status(result, TestStatus::Skip);
                }
            }
            Action::Output => {
                if let Some(fragment) = event.output_fragment() {
                    let fragment = fragment.to_string();
                    self.pending_output
                        .entry(event.test)
                        .or_default()
                        .push(fragment);
                }
            }
            Action::Pause | Action::Cont | Action::Bench | Action::Other => {}
        }
    }

    /// Create the entry for `name` if needed, synthesizing missing ancestors
    fn ensure_entry(&mut self, name: &str, package: &str) {
        if self.results.contains_key(name) {
            return;
        }
        self.results
            .insert(name.to_string(), TestResult::new(name, package));

        // Parent names are prefixes of `name`, so the walk borrows nothing from the map.
        let mut current = name;
        while let Some(parent) = parent_name(current) {
            let created = !self.results.contains_key(parent);
            if created {
                debug!(test = %parent, "synthesizing parent entry");
                self.results
                    .insert(parent.to_string(), TestResult::new(parent, package));
            }
            if let Some(entry) = self.results.get_mut(parent) {
                entry.children.push(current.to_string());
            }
            if !created {
                break;
            }
            current = parent;
        }
    }

    fn resolve(&mut self, event: &TestEvent, status: TestStatus) {
        let started = self.start_times.remove(&event.test);
        let Some(result) = self.results.get_mut(&event.test) else {
            return;
        };

        set_status(result, status);
        if let Some(elapsed) = event.elapsed_secs() {
            result.duration_secs = elapsed;
        } else if let (Some(started), Some(finished)) = (started, event.timestamp()) {
            result.duration_secs = seconds_between(started, finished);
        }
    }

    /// Attach buffered output and compute the summary
    #[must_use]
    pub fn finish(self) -> TestRun {
        let Self {
            mut results,
            pending_output,
            ..
        } = self;

        for (name, lines) in pending_output {
            match results.get_mut(&name) {
                Some(result) => result.output = lines,
                None => debug!(
                    test = %name,
                    lines = lines.len(),
                    "dropping output for test with no lifecycle events"
                ),
            }
        }

        // BTreeMap iteration keeps root names and package groups sorted.
        let mut summary = RunSummary::default();
        let mut root_names = Vec::new();
        let mut package_groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for result in results.values().filter(|r| !r.is_subtest()) {
            summary.record(result);
            root_names.push(result.name.clone());

            let package = if result.package.is_empty() {
                UNKNOWN_PACKAGE
            } else {
                result.package.as_str()
            };
            package_groups
                .entry(package.to_string())
                .or_default()
                .push(result.name.clone());
        }

        debug!(
            tests = results.len(),
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "aggregated test run"
        );

        TestRun {
            results,
            root_names,
            package_groups,
            summary,
        }
    }
}

/// Overwrite a result's status, warning when a terminal status is replaced
fn set_status(result: &mut TestResult, status: TestStatus) {
    if result.status != TestStatus::Unknown {
        warn!(
            test = %result.name,
            previous = %result.status,
            latest = %status,
            "test reported more than one terminal status; keeping the latest"
        );
    }
    result.status = status;
}

fn seconds_between(started: DateTime<Utc>, finished: DateTime<Utc>) -> f64 {
    (finished - started)
        .num_microseconds()
        .map_or(0.0, |us| us as f64 / 1_000_000.0)
        .max(0.0)
}

// ============================================================================
// Entry points
// ============================================================================

/// Aggregate a complete `go test -json` stream read line by line
///
/// # Errors
///
/// Returns `AggregateError::Io` if reading fails and `AggregateError::Decode`
/// on the first line that is not a valid event. No partial results are
/// returned in either case.
pub fn aggregate<R: BufRead>(mut reader: R) -> Result<TestRun, AggregateError> {
    let mut aggregator = Aggregator::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        aggregator.process_bytes(&buf)?;
    }
    Ok(aggregator.finish())
}

/// Aggregate `go test -json` output already held in memory
///
/// # Errors
///
/// Returns `AggregateError::Decode` on the first line that is not a valid event.
pub fn aggregate_str(input: &str) -> Result<TestRun, AggregateError> {
    let mut aggregator = Aggregator::new();
    for line in input.lines() {
        aggregator.process_line(line)?;
    }
    Ok(aggregator.finish())
}
