//! Test result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a parent test name and a subtest name
pub const SUBTEST_SEPARATOR: char = '/';

/// Output markers that identify failure lines in captured output
const FAILURE_MARKERS: [&str; 3] = ["FAIL", "Error", "panic:"];

/// Resolved status of a test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// No terminal event was seen
    #[default]
    Unknown,
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped
    Skip,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "UNKNOWN",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        })
    }
}

/// Aggregated result for a single test or subtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Fully-qualified test name
    pub name: String,
    /// Package the test belongs to
    pub package: String,
    /// Test status
    pub status: TestStatus,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Captured output lines, in arrival order
    pub output: Vec<String>,
    /// Name of the enclosing test (subtests only)
    pub parent: Option<String>,
    /// Direct subtests, in discovery order
    pub children: Vec<String>,
}

impl TestResult {
    /// Create an empty result with `Unknown` status
    ///
    /// The parent relation is derived from `name`.
    #[must_use]
    pub fn new(name: &str, package: &str) -> Self {
        Self {
            name: name.to_string(),
            package: package.to_string(),
            status: TestStatus::Unknown,
            duration_secs: 0.0,
            output: Vec::new(),
            parent: parent_name(name).map(str::to_string),
            children: Vec::new(),
        }
    }

    /// Whether this is a subtest
    #[must_use]
    pub fn is_subtest(&self) -> bool {
        self.parent.is_some()
    }

    /// Check if test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Pass
    }

    /// Check if test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == TestStatus::Fail
    }

    /// Last segment of the name
    ///
    /// `TestParent/case_one` becomes `case_one`; root names are returned whole.
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    /// Output lines that look like failure diagnostics
    pub fn failure_excerpt(&self) -> impl Iterator<Item = &str> {
        self.output
            .iter()
            .map(String::as_str)
            .filter(|line| FAILURE_MARKERS.iter().any(|m| line.contains(m)))
    }
}

/// The enclosing test name of a subtest, or `None` for a root test
#[must_use]
pub fn parent_name(name: &str) -> Option<&str> {
    name.rfind(SUBTEST_SEPARATOR).map(|idx| &name[..idx])
}

/// Last separator-delimited segment of a test name
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rfind(SUBTEST_SEPARATOR)
        .map_or(name, |idx| &name[idx + SUBTEST_SEPARATOR.len_utf8()..])
}
