// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for gotest-report integration tests
//!
//! This module provides temporary directory management and builders for
//! `go test -json` input.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is removed when dropped
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    /// Create a new temporary test directory
    ///
    /// The directory is created under the system temp directory with a
    /// unique name based on the test name, process id and a counter.
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "gotest-report-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);

        fs::create_dir_all(&path).expect("Failed to create temp test directory");

        Self { path }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a file within the temp directory with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(relative_path);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One `go test -json` line for `test` in package `example/pkg`
#[allow(dead_code)]
pub fn event_line(action: &str, test: &str, elapsed: Option<f64>) -> String {
    let mut event = serde_json::json!({
        "Time": "2023-01-01T12:00:00Z",
        "Action": action,
        "Package": "example/pkg",
        "Test": test,
    });
    if let Some(elapsed) = elapsed {
        event["Elapsed"] = serde_json::json!(elapsed);
    }
    event.to_string()
}

/// A small stream with one passing test, one failing parent and a skip
#[allow(dead_code)]
pub fn sample_stream() -> String {
    let mut lines = vec![
        event_line("run", "TestExample", None),
        event_line("pass", "TestExample", Some(1.0)),
        event_line("run", "TestParent", None),
        event_line("run", "TestParent/SubTest1", None),
        event_line("pass", "TestParent/SubTest1", Some(0.1)),
        event_line("run", "TestParent/SubTest2", None),
    ];
    lines.push(
        serde_json::json!({
            "Action": "output",
            "Package": "example/pkg",
            "Test": "TestParent/SubTest2",
            "Output": "    parent_test.go:20: Error: mismatch\n",
        })
        .to_string(),
    );
    lines.extend([
        event_line("fail", "TestParent/SubTest2", Some(0.2)),
        event_line("fail", "TestParent", Some(0.3)),
        event_line("skip", "TestSkipped", None),
    ]);
    lines.join("\n") + "\n"
}
