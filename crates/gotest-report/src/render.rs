// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Markdown report rendering
//!
//! [`MarkdownReport`] renders an aggregated [`TestRun`] into a Markdown
//! document with embedded HTML, intended for GitHub job summaries, PR
//! comments and wiki pages. Rendering is a pure function of the run and the
//! generation timestamp.
//!
//! # Example
//!
//! ```
//! use chrono::Local;
//! use gotest_events::aggregate_str;
//! use gotest_report::render::MarkdownReport;
//!
//! let run = aggregate_str(r#"{"Action":"pass","Test":"TestA","Elapsed":0.5}"#).unwrap();
//! let markdown = MarkdownReport::new(&run, Local::now()).render().unwrap();
//! assert!(markdown.contains("# Test Summary Report"));
//! ```

use std::fmt::{self, Write};

use chrono::{DateTime, Local};
use gotest_events::{TestResult, TestRun, TestStatus};

/// Color for passing tests and a perfect success rate
pub const PASS_COLOR: &str = "#2cbe4e";
/// Color for failing tests and a low success rate
pub const FAIL_COLOR: &str = "#cb2431";
/// Color for skipped tests and a partial success rate
pub const SKIP_COLOR: &str = "#eea236";
/// Color for tests with no terminal status
pub const NEUTRAL_COLOR: &str = "#6a737d";

/// Number of tests shown in the duration ranking and timeline
const TOP_DURATIONS: usize = 15;
/// Width of the longest duration bar, in block characters
const BAR_WIDTH: f64 = 25.0;
/// Names longer than this are truncated in the timeline
const TIMELINE_NAME_LIMIT: usize = 30;

const CARD_STYLE: &str =
    "flex: 1; padding: 10px; border: 1px solid #ddd; border-radius: 5px; text-align: center;";

/// Renders a [`TestRun`] as a Markdown report
pub struct MarkdownReport<'a> {
    run: &'a TestRun,
    generated_at: DateTime<Local>,
}

impl<'a> MarkdownReport<'a> {
    /// Create a renderer for `run`, stamped with `generated_at` in the footer
    #[must_use]
    pub fn new(run: &'a TestRun, generated_at: DateTime<Local>) -> Self {
        Self { run, generated_at }
    }

    /// Render the complete report
    ///
    /// # Errors
    ///
    /// Returns `fmt::Error` only if formatting a value fails.
    pub fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, "# Test Summary Report")?;
        writeln!(out)?;
        self.write_cards(&mut out)?;
        self.write_summary(&mut out)?;
        self.write_status_badge(&mut out)?;
        self.write_package_tables(&mut out)?;
        self.write_failures(&mut out)?;
        self.write_durations(&mut out)?;
        self.write_timeline(&mut out)?;
        self.write_footer(&mut out)?;

        Ok(out)
    }

    fn write_cards(&self, out: &mut String) -> fmt::Result {
        let summary = &self.run.summary;
        let rate = summary.pass_rate().unwrap_or(0.0);

        writeln!(
            out,
            "<div style=\"display: flex; gap: 20px; margin-bottom: 20px;\">"
        )?;
        write_card(out, &summary.total.to_string(), None, "Total Tests")?;
        write_card(
            out,
            &format!("{rate:.1}%"),
            Some(success_rate_color(rate)),
            "Success Rate",
        )?;
        write_card(
            out,
            &format!("{:.2}s", summary.total_duration_secs),
            None,
            "Total Duration",
        )?;
        writeln!(out, "</div>")?;
        writeln!(out)
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        let summary = &self.run.summary;
        let rate = summary
            .pass_rate()
            .map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}%"));

        writeln!(out, "## Summary")?;
        writeln!(out)?;
        writeln!(out, "- **Total Tests:** {}", summary.total)?;
        writeln!(out, "- **Passed:** {} ({rate})", summary.passed)?;
        writeln!(out, "- **Failed:** {}", summary.failed)?;
        writeln!(out, "- **Skipped:** {}", summary.skipped)?;
        writeln!(
            out,
            "- **Total Duration:** {:.2}s",
            summary.total_duration_secs
        )?;
        writeln!(out)
    }

    fn write_status_badge(&self, out: &mut String) -> fmt::Result {
        let summary = &self.run.summary;
        let (label, color) = if summary.failed > 0 {
            ("FAILED", "red")
        } else if summary.skipped == summary.total {
            ("SKIPPED", "yellow")
        } else {
            ("PASSED", "brightgreen")
        };

        writeln!(out, "## Test Status")?;
        writeln!(out)?;
        writeln!(
            out,
            "![Status](https://img.shields.io/badge/Status-{label}-{color})"
        )?;
        writeln!(out)
    }

    fn write_package_tables(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "## Test Results by Package")?;
        writeln!(out)?;

        for (package, names) in &self.run.package_groups {
            writeln!(out, "<details>")?;
            writeln!(
                out,
                "<summary>Package: <strong>{package}</strong> ({} tests)</summary>",
                names.len()
            )?;
            writeln!(out)?;
            writeln!(out, "| Test | Status | Duration | Details |")?;
            writeln!(out, "| ---- | ------ | -------- | ------- |")?;

            for result in names.iter().filter_map(|name| self.run.get(name)) {
                writeln!(
                    out,
                    "| **{}** | {} | {:.3}s | {} |",
                    result.name,
                    status_cell(result.status),
                    result.duration_secs,
                    self.subtest_details(result)?,
                )?;
            }

            writeln!(out)?;
            writeln!(out, "</details>")?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Collapsible nested table of direct subtests, or `-` when there are none
    fn subtest_details(&self, result: &TestResult) -> Result<String, fmt::Error> {
        let children = self.run.children_of(&result.name);
        if children.is_empty() {
            return Ok("-".to_string());
        }

        let mut cell = String::new();
        write!(
            cell,
            "<details><summary>{} subtests</summary>",
            children.len()
        )?;
        write!(
            cell,
            "<table><tr><th>Subtest</th><th>Status</th><th>Duration</th></tr>"
        )?;
        for child in children {
            write!(
                cell,
                "<tr><td>{}</td><td>{}</td><td>{:.3}s</td></tr>",
                child.short_name(),
                status_cell(child.status),
                child.duration_secs
            )?;
        }
        write!(cell, "</table></details>")?;
        Ok(cell)
    }

    fn write_failures(&self, out: &mut String) -> fmt::Result {
        if self.run.summary.failed == 0 {
            return Ok(());
        }

        writeln!(out, "## Failed Tests Details")?;
        writeln!(out)?;
        writeln!(out, "<details>")?;
        writeln!(out, "<summary>Click to expand failed test details</summary>")?;
        writeln!(out)?;

        for result in self.run.failed_roots() {
            writeln!(
                out,
                "<div style=\"margin-bottom: 20px; padding: 10px; border-left: 4px solid {FAIL_COLOR}; background-color: #ffeef0\">"
            )?;
            writeln!(out, "<h3>{}</h3>", result.name)?;
            writeln!(out)?;

            if result.failed() && !result.output.is_empty() {
                write_excerpt(out, result)?;
            }

            for child in self.run.children_of(&result.name) {
                if !child.failed() {
                    continue;
                }
                writeln!(out, "<h4>{}</h4>", child.short_name())?;
                writeln!(out)?;
                if !child.output.is_empty() {
                    write_excerpt(out, child)?;
                }
            }

            writeln!(out, "</div>")?;
            writeln!(out)?;
        }

        writeln!(out, "</details>")?;
        writeln!(out)
    }

    fn write_durations(&self, out: &mut String) -> fmt::Result {
        let ranked = self.run.durations_ranked();
        let scale = duration_scale(&ranked);

        writeln!(out, "## Test Durations")?;
        writeln!(out)?;
        writeln!(out, "<details>")?;
        writeln!(out, "<summary>Click to expand test durations</summary>")?;
        writeln!(out)?;
        writeln!(out, "| Test | Duration |")?;
        writeln!(out, "| ---- | -------- |")?;

        for result in ranked.iter().take(TOP_DURATIONS) {
            let name = if result.is_subtest() {
                format!("↳ {}", result.short_name())
            } else {
                result.name.clone()
            };
            writeln!(
                out,
                "| {name} | {:.3}s <span style=\"color: {}\">{}</span> |",
                result.duration_secs,
                duration_color(result.duration_secs, scale),
                duration_bar(result.duration_secs, scale),
            )?;
        }

        writeln!(out)?;
        writeln!(out, "</details>")?;
        writeln!(out)
    }

    fn write_timeline(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "## Test Timeline")?;
        writeln!(out)?;
        writeln!(out, "<details>")?;
        writeln!(
            out,
            "<summary>Click to expand test execution timeline</summary>"
        )?;
        writeln!(out)?;
        writeln!(out, "```mermaid")?;
        writeln!(out, "gantt")?;
        writeln!(out, "    title Test Execution Timeline")?;
        writeln!(out, "    dateFormat X")?;
        writeln!(out, "    axisFormat %S.%L")?;
        writeln!(out)?;

        // Bars overlap: each one starts a fifth of the previous duration later.
        let mut start = 0.0;
        for result in self.run.durations_ranked().iter().take(TOP_DURATIONS) {
            let end = start + result.duration_secs;
            writeln!(
                out,
                "    {}: {start:.6}, {end:.6}",
                timeline_label(&result.name)
            )?;
            start += result.duration_secs * 0.2;
        }

        writeln!(out, "```")?;
        writeln!(out, "</details>")?;
        writeln!(out)
    }

    fn write_footer(&self, out: &mut String) -> fmt::Result {
        let at = &self.generated_at;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
        writeln!(out, "📆 **Report Date:** {}  ", at.format("%B %-d, %Y"))?;
        writeln!(out, "⏰ **Report Time:** {}  ", at.format("%H:%M:%S %Z"))?;
        writeln!(out, "🖥 **Generated On:** {}", at.format("%A at %H:%M"))
    }
}

fn write_card(out: &mut String, value: &str, color: Option<&str>, label: &str) -> fmt::Result {
    let color = color.map(|c| format!(" color: {c};")).unwrap_or_default();
    writeln!(out, "<div style=\"{CARD_STYLE}\">")?;
    writeln!(
        out,
        "<div style=\"font-size: 24px; font-weight: bold;{color}\">{value}</div>"
    )?;
    writeln!(
        out,
        "<div style=\"font-size: 12px; color: #666;\">{label}</div>"
    )?;
    writeln!(out, "</div>")
}

fn write_excerpt(out: &mut String, result: &TestResult) -> fmt::Result {
    writeln!(out, "```go")?;
    for line in result.failure_excerpt() {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "```")?;
    writeln!(out)
}

/// Color of the success-rate card
#[must_use]
pub fn success_rate_color(rate: f64) -> &'static str {
    if rate < 80.0 {
        FAIL_COLOR
    } else if rate < 100.0 {
        SKIP_COLOR
    } else {
        PASS_COLOR
    }
}

/// Emoji and color for a status
#[must_use]
pub fn status_style(status: TestStatus) -> (&'static str, &'static str) {
    match status {
        TestStatus::Pass => ("✅", PASS_COLOR),
        TestStatus::Fail => ("❌", FAIL_COLOR),
        TestStatus::Skip => ("⏭️", SKIP_COLOR),
        TestStatus::Unknown => ("⏺️", NEUTRAL_COLOR),
    }
}

fn status_cell(status: TestStatus) -> String {
    let (emoji, color) = status_style(status);
    format!("<span style=\"color: {color}\">{emoji} {status}</span>")
}

/// Scale for duration bars: the longest duration, unless it is an outlier
/// (more than 3x the runner-up), in which case 1.5x the runner-up
#[must_use]
pub fn duration_scale(ranked: &[&TestResult]) -> f64 {
    match ranked {
        [] => 0.0,
        [only] => only.duration_secs,
        [first, second, ..] => {
            if first.duration_secs > second.duration_secs * 3.0 {
                second.duration_secs * 1.5
            } else {
                first.duration_secs
            }
        }
    }
}

fn duration_ratio(duration: f64, scale: f64) -> f64 {
    if scale > 0.0 {
        (duration / scale).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Green to yellow to red gradient for a duration relative to `scale`
#[must_use]
pub fn duration_color(duration: f64, scale: f64) -> String {
    let ratio = duration_ratio(duration, scale);
    let red = (255.0 * (ratio * 2.0).min(1.0)) as u8;
    let green = (255.0 * (2.0 - ratio * 2.0).min(1.0)) as u8;
    format!("#{red:02x}{green:02x}00")
}

/// Block-character bar, at least one and at most 25 characters long
#[must_use]
pub fn duration_bar(duration: f64, scale: f64) -> String {
    let length = (duration_ratio(duration, scale) * BAR_WIDTH) as usize;
    "█".repeat(length.max(1))
}

/// Mermaid-safe task label for a test name
#[must_use]
pub fn timeline_label(name: &str) -> String {
    let chars = name.chars().count();
    let label = if chars > TIMELINE_NAME_LIMIT {
        let tail: String = name.chars().skip(chars - (TIMELINE_NAME_LIMIT - 3)).collect();
        format!("...{tail}")
    } else {
        name.to_string()
    };
    label.replace(':', " -").replace('/', "-")
}
