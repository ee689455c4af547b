// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for report rendering
//!
//! These tests use proptest to check that rendering never fails and that the
//! visual helpers stay within their bounds for arbitrary inputs.

use chrono::{Local, TimeZone};
use gotest_events::aggregate_str;
use gotest_report::render::{MarkdownReport, duration_bar, duration_color, timeline_label};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary test names including nesting and mermaid-hostile characters
fn arbitrary_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("TestA".to_string()),
        Just("TestA/sub".to_string()),
        Just("TestA/sub/deeper".to_string()),
        Just("Test: with colon".to_string()),
        Just("日本語テスト/ケース".to_string()),
        Just("a".repeat(80)),
        "[A-Za-z0-9_/]{1,40}".prop_map(|s| s),
    ]
}

fn arbitrary_event() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("run"), Just("pass"), Just("fail"), Just("skip"), Just("output")],
        arbitrary_name(),
        prop::option::of(0.0f64..100.0),
        ".{0,30}",
    )
        .prop_map(|(action, test, elapsed, output)| {
            let mut event = json!({
                "Action": action,
                "Package": "example/pkg",
                "Test": test,
                "Output": format!("{output}\n"),
            });
            if let Some(elapsed) = elapsed {
                event["Elapsed"] = json!(elapsed);
            }
            event.to_string()
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_render_never_fails(lines in prop::collection::vec(arbitrary_event(), 0..40)) {
        let run = aggregate_str(&lines.join("\n")).expect("well-formed stream");
        let at = Local.timestamp_opt(1_700_000_000, 0).single().expect("valid timestamp");
        let report = MarkdownReport::new(&run, at).render().expect("render");

        let total_line = format!("- **Total Tests:** {}\n", run.summary.total);
        prop_assert!(report.contains(&total_line));
        prop_assert_eq!(report.contains("## Failed Tests Details"), run.summary.failed > 0);
    }

    #[test]
    fn prop_duration_bar_bounded(duration in 0.0f64..1e6, scale in 0.0f64..1e6) {
        let length = duration_bar(duration, scale).chars().count();
        prop_assert!((1..=25).contains(&length));
    }

    #[test]
    fn prop_duration_color_is_hex(duration in 0.0f64..1e6, scale in 0.0f64..1e6) {
        let color = duration_color(duration, scale);
        prop_assert_eq!(color.len(), 7);
        prop_assert!(color.starts_with('#'));
        prop_assert!(color.ends_with("00"));
        prop_assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn prop_timeline_label_mermaid_safe(name in arbitrary_name()) {
        let label = timeline_label(&name);
        prop_assert!(!label.contains(':'));
        prop_assert!(!label.contains('/'));
        // Colons widen to two characters after truncation to 30
        prop_assert!(label.chars().count() <= 60);
    }
}
