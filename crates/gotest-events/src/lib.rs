// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-events: `go test -json` event aggregation
//!
//! This library crate turns the line-delimited JSON events emitted by
//! `go test -json` into a tree of test results with summary counters, for
//! consumption by the gotest-report renderer.
//!
//! # Example
//!
//! ```no_run
//! use gotest_events::aggregate::{Aggregator, aggregate};
//!
//! // Aggregate a complete stream
//! let stdin = std::io::stdin();
//! let run = aggregate(stdin.lock()).unwrap();
//!
//! // Or feed lines incrementally
//! let mut aggregator = Aggregator::new();
//! aggregator.process_line(r#"{"Action":"run","Test":"TestA"}"#).unwrap();
//! let run = aggregator.finish();
//! ```

pub mod aggregate;
pub mod error;
pub mod event;
pub mod result;

pub use aggregate::{Aggregator, RunSummary, TestRun, UNKNOWN_PACKAGE, aggregate, aggregate_str};
pub use error::AggregateError;
pub use event::{Action, TestEvent};
pub use result::{SUBTEST_SEPARATOR, TestResult, TestStatus};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{Aggregator, RunSummary, TestRun, aggregate, aggregate_str};
    pub use crate::error::AggregateError;
    pub use crate::result::{TestResult, TestStatus};
}
