// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gotest-events

use thiserror::Error;

/// Errors that can occur while aggregating a test event stream
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A line of the stream is not a valid JSON event
    #[error("JSON decode error on line {line}: {source}")]
    Decode {
        /// 1-based line number of the offending record
        line: usize,
        /// Underlying decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Error reading the event stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AggregateError {
    /// Line number of a decode failure, if this is one
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Decode { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}
