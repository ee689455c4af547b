// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-report library
//!
//! This module exports the configuration, rendering and pipeline of the
//! gotest-report command for use in integration tests and as a library.

pub mod app;
pub mod config;
pub mod render;
