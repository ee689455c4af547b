// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the event aggregator
//!
//! Feeds arbitrary input to the `Aggregator` line by line. Decode errors are
//! expected; panics are not.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::Aggregator;

fuzz_target!(|data: &[u8]| {
    let mut aggregator = Aggregator::new();

    for line in data.split(|b| *b == b'\n') {
        if aggregator.process_bytes(line).is_err() {
            break;
        }
    }

    let run = aggregator.finish();
    let _ = run.failed_roots();
    let _ = run.durations_ranked();
});
