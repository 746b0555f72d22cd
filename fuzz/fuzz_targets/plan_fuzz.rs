//! Fuzz test for the plan-report cost extractor
//!
//! This fuzz target feeds arbitrary byte sequences to both extraction
//! modes to find:
//! - Panics or crashes
//! - Infinite loops
//! - Partially-populated records slipping through a failed parse
//!
//! Run with: cargo +nightly fuzz run plan_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlduel_core::{PlanEstimate, PlanProfile};

fuzz_target!(|data: &[u8]| {
    // The extractor should handle any valid UTF-8 string without panicking
    if let Ok(input) = std::str::from_utf8(data) {
        // Estimate mode: single plan line
        match PlanEstimate::parse(input) {
            Ok(est) => {
                // Numeric captures are digit-only, so parsed values can
                // never be negative
                assert!(est.startup_cost >= 0.0, "startup cost should be >= 0");
                assert!(est.total_cost >= 0.0, "total cost should be >= 0");
                assert!(est.rows >= 0, "row estimate should be >= 0");
                assert!(est.width >= 0, "width should be >= 0");
            }
            Err(_) => {
                // No partial record exists to inspect; an error is the only
                // other outcome
            }
        }

        // Full-profile mode: whole report
        match PlanProfile::parse_report(input) {
            Ok(profile) => {
                assert!(profile.planning_time_ms >= 0.0, "planning time should be >= 0");
                assert!(profile.execution_time_ms >= 0.0, "execution time should be >= 0");
                assert!(profile.loops >= 0, "loop count should be >= 0");
                assert!(
                    profile.measured_ms() >= profile.execution_time_ms,
                    "measured time includes execution time"
                );
            }
            Err(_) => {}
        }
    }
});
