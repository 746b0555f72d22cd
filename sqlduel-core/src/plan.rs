//! EXPLAIN plan-report cost extraction
//!
//! Pure text-to-record transformation: raw plan-report lines in, structured
//! numeric cost records out. Nothing here touches a database connection;
//! callers hand in already-retrieved report text. Keeping the regexes behind
//! this module boundary lets the patterns track the server's plan format
//! without touching the reward path.
//!
//! A record is only ever constructed from a fully successful parse; there is
//! no partially-populated state to observe.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::ParseError;

static ESTIMATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(cost=(\d+(?:\.\d+)?)\.\.(\d+(?:\.\d+)?) rows=(\d+) width=(\d+)\)")
        .expect("estimate pattern must compile")
});

static PROFILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\(cost=(\d+(?:\.\d+)?)\.\.(\d+(?:\.\d+)?) rows=(\d+) width=(\d+)\).*\(actual time=(\d+(?:\.\d+)?)\.\.(\d+(?:\.\d+)?) rows=(\d+) loops=(\d+)\)",
    )
    .expect("profile pattern must compile")
});

static PLANNING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Planning Time: (\d+(?:\.\d+)?) ms").expect("planning pattern must compile"));

static EXECUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Execution Time: (\d+(?:\.\d+)?) ms").expect("execution pattern must compile"));

fn cap_f64(caps: &Captures<'_>, i: usize) -> Option<f64> {
    caps.get(i)?.as_str().parse().ok()
}

fn cap_i64(caps: &Captures<'_>, i: usize) -> Option<i64> {
    caps.get(i)?.as_str().parse().ok()
}

/// Planner cost estimate extracted from one plan line (`EXPLAIN` output).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanEstimate {
    pub startup_cost: f64,
    pub total_cost: f64,
    pub rows: i64,
    pub width: i64,
}

impl PlanEstimate {
    /// Extract the estimate from a single plan line.
    ///
    /// The line must contain `(cost=<startup>..<total> rows=<n> width=<w>)`
    /// with decimal-point doubles for costs and integers for rows/width.
    /// A malformed numeric field counts as no match.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        ESTIMATE_RE
            .captures(line)
            .and_then(|caps| {
                Some(Self {
                    startup_cost: cap_f64(&caps, 1)?,
                    total_cost: cap_f64(&caps, 2)?,
                    rows: cap_i64(&caps, 3)?,
                    width: cap_i64(&caps, 4)?,
                })
            })
            .ok_or_else(|| ParseError::Estimate {
                line: line.to_string(),
            })
    }
}

impl fmt::Display for PlanEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[estimate({},{},{},{})]",
            self.startup_cost, self.total_cost, self.rows, self.width
        )
    }
}

/// Measured cost profile extracted from a full `EXPLAIN ANALYZE` report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanProfile {
    pub startup_cost: f64,
    pub total_cost: f64,
    pub rows: i64,
    pub width: i64,
    pub actual_startup_time: f64,
    pub actual_total_time: f64,
    pub actual_rows: i64,
    pub loops: i64,
    pub planning_time_ms: f64,
    pub execution_time_ms: f64,
}

impl PlanProfile {
    /// Scan the report lines once, extracting the profiled root node, the
    /// planning-time summary, and the execution-time summary.
    ///
    /// The first line satisfying each pattern wins; the scan continues for
    /// the remaining patterns. If any of the three patterns never matched,
    /// the parse fails and no record is produced.
    pub fn parse<'a, I>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut root: Option<(f64, f64, i64, i64, f64, f64, i64, i64)> = None;
        let mut planning: Option<f64> = None;
        let mut execution: Option<f64> = None;

        for line in lines {
            if root.is_none() {
                root = PROFILE_RE.captures(line).and_then(|caps| {
                    Some((
                        cap_f64(&caps, 1)?,
                        cap_f64(&caps, 2)?,
                        cap_i64(&caps, 3)?,
                        cap_i64(&caps, 4)?,
                        cap_f64(&caps, 5)?,
                        cap_f64(&caps, 6)?,
                        cap_i64(&caps, 7)?,
                        cap_i64(&caps, 8)?,
                    ))
                });
            }
            if planning.is_none() {
                planning = PLANNING_RE
                    .captures(line)
                    .and_then(|caps| cap_f64(&caps, 1));
            }
            if execution.is_none() {
                execution = EXECUTION_RE
                    .captures(line)
                    .and_then(|caps| cap_f64(&caps, 1));
            }
        }

        let (
            startup_cost,
            total_cost,
            rows,
            width,
            actual_startup_time,
            actual_total_time,
            actual_rows,
            loops,
        ) = root.ok_or(ParseError::MissingPlanLine)?;
        let planning_time_ms = planning.ok_or(ParseError::MissingPlanningTime)?;
        let execution_time_ms = execution.ok_or(ParseError::MissingExecutionTime)?;

        Ok(Self {
            startup_cost,
            total_cost,
            rows,
            width,
            actual_startup_time,
            actual_total_time,
            actual_rows,
            loops,
            planning_time_ms,
            execution_time_ms,
        })
    }

    /// Convenience wrapper over [`PlanProfile::parse`] for a whole report.
    pub fn parse_report(report: &str) -> Result<Self, ParseError> {
        Self::parse(report.lines())
    }

    /// Planning plus execution time, the quantity the reward engine prices.
    pub fn measured_ms(&self) -> f64 {
        self.planning_time_ms + self.execution_time_ms
    }
}

impl fmt::Display for PlanProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[profile({},{},{},{},{},{},{},{},{},{})]",
            self.startup_cost,
            self.total_cost,
            self.rows,
            self.width,
            self.actual_startup_time,
            self.actual_total_time,
            self.actual_rows,
            self.loops,
            self.planning_time_ms,
            self.execution_time_ms
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
