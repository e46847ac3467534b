//! Timing marks recorded around projection phases.

use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Named timing marks for one projection or comparison run.
///
/// Purely observational; never drives control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTrace {
    /// Total wall time in milliseconds.
    pub total_time: f64,
    /// Elapsed milliseconds at each named mark, relative to trace start.
    pub marks: OrderedMap<f64>,
}

/// Accumulates marks against a fixed start instant.
#[derive(Debug)]
pub struct Stopwatch {
    started: Instant,
    marks: OrderedMap<f64>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            marks: OrderedMap::new(),
        }
    }

    pub fn mark(&mut self, name: &str) {
        let elapsed = self.elapsed_ms();
        self.marks.insert(name, elapsed);
    }

    pub fn finish(self) -> PerformanceTrace {
        PerformanceTrace {
            total_time: self.elapsed_ms(),
            marks: self.marks,
        }
    }

    fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}
