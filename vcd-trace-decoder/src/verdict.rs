//! Verdict evaluation
//!
//! The only pass criterion is the number of program counter samples inside
//! the address window. Every other counter is diagnostic.

use crate::config::AnalyzerConfig;
use crate::stats::TraceStatistics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Apply the threshold rule to final statistics
    pub fn evaluate(stats: &TraceStatistics, config: &AnalyzerConfig) -> Self {
        if stats.pc_in_window > config.min_window_samples {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}
