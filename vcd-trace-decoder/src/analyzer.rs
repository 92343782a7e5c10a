//! Main analyzer API
//!
//! This module provides the primary interface for the library. The
//! [`TraceAnalyzer`] owns a validated configuration and runs independent
//! single-pass analyses over trace files or readers.

use crate::config::AnalyzerConfig;
use crate::scanner::{ScanSummary, TraceScanner};
use crate::stats::{StatisticsAggregator, TraceStatistics};
use crate::types::{Result, TraceError};
use crate::verdict::Verdict;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Everything one analysis run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub verdict: Verdict,
    pub statistics: TraceStatistics,
    pub summary: ScanSummary,
}

impl Analysis {
    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// The analyzer - entry point for all analysis operations
///
/// Holds no per-run state, so one analyzer can be reused for any number of
/// traces; each call builds a fresh registry and statistics record.
#[derive(Debug, Clone)]
pub struct TraceAnalyzer {
    config: AnalyzerConfig,
}

impl TraceAnalyzer {
    /// Create an analyzer after validating `config`
    ///
    /// # Example
    /// ```
    /// use vcd_trace_decoder::{AnalyzerConfig, TraceAnalyzer};
    ///
    /// let analyzer = TraceAnalyzer::new(AnalyzerConfig::new().with_min_window_samples(5)).unwrap();
    /// assert_eq!(analyzer.config().min_window_samples, 5);
    /// ```
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a VCD file on disk
    ///
    /// The file is opened for the duration of the scan and closed on every
    /// return path.
    ///
    /// # Example
    /// ```no_run
    /// use vcd_trace_decoder::TraceAnalyzer;
    /// use std::path::Path;
    ///
    /// let analyzer = TraceAnalyzer::default();
    /// let analysis = analyzer.analyze_file(Path::new("trace.vcd")).unwrap();
    /// println!("{} ({} samples in window)", analysis.verdict, analysis.statistics.pc_in_window);
    /// ```
    pub fn analyze_file(&self, path: &Path) -> Result<Analysis> {
        log::info!("Analyzing trace file: {:?}", path);

        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.analyze_reader(BufReader::new(file))
    }

    /// Analyze a trace from any buffered reader
    pub fn analyze_reader<R: BufRead>(&self, reader: R) -> Result<Analysis> {
        let mut scanner = TraceScanner::new(reader, self.config.signals.clone());
        let mut aggregator = StatisticsAggregator::new(&self.config);

        for change in scanner.by_ref() {
            aggregator.record(&change?)?;
        }

        let summary = *scanner.summary();
        let statistics = aggregator.into_statistics();
        let verdict = Verdict::evaluate(&statistics, &self.config);

        log::info!(
            "Scanned {} lines, {} tracked value changes: {} ({} samples in window, threshold {})",
            summary.lines,
            summary.value_changes,
            verdict,
            statistics.pc_in_window,
            self.config.min_window_samples
        );

        Ok(Analysis {
            verdict,
            statistics,
            summary,
        })
    }
}

impl Default for TraceAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_analyzer_creation() {
        let analyzer = TraceAnalyzer::default();
        assert_eq!(analyzer.config(), &AnalyzerConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = TraceAnalyzer::new(AnalyzerConfig::new().with_window(0x1000, 0));
        assert!(matches!(result, Err(TraceError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file() {
        let analyzer = TraceAnalyzer::default();
        let result = analyzer.analyze_file(Path::new("does/not/exist.vcd"));
        assert!(matches!(result, Err(TraceError::Open { .. })));
    }

    #[test]
    fn test_empty_trace_fails() {
        let analyzer = TraceAnalyzer::default();
        let analysis = analyzer.analyze_reader(Cursor::new("")).unwrap();
        assert_eq!(analysis.verdict, Verdict::Fail);
        assert_eq!(analysis.statistics, TraceStatistics::default());
        assert!(!analysis.summary.reached_value_changes);
    }

    #[test]
    fn test_small_threshold_pass() {
        let trace = "\
$var wire 32 ! io_instruction_address [31:0] $end
$enddefinitions $end
#0
b1000000101100 !
#1
b1000000110000 !
#2
b0 !
";
        let analyzer = TraceAnalyzer::new(AnalyzerConfig::new().with_min_window_samples(1)).unwrap();
        let analysis = analyzer.analyze_reader(Cursor::new(trace)).unwrap();

        assert!(analysis.passed());
        assert_eq!(analysis.statistics.pc_samples, 2);
        assert_eq!(analysis.statistics.pc_in_window, 2);
        assert_eq!(analysis.statistics.max_pc, 0x1030);
    }

    #[test]
    fn test_malformed_tracked_value_aborts() {
        let trace = "\
$var wire 32 ! io_instruction_address [31:0] $end
$enddefinitions $end
b10z1 !
b1021 !
";
        let analyzer = TraceAnalyzer::default();
        let err = analyzer.analyze_reader(Cursor::new(trace)).unwrap_err();
        assert!(matches!(err, TraceError::Value { line: 4, .. }));
    }

    #[test]
    fn test_malformed_untracked_value_is_skipped() {
        let trace = "\
$var wire 32 ! clock_counter $end
$enddefinitions $end
b1021 !
";
        let analyzer = TraceAnalyzer::default();
        assert!(analyzer.analyze_reader(Cursor::new(trace)).is_ok());
    }
}
