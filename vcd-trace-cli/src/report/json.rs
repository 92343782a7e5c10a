//! JSON report

use super::Report;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use vcd_trace_decoder::{AnalyzerConfig, ScanSummary, TraceStatistics, Verdict};

#[derive(Serialize)]
struct JsonReport<'a> {
    trace: &'a Path,
    verdict: Verdict,
    passed: bool,
    statistics: &'a TraceStatistics,
    summary: &'a ScanSummary,
    config: &'a AnalyzerConfig,
}

/// Render the report as pretty-printed JSON
pub fn write(out: &mut dyn Write, report: &Report<'_>) -> io::Result<()> {
    let json = JsonReport {
        trace: report.trace,
        verdict: report.analysis.verdict,
        passed: report.analysis.passed(),
        statistics: &report.analysis.statistics,
        summary: &report.analysis.summary,
        config: report.config,
    };
    serde_json::to_writer_pretty(&mut *out, &json).map_err(io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcd_trace_decoder::Analysis;

    #[test]
    fn test_json_report_fields() {
        let config = AnalyzerConfig::default();
        let analysis = Analysis {
            verdict: Verdict::Fail,
            statistics: TraceStatistics {
                pc_in_window: 5_000,
                memory_writes: 2,
                ..TraceStatistics::default()
            },
            summary: ScanSummary::default(),
        };
        let report = Report {
            trace: Path::new("sim.vcd"),
            analysis: &analysis,
            config: &config,
        };

        let mut out = Vec::new();
        write(&mut out, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["trace"], "sim.vcd");
        assert_eq!(value["verdict"], "FAIL");
        assert_eq!(value["passed"], false);
        assert_eq!(value["statistics"]["pc_in_window"], 5_000);
        assert_eq!(value["statistics"]["memory_writes"], 2);
        assert_eq!(value["statistics"]["target_value_seen"], false);
        assert_eq!(value["config"]["window_base"], 0x102c);
        assert_eq!(value["config"]["signals"]["program_counter"], "io_instruction_address");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_keeps_io_kind() {
        let config = AnalyzerConfig::default();
        let analysis = Analysis {
            verdict: Verdict::Pass,
            statistics: TraceStatistics::default(),
            summary: ScanSummary::default(),
        };
        let report = Report {
            trace: Path::new("sim.vcd"),
            analysis: &analysis,
            config: &config,
        };

        let err = write(&mut BrokenPipe, &report).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
