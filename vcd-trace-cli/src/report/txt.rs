//! Plain text report

use super::Report;
use std::io::{self, Write};

const RULE_WIDTH: usize = 70;

/// Render the text report
pub fn write(out: &mut dyn Write, report: &Report<'_>) -> io::Result<()> {
    let config = report.config;
    let stats = &report.analysis.statistics;
    let summary = &report.analysis.summary;
    let passed = report.analysis.passed();
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, " VCD Trace Analysis Report")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "\nTrace: {}", report.trace.display())?;
    writeln!(out, "Parsed {} relevant signals.", summary.tracked_symbols)?;
    writeln!(out, "\nOverall Status: [{}]\n", report.analysis.verdict)?;

    writeln!(out, "Key Findings:")?;
    writeln!(
        out,
        "  - JIT Code Execution: {} ({} cycles at buffer)",
        if passed { "OK" } else { "FAIL" },
        stats.pc_in_window
    )?;
    writeln!(
        out,
        "  - Register x{} == {}: {}",
        config.target_register,
        config.target_value,
        yes_no(stats.target_value_seen)
    )?;
    writeln!(
        out,
        "  - Memory Writes Detected: {} ({} writes)\n",
        yes_no(stats.memory_writes > 0),
        stats.memory_writes
    )?;

    writeln!(out, "Detailed Statistics:")?;
    writeln!(out, "  - PC Samples: {}", stats.pc_samples)?;
    writeln!(out, "  - Max PC Address: 0x{:08x}", stats.max_pc)?;
    writeln!(out, "  - Register Writes: {}", stats.register_writes)?;
    writeln!(
        out,
        "  - Writes to x{}: {}",
        config.target_register, stats.target_register_writes
    )?;
    writeln!(
        out,
        "  - Required Samples: more than {} in [0x{:08x}, 0x{:08x})\n",
        config.min_window_samples,
        config.window_base,
        config.window_end()
    )?;

    writeln!(out, "Expected Memory Layout:")?;
    writeln!(out, "  - Entry Point:       0x{:08x}", config.layout.entry_point)?;
    writeln!(out, "  - JIT Code Buffer:   0x{:08x}", config.layout.code_buffer)?;
    writeln!(out, "  - JIT Instructions:  0x{:08x}\n", config.layout.jit_instructions)?;

    writeln!(out, "Interpretation:")?;
    if passed {
        writeln!(out, "  - [OK] CPU successfully executed the JIT self-modifying code.")?;
    } else {
        writeln!(out, "  - [FAIL] JIT execution did not occur as expected.")?;
        if !summary.reached_value_changes {
            writeln!(out, "  - The trace has no $enddefinitions section; it may be truncated.")?;
        } else if summary.tracked_symbols == 0 {
            writeln!(out, "  - None of the tracked signals are declared in this trace.")?;
        } else {
            writeln!(out, "  - Check simulation time and VCD signal integrity.")?;
        }
    }
    writeln!(out, "\n{}", rule)?;

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use vcd_trace_decoder::{Analysis, AnalyzerConfig, ScanSummary, TraceStatistics, Verdict};

    fn render(analysis: &Analysis) -> String {
        let config = AnalyzerConfig::default();
        let report = Report {
            trace: Path::new("trace.vcd"),
            analysis,
            config: &config,
        };
        let mut out = Vec::new();
        write(&mut out, &report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pass_report() {
        let analysis = Analysis {
            verdict: Verdict::Pass,
            statistics: TraceStatistics {
                pc_samples: 12_000,
                max_pc: 0x1038,
                pc_in_window: 10_001,
                register_writes: 30,
                target_register_writes: 3,
                memory_writes: 4,
                target_value_seen: true,
            },
            summary: ScanSummary {
                lines: 40_000,
                declarations: 10,
                tracked_symbols: 4,
                value_changes: 12_034,
                reached_value_changes: true,
            },
        };
        let text = render(&analysis);

        assert!(text.contains("Overall Status: [PASS]"));
        assert!(text.contains("JIT Code Execution: OK (10001 cycles at buffer)"));
        assert!(text.contains("Register x10 == 42: YES"));
        assert!(text.contains("Memory Writes Detected: YES (4 writes)"));
        assert!(text.contains("Max PC Address: 0x00001038"));
        assert!(text.contains("Writes to x10: 3"));
        assert!(text.contains("JIT Code Buffer:   0x0000102c"));
        assert!(text.contains("Parsed 4 relevant signals."));
    }

    #[test]
    fn test_fail_report_without_definitions() {
        let analysis = Analysis {
            verdict: Verdict::Fail,
            statistics: TraceStatistics::default(),
            summary: ScanSummary::default(),
        };
        let text = render(&analysis);

        assert!(text.contains("Overall Status: [FAIL]"));
        assert!(text.contains("Register x10 == 42: NO"));
        assert!(text.contains("Memory Writes Detected: NO (0 writes)"));
        assert!(text.contains("no $enddefinitions"));
    }
}
