//! Report generation
//!
//! Renders an analysis as a human-readable text report or as JSON.

pub mod json;
pub mod txt;

use crate::config::OutputFormat;
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use vcd_trace_decoder::{Analysis, AnalyzerConfig};

/// Everything a report is rendered from
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub trace: &'a Path,
    pub analysis: &'a Analysis,
    pub config: &'a AnalyzerConfig,
}

/// Write `report` to `out` in the requested format
pub fn write_report(out: &mut dyn Write, format: OutputFormat, report: &Report<'_>) -> Result<()> {
    match format {
        OutputFormat::Txt => txt::write(out, report)?,
        OutputFormat::Json => json::write(out, report)?,
    }
    out.flush()?;
    Ok(())
}
