//! VCD Trace Analyzer CLI Application
//!
//! This is the command-line interface for the VCD trace analyzer.
//! It uses the vcd-trace-decoder library and adds:
//! - TOML configuration files
//! - Report generation (TXT/JSON)
//! - Exit status policy (0 on PASS, 1 on FAIL or error)

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use vcd_trace_decoder::{TraceAnalyzer, Verdict};

mod config;
mod report;

use config::{AppConfig, OutputFormat};
use report::Report;

/// VCD Trace Analyzer - verify JIT execution in a simulated RISC-V core
#[derive(Parser, Debug)]
#[command(name = "vcd-trace-cli")]
#[command(about = "Analyze VCD simulation traces for self-modifying code execution", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the VCD trace file
    #[arg(value_name = "TRACE")]
    trace: PathBuf,

    /// Path to configuration file (TOML) overriding signal names and thresholds
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// In-window samples must exceed this count to pass
    #[arg(long, value_name = "COUNT")]
    min_samples: Option<u64>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("VCD Trace Analyzer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using decoder library v{}", vcd_trace_decoder::VERSION);

    match run(&args) {
        Ok(Verdict::Pass) => ExitCode::SUCCESS,
        Ok(Verdict::Fail) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load settings, analyze the trace and write the report
fn run(args: &Args) -> Result<Verdict> {
    let mut app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(format) = args.format {
        app_config.output.format = format;
    }
    if let Some(output) = &args.output {
        app_config.output.file = Some(output.clone());
    }
    if let Some(threshold) = args.min_samples {
        app_config.analyzer.min_window_samples = threshold;
    }

    let analyzer = TraceAnalyzer::new(app_config.analyzer)?;
    let analysis = analyzer
        .analyze_file(&args.trace)
        .with_context(|| format!("Failed to analyze {:?}", args.trace))?;

    let report = Report {
        trace: &args.trace,
        analysis: &analysis,
        config: analyzer.config(),
    };

    match &app_config.output.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file: {:?}", path))?;
            let mut out = BufWriter::new(file);
            report::write_report(&mut out, app_config.output.format, &report)?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report::write_report(&mut out, app_config.output.format, &report)?;
        }
    }

    Ok(analysis.verdict)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
