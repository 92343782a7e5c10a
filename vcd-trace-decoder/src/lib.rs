//! VCD Trace Decoder Library
//!
//! A streaming analyzer for Value Change Dump traces produced by simulating
//! a RISC-V core. It checks whether the core executed code it wrote to memory
//! at runtime (JIT-style, self-modifying code) by counting how often the
//! program counter sits inside a code buffer.
//!
//! # Architecture
//!
//! Data flows strictly forward through the modules:
//! - [`scanner`] reads the trace line by line, collecting `$var` declarations
//!   until `$enddefinitions` and then yielding value changes
//! - [`registry`] maps trace symbols to the tracked signals
//! - [`value`] decodes binary value text, reading unknown bits as zero
//! - [`stats`] folds value changes into counters
//! - [`verdict`] applies the pass threshold
//!
//! The library does NOT:
//! - Parse scopes, real or string values
//! - Keep value history or timestamps
//! - Print reports
//!
//! Report rendering and the command line live in the application layer
//! (vcd-trace-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use vcd_trace_decoder::{AnalyzerConfig, TraceAnalyzer};
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::new()
//!     .with_window(0x102c, 0x10)
//!     .with_min_window_samples(10_000);
//!
//! let analyzer = TraceAnalyzer::new(config).unwrap();
//! let analysis = analyzer.analyze_file(Path::new("trace.vcd")).unwrap();
//!
//! println!("Verdict: {}", analysis.verdict);
//! println!("Samples in window: {}", analysis.statistics.pc_in_window);
//! ```

// Public modules
pub mod analyzer;
pub mod config;
pub mod registry;
pub mod scanner;
pub mod stats;
pub mod types;
pub mod value;
pub mod verdict;

// Re-export main types for convenience
pub use analyzer::{Analysis, TraceAnalyzer};
pub use config::{AnalyzerConfig, MemoryLayout, SignalNames};
pub use registry::{RegistryBuilder, SymbolRegistry};
pub use scanner::{ScanSummary, TraceScanner};
pub use stats::{StatisticsAggregator, TraceStatistics};
pub use types::{RawValue, Result, SignalRole, TraceError, ValueChange, ValueError};
pub use value::decode_binary;
pub use verdict::Verdict;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
