//! Standalone value change dumper
//!
//! Prints every change of a tracked signal with its decoded value, followed
//! by a summary. Useful for checking that a trace declares the expected
//! signals before running a full analysis.
//!
//! Usage:
//!   dump_changes <trace.vcd> [--limit <count>]
//!
//! Example:
//!   cargo run --example dump_changes -- build/trace.vcd --limit 100

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use vcd_trace_decoder::{decode_binary, RawValue, SignalNames, SignalRole, TraceScanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut trace: Option<PathBuf> = None;
    let mut limit: Option<usize> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--limit" => {
                let value = args.next().ok_or("--limit needs a value")?;
                limit = Some(value.parse()?);
            }
            _ => trace = Some(PathBuf::from(arg)),
        }
    }

    let Some(trace) = trace else {
        eprintln!("Usage: dump_changes <trace.vcd> [--limit <count>]");
        std::process::exit(2);
    };

    let names = SignalNames::default();
    let file = File::open(&trace)?;
    let mut scanner = TraceScanner::new(BufReader::new(file), names.clone());

    let mut per_role: HashMap<SignalRole, usize> = HashMap::new();
    let mut printed = 0;

    for change in scanner.by_ref() {
        let change = change?;
        *per_role.entry(change.role).or_default() += 1;

        if limit.is_some_and(|max| printed >= max) {
            continue;
        }
        let decoded = match &change.value {
            RawValue::MultiBit(digits) => decode_binary(digits)
                .map(|v| format!("0x{:x}", v))
                .unwrap_or_else(|e| format!("<{}>", e)),
            RawValue::SingleBit(bit) => bit.to_string(),
        };
        println!(
            "{:>8}  {:<32} {:<20} {}",
            change.line,
            names.name(change.role),
            change.value.to_string(),
            decoded
        );
        printed += 1;
    }

    let summary = scanner.summary();
    println!("\n=== SCAN SUMMARY ===");
    println!("Lines read: {}", summary.lines);
    println!("Declarations: {}", summary.declarations);
    println!("Tracked symbols: {}", summary.tracked_symbols);
    println!("Tracked value changes: {}", summary.value_changes);
    for role in SignalRole::ALL {
        println!(
            "  {:<24} {}",
            role.to_string(),
            per_role.get(&role).copied().unwrap_or(0)
        );
    }

    Ok(())
}
