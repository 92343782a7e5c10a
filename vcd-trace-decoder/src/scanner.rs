//! VCD trace scanner
//!
//! Single-pass reader over a value change dump. The scanner starts in the
//! declarations section, where `$var` lines feed a [`RegistryBuilder`]. The
//! `$enddefinitions` line freezes the registry and switches to the value
//! change section, where every change of a tracked signal is yielded as a
//! [`ValueChange`].
//!
//! ## Recognized line shapes
//! - `$var <type> <width> <symbol> <name> ...` (declarations only)
//! - `$enddefinitions ...` (declarations only)
//! - `#<time>` timestamps, skipped
//! - `b<digits> <symbol>` multi-bit changes
//! - `<0|1|x|z><symbol>` single-bit changes
//!
//! Anything else is skipped silently. Only one line is held in memory at a
//! time.

use crate::config::SignalNames;
use crate::registry::{RegistryBuilder, SymbolRegistry};
use crate::types::{RawValue, Result, ValueChange};
use crate::value::is_scalar_bit;
use serde::Serialize;
use std::io::BufRead;

const VAR_MARKER: &str = "$var";
const END_DEFINITIONS_MARKER: &str = "$enddefinitions";
const TIMESTAMP_MARKER: char = '#';
const MULTI_BIT_MARKER: char = 'b';

/// Section of the trace the scanner is in
#[derive(Debug)]
enum ScanPhase {
    /// Reading `$var` declarations into a mutable registry
    Declarations(RegistryBuilder),
    /// Streaming value changes against the frozen registry
    ValueChanges(SymbolRegistry),
}

impl ScanPhase {
    /// The `$enddefinitions` transition
    fn end_definitions(self) -> Self {
        match self {
            ScanPhase::Declarations(builder) => ScanPhase::ValueChanges(builder.finish()),
            phase => phase,
        }
    }
}

/// Counters describing what a scan read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Lines read, including blank and skipped ones
    pub lines: u64,
    /// `$var` declarations seen, tracked or not
    pub declarations: u64,
    /// Symbols bound to a tracked signal
    pub tracked_symbols: u64,
    /// Value changes yielded for tracked signals
    pub value_changes: u64,
    /// Whether `$enddefinitions` was reached
    pub reached_value_changes: bool,
}

/// A value-change line split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueLine<'a> {
    MultiBit { digits: &'a str, symbol: &'a str },
    SingleBit { bit: char, symbol: &'a str },
}

impl<'a> ValueLine<'a> {
    fn symbol(&self) -> &'a str {
        match self {
            ValueLine::MultiBit { symbol, .. } | ValueLine::SingleBit { symbol, .. } => symbol,
        }
    }

    fn to_raw(self) -> RawValue {
        match self {
            ValueLine::MultiBit { digits, .. } => RawValue::MultiBit(digits.to_string()),
            ValueLine::SingleBit { bit, .. } => RawValue::SingleBit(bit),
        }
    }
}

/// Split a `$var` line into `(symbol, name)`
pub(crate) fn parse_declaration(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with(VAR_MARKER) {
        return None;
    }
    let mut fields = line.split_whitespace();
    let symbol = fields.nth(3)?;
    let name = fields.next()?;
    Some((symbol, name))
}

/// Classify a trimmed line from the value change section
pub(crate) fn parse_value_change(line: &str) -> Option<ValueLine<'_>> {
    let first = line.chars().next()?;

    if first == TIMESTAMP_MARKER {
        return None;
    }

    if first == MULTI_BIT_MARKER {
        let space = line.find(' ')?;
        return Some(ValueLine::MultiBit {
            digits: &line[1..space],
            symbol: &line[space + 1..],
        });
    }

    if is_scalar_bit(first) && line.len() >= 2 {
        return Some(ValueLine::SingleBit {
            bit: first,
            symbol: &line[1..],
        });
    }

    None
}

/// Streaming scanner over a VCD trace
///
/// Yields one [`ValueChange`] per change of a tracked signal. I/O failures
/// end the iteration with an error.
pub struct TraceScanner<R> {
    reader: R,
    line: String,
    phase: ScanPhase,
    summary: ScanSummary,
    finished: bool,
}

impl<R: BufRead> TraceScanner<R> {
    /// Create a scanner that tracks the signals named in `names`
    pub fn new(reader: R, names: SignalNames) -> Self {
        Self {
            reader,
            line: String::new(),
            phase: ScanPhase::Declarations(RegistryBuilder::new(names)),
            summary: ScanSummary::default(),
            finished: false,
        }
    }

    /// Counters for the lines read so far
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Frozen registry, once the declarations section has ended
    pub fn registry(&self) -> Option<&SymbolRegistry> {
        match &self.phase {
            ScanPhase::ValueChanges(registry) => Some(registry),
            ScanPhase::Declarations(_) => None,
        }
    }

    /// True while `$var` lines are still accepted
    pub fn in_declarations(&self) -> bool {
        matches!(self.phase, ScanPhase::Declarations(_))
    }

    fn end_definitions(&mut self) {
        let placeholder = ScanPhase::ValueChanges(SymbolRegistry::default());
        self.phase = std::mem::replace(&mut self.phase, placeholder).end_definitions();

        if let ScanPhase::ValueChanges(registry) = &self.phase {
            self.summary.declarations = registry.declarations();
            self.summary.tracked_symbols = registry.len() as u64;
            self.summary.reached_value_changes = true;

            log::debug!(
                "End of definitions on line {}: {} of {} declarations tracked",
                self.summary.lines,
                registry.len(),
                registry.declarations()
            );
            for role in registry.missing_roles() {
                log::warn!("No declaration found for the {} signal", role);
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        if let ScanPhase::Declarations(builder) = &self.phase {
            self.summary.declarations = builder.declarations();
            log::warn!(
                "Trace ended after {} lines without {}",
                self.summary.lines,
                END_DEFINITIONS_MARKER
            );
        }
    }
}

impl<R: BufRead> Iterator for TraceScanner<R> {
    type Item = Result<ValueChange>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.finish();
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
            self.summary.lines += 1;

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }

            let mut ended_definitions = false;
            match &mut self.phase {
                ScanPhase::Declarations(builder) => {
                    if let Some((symbol, name)) = parse_declaration(line) {
                        builder.declare(symbol, name);
                    } else if line.starts_with(END_DEFINITIONS_MARKER) {
                        ended_definitions = true;
                    }
                }
                ScanPhase::ValueChanges(registry) => {
                    let Some(parsed) = parse_value_change(line) else {
                        continue;
                    };
                    let Some(role) = registry.resolve(parsed.symbol()) else {
                        continue;
                    };
                    self.summary.value_changes += 1;
                    return Some(Ok(ValueChange {
                        line: self.summary.lines,
                        role,
                        value: parsed.to_raw(),
                    }));
                }
            }

            if ended_definitions {
                self.end_definitions();
            }
        }
    }
}
