//! Statistics aggregation
//!
//! Folds the value changes of tracked signals into a [`TraceStatistics`]
//! record. Counters only ever grow and the target-value flag, once set,
//! stays set for the rest of the scan.

use crate::config::AnalyzerConfig;
use crate::types::{RawValue, Result, SignalRole, TraceError, ValueChange, ValueError};
use crate::value::decode_binary;
use serde::{Deserialize, Serialize};

/// Counters accumulated over one trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStatistics {
    /// Non-zero program counter samples
    pub pc_samples: u64,
    /// Highest program counter value seen
    pub max_pc: u128,
    /// Program counter samples inside the address window
    pub pc_in_window: u64,
    /// Register file writes
    pub register_writes: u64,
    /// Register file writes to the target register
    pub target_register_writes: u64,
    /// Memory write strobes
    pub memory_writes: u64,
    /// Whether the target value was ever written to the register file
    pub target_value_seen: bool,
}

/// Applies value changes to a statistics record
pub struct StatisticsAggregator<'a> {
    config: &'a AnalyzerConfig,
    stats: TraceStatistics,
}

impl<'a> StatisticsAggregator<'a> {
    /// Create an aggregator with all counters at zero
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self {
            config,
            stats: TraceStatistics::default(),
        }
    }

    /// Apply one value change
    ///
    /// Fails only when a multi-bit value of a tracked signal is not a binary
    /// numeral. Values wider than 128 bits are kept as out of range: they
    /// never match a target and never fall inside the address window.
    pub fn record(&mut self, change: &ValueChange) -> Result<()> {
        match (change.role, &change.value) {
            (SignalRole::ProgramCounter, RawValue::MultiBit(digits)) => {
                let pc = decode(change.line, digits)?;
                self.record_pc(pc);
            }
            (SignalRole::RegisterWriteAddress, RawValue::MultiBit(digits)) => {
                self.stats.register_writes += 1;
                if decode(change.line, digits)? == Some(u128::from(self.config.target_register)) {
                    self.stats.target_register_writes += 1;
                }
            }
            (SignalRole::RegisterWriteData, RawValue::MultiBit(digits)) => {
                if decode(change.line, digits)? == Some(u128::from(self.config.target_value)) {
                    self.stats.target_value_seen = true;
                }
            }
            (SignalRole::MemoryWriteEnable, RawValue::SingleBit(bit)) => {
                if *bit == '1' {
                    self.stats.memory_writes += 1;
                }
            }
            (role, value) => {
                log::trace!("Ignoring {} change {} on line {}", role, value, change.line);
            }
        }
        Ok(())
    }

    // Address zero means the fetch port is not driving a real address yet.
    fn record_pc(&mut self, pc: Option<u128>) {
        let pc = match pc {
            Some(0) => return,
            Some(pc) => pc,
            None => u128::MAX,
        };
        self.stats.pc_samples += 1;
        self.stats.max_pc = self.stats.max_pc.max(pc);
        if self.config.in_window(pc) {
            self.stats.pc_in_window += 1;
        }
    }

    /// Statistics accumulated so far
    pub fn statistics(&self) -> &TraceStatistics {
        &self.stats
    }

    /// Consume the aggregator and return the final statistics
    pub fn into_statistics(self) -> TraceStatistics {
        self.stats
    }
}

/// Decoded value, or `None` when it does not fit in 128 bits
fn decode(line: u64, digits: &str) -> Result<Option<u128>> {
    match decode_binary(digits) {
        Ok(value) => Ok(Some(value)),
        Err(ValueError::Overflow) => {
            log::debug!("Value on line {} is wider than 128 bits", line);
            Ok(None)
        }
        Err(source) => Err(TraceError::Value {
            line,
            text: digits.to_string(),
            source,
        }),
    }
}
