//! Core types for the VCD trace decoder library
//!
//! This module defines the errors, signal roles and value-change events that
//! flow between the scanner and the statistics aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, TraceError>;

/// Errors that can occur while analyzing a trace
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Failed to open trace file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value {text:?} on line {line}: {source}")]
    Value {
        /// 1-based line number in the trace
        line: u64,
        /// Raw value text as it appeared in the trace
        text: String,
        #[source]
        source: ValueError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Reasons a value text cannot be read as a binary numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("empty value")]
    Empty,

    #[error("'{0}' is not a binary digit")]
    InvalidDigit(char),

    #[error("value does not fit in 128 bits")]
    Overflow,
}

/// The part a tracked signal plays in the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalRole {
    /// Instruction address presented by the core
    ProgramCounter,
    /// Data memory write strobe
    MemoryWriteEnable,
    /// Register file write port address
    RegisterWriteAddress,
    /// Register file write port data
    RegisterWriteData,
}

impl SignalRole {
    /// All roles, in report order
    pub const ALL: [SignalRole; 4] = [
        SignalRole::ProgramCounter,
        SignalRole::MemoryWriteEnable,
        SignalRole::RegisterWriteAddress,
        SignalRole::RegisterWriteData,
    ];
}

impl fmt::Display for SignalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalRole::ProgramCounter => write!(f, "program counter"),
            SignalRole::MemoryWriteEnable => write!(f, "memory write enable"),
            SignalRole::RegisterWriteAddress => write!(f, "register write address"),
            SignalRole::RegisterWriteData => write!(f, "register write data"),
        }
    }
}

/// Raw value carried by a value-change line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Digits of a `b<digits> <symbol>` line, without the leading `b`
    MultiBit(String),
    /// The leading character of a `<bit><symbol>` line
    SingleBit(char),
}

impl RawValue {
    /// True for values read from a `b...` line
    pub fn is_multi_bit(&self) -> bool {
        matches!(self, RawValue::MultiBit(_))
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::MultiBit(digits) => write!(f, "b{}", digits),
            RawValue::SingleBit(bit) => write!(f, "{}", bit),
        }
    }
}

/// A value change for a tracked signal
///
/// Only produced for symbols the registry resolved; consumed immediately by
/// the aggregator and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// 1-based line number the change was read from
    pub line: u64,
    /// Role of the signal the symbol is bound to
    pub role: SignalRole,
    /// Value as written in the trace
    pub value: RawValue,
}
