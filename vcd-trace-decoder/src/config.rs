//! Analyzer configuration types
//!
//! This module defines the constants an analysis run depends on: which
//! signals to track, the address window of interest, the register and value
//! to look for, and the verdict threshold. A configuration is built once and
//! handed to the analyzer; nothing mutates it during a scan.

use crate::types::{Result, SignalRole, TraceError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a trace analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Names of the tracked signals as declared in the trace
    pub signals: SignalNames,

    /// First address of the window of interest
    pub window_base: u64,

    /// Size of the window of interest in bytes
    pub window_size: u64,

    /// Register index whose writes are counted separately (10 = a0)
    pub target_register: u64,

    /// Register write data that sets the target-value flag
    pub target_value: u64,

    /// In-window samples must strictly exceed this for a PASS
    pub min_window_samples: u64,

    /// Expected memory layout, reported only
    pub layout: MemoryLayout,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            signals: SignalNames::default(),
            window_base: default_code_buffer(),
            window_size: 0x10,
            target_register: 10,
            target_value: 42,
            min_window_samples: 10_000,
            layout: MemoryLayout::default(),
        }
    }
}

fn default_code_buffer() -> u64 {
    0x102c
}

/// Signal names as they appear in `$var` declarations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalNames {
    pub program_counter: String,
    pub memory_write_enable: String,
    pub register_write_address: String,
    pub register_write_data: String,
}

impl Default for SignalNames {
    fn default() -> Self {
        Self {
            program_counter: "io_instruction_address".to_string(),
            memory_write_enable: "io_memory_bundle_write_enable".to_string(),
            register_write_address: "regs_io_write_address".to_string(),
            register_write_data: "regs_io_write_data".to_string(),
        }
    }
}

impl SignalNames {
    /// Name configured for a role
    pub fn name(&self, role: SignalRole) -> &str {
        match role {
            SignalRole::ProgramCounter => &self.program_counter,
            SignalRole::MemoryWriteEnable => &self.memory_write_enable,
            SignalRole::RegisterWriteAddress => &self.register_write_address,
            SignalRole::RegisterWriteData => &self.register_write_data,
        }
    }

    /// Role a declared name is tracked under, if any
    pub fn role_of(&self, name: &str) -> Option<SignalRole> {
        SignalRole::ALL.into_iter().find(|role| self.name(*role) == name)
    }
}

/// Addresses of interest in the program under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLayout {
    pub entry_point: u64,
    pub code_buffer: u64,
    pub jit_instructions: u64,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            entry_point: 0x1000,
            code_buffer: default_code_buffer(),
            jit_instructions: 0x1034,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new analyzer configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the tracked signal names
    pub fn with_signals(mut self, signals: SignalNames) -> Self {
        self.signals = signals;
        self
    }

    /// Builder method: set the name tracked for one role
    pub fn with_signal_name(mut self, role: SignalRole, name: impl Into<String>) -> Self {
        let name = name.into();
        match role {
            SignalRole::ProgramCounter => self.signals.program_counter = name,
            SignalRole::MemoryWriteEnable => self.signals.memory_write_enable = name,
            SignalRole::RegisterWriteAddress => self.signals.register_write_address = name,
            SignalRole::RegisterWriteData => self.signals.register_write_data = name,
        }
        self
    }

    /// Builder method: set the address window `[base, base + size)`
    pub fn with_window(mut self, base: u64, size: u64) -> Self {
        self.window_base = base;
        self.window_size = size;
        self
    }

    /// Builder method: set the register index to watch
    pub fn with_target_register(mut self, index: u64) -> Self {
        self.target_register = index;
        self
    }

    /// Builder method: set the register data value to watch for
    pub fn with_target_value(mut self, value: u64) -> Self {
        self.target_value = value;
        self
    }

    /// Builder method: set the verdict threshold
    pub fn with_min_window_samples(mut self, threshold: u64) -> Self {
        self.min_window_samples = threshold;
        self
    }

    /// Builder method: set the reported memory layout
    pub fn with_layout(mut self, layout: MemoryLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Exclusive end of the address window
    ///
    /// Saturates for windows that [`validate`](Self::validate) rejects.
    pub fn window_end(&self) -> u64 {
        self.window_base.saturating_add(self.window_size)
    }

    /// Check whether an address falls within `[window_base, window_end)`
    pub fn in_window(&self, address: u128) -> bool {
        address >= u128::from(self.window_base) && address < u128::from(self.window_end())
    }

    /// Reject configurations an analysis cannot run with
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for role in SignalRole::ALL {
            let name = self.signals.name(role);
            if name.trim().is_empty() {
                return Err(TraceError::InvalidConfig(format!(
                    "signal name for {} is empty",
                    role
                )));
            }
            if name.chars().any(char::is_whitespace) {
                return Err(TraceError::InvalidConfig(format!(
                    "signal name {:?} contains whitespace",
                    name
                )));
            }
            if !seen.insert(name) {
                return Err(TraceError::InvalidConfig(format!(
                    "signal name {:?} is tracked for more than one role",
                    name
                )));
            }
        }

        if self.window_size == 0 {
            return Err(TraceError::InvalidConfig(
                "address window size must be non-zero".to_string(),
            ));
        }
        if self.window_base.checked_add(self.window_size).is_none() {
            return Err(TraceError::InvalidConfig(format!(
                "address window 0x{:x}+0x{:x} overflows",
                self.window_base, self.window_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_design() {
        let config = AnalyzerConfig::new();
        assert_eq!(config.window_base, 0x102c);
        assert_eq!(config.window_end(), 0x103c);
        assert_eq!(config.target_register, 10);
        assert_eq!(config.target_value, 42);
        assert_eq!(config.min_window_samples, 10_000);
        assert_eq!(config.layout.entry_point, 0x1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analyzer_config_builder() {
        let config = AnalyzerConfig::new()
            .with_window(0x2000, 0x40)
            .with_target_register(11)
            .with_target_value(7)
            .with_min_window_samples(3)
            .with_signal_name(SignalRole::ProgramCounter, "pc");

        assert_eq!(config.window_end(), 0x2040);
        assert_eq!(config.target_register, 11);
        assert_eq!(config.target_value, 7);
        assert_eq!(config.min_window_samples, 3);
        assert_eq!(config.signals.program_counter, "pc");
        assert_eq!(config.signals.role_of("pc"), Some(SignalRole::ProgramCounter));
        assert_eq!(config.signals.role_of("io_instruction_address"), None);
    }

    #[test]
    fn test_whole_table_builders() {
        let names = SignalNames {
            program_counter: "core_pc".to_string(),
            memory_write_enable: "dmem_we".to_string(),
            register_write_address: "rf_waddr".to_string(),
            register_write_data: "rf_wdata".to_string(),
        };
        let layout = MemoryLayout {
            entry_point: 0x8000_0000,
            code_buffer: 0x8000_0100,
            jit_instructions: 0x8000_0200,
        };
        let config = AnalyzerConfig::new()
            .with_signals(names.clone())
            .with_layout(layout);

        assert_eq!(config.signals, names);
        assert_eq!(config.signals.role_of("rf_wdata"), Some(SignalRole::RegisterWriteData));
        assert_eq!(config.signals.role_of("regs_io_write_data"), None);
        assert_eq!(config.layout, layout);
        assert_eq!(config.window_base, 0x102c);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_bounds() {
        let config = AnalyzerConfig::new();
        assert!(!config.in_window(0x102b));
        assert!(config.in_window(0x102c));
        assert!(config.in_window(0x103b));
        assert!(!config.in_window(0x103c));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let config = AnalyzerConfig::new()
            .with_signal_name(SignalRole::RegisterWriteData, "regs_io_write_address");
        assert!(matches!(config.validate(), Err(TraceError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_names() {
        let empty = AnalyzerConfig::new().with_signal_name(SignalRole::MemoryWriteEnable, "");
        assert!(empty.validate().is_err());

        let spaced = AnalyzerConfig::new().with_signal_name(SignalRole::MemoryWriteEnable, "a b");
        assert!(spaced.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_window() {
        assert!(AnalyzerConfig::new().with_window(0x1000, 0).validate().is_err());
        assert!(AnalyzerConfig::new().with_window(u64::MAX, 2).validate().is_err());
        assert!(AnalyzerConfig::new().with_window(u64::MAX - 1, 1).validate().is_ok());
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{ "min_window_samples": 5, "signals": { "program_counter": "pc" } }"#)
                .unwrap();
        assert_eq!(config.min_window_samples, 5);
        assert_eq!(config.signals.program_counter, "pc");
        assert_eq!(config.signals.register_write_data, "regs_io_write_data");
        assert_eq!(config.window_base, 0x102c);
    }
}
