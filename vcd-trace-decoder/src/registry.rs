//! Symbol registry
//!
//! Maps the compact identifier codes of a trace onto the signals the analysis
//! tracks. The registry is built while the declarations section is read
//! ([`RegistryBuilder`]) and frozen into a read-only [`SymbolRegistry`] when
//! the section ends. The frozen registry has no way to accept declarations.

use crate::config::SignalNames;
use crate::types::SignalRole;
use std::collections::HashMap;

/// Mutable registry used during the declarations section
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    names: SignalNames,
    by_symbol: HashMap<String, SignalRole>,
    by_role: HashMap<SignalRole, String>,
    declarations: u64,
}

impl RegistryBuilder {
    /// Create an empty builder that retains only `names`
    pub fn new(names: SignalNames) -> Self {
        Self {
            names,
            by_symbol: HashMap::new(),
            by_role: HashMap::new(),
            declarations: 0,
        }
    }

    /// Register `symbol` as `name` if the name is tracked
    ///
    /// Returns true when the declaration was retained. A symbol that is
    /// declared again is rebound.
    pub fn declare(&mut self, symbol: &str, name: &str) -> bool {
        self.declarations += 1;

        let Some(role) = self.names.role_of(name) else {
            log::trace!("Ignoring untracked signal {} ({})", name, symbol);
            return false;
        };

        if let Some(previous) = self.by_symbol.insert(symbol.to_string(), role) {
            if previous != role {
                log::warn!(
                    "Symbol {} rebound from {} to {}",
                    symbol,
                    self.names.name(previous),
                    name
                );
                if self.by_role.get(&previous).map(String::as_str) == Some(symbol) {
                    self.by_role.remove(&previous);
                }
            }
        }
        self.by_role.insert(role, symbol.to_string());

        log::debug!("Tracking {} as symbol {}", name, symbol);
        true
    }

    /// Number of declarations seen so far, tracked or not
    pub fn declarations(&self) -> u64 {
        self.declarations
    }

    /// Close the declarations section
    pub fn finish(self) -> SymbolRegistry {
        SymbolRegistry {
            names: self.names,
            by_symbol: self.by_symbol,
            by_role: self.by_role,
            declarations: self.declarations,
        }
    }
}

/// Read-only symbol table used while value changes are streamed
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    names: SignalNames,
    by_symbol: HashMap<String, SignalRole>,
    by_role: HashMap<SignalRole, String>,
    declarations: u64,
}

impl SymbolRegistry {
    /// Role of the signal bound to `symbol`
    pub fn resolve(&self, symbol: &str) -> Option<SignalRole> {
        self.by_symbol.get(symbol).copied()
    }

    /// Name of the signal bound to `symbol`
    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        self.resolve(symbol).map(|role| self.names.name(role))
    }

    /// Symbol most recently declared for `role`
    pub fn symbol_for(&self, role: SignalRole) -> Option<&str> {
        self.by_role.get(&role).map(String::as_str)
    }

    /// Tracked roles that never got a declaration
    pub fn missing_roles(&self) -> Vec<SignalRole> {
        SignalRole::ALL
            .into_iter()
            .filter(|role| !self.by_role.contains_key(role))
            .collect()
    }

    /// Number of retained symbols
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Number of declarations read, tracked or not
    pub fn declarations(&self) -> u64 {
        self.declarations
    }
}
