//! Registry of symbol names.

use std::{
    collections::{BTreeSet, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use once_cell::sync::Lazy;

use crate::{error::Error, production::Production, EvalResult};

static GLOBAL: Lazy<SymbolRegistry> = Lazy::new(SymbolRegistry::new);

/// Registry ensuring that no two symbols share a name.
///
/// A registry owns the names of symbols created through it; names are never released
/// while the registry is alive, and are released all at once when it is dropped.
/// This allows scoping symbol names to a formula-building session. Symbols created
/// via [`Production::symbol()`] use the process-wide [global registry](Self::global()),
/// whose names are never released.
///
/// # Examples
///
/// ```
/// # use formula_eval::{Error, SymbolRegistry};
/// # fn main() -> anyhow::Result<()> {
/// let registry = SymbolRegistry::new();
/// let x = registry.symbol("x")?;
/// assert_eq!(x.to_string(), "x");
///
/// let err = registry.symbol("x").unwrap_err();
/// assert_eq!(err, Error::DuplicateSymbolName("x".to_owned()));
/// let err = registry.symbol("2x").unwrap_err();
/// assert_eq!(err, Error::InvalidSymbolName("2x".to_owned()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    names: Mutex<HashSet<String>>,
}

impl SymbolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set is always left consistent, so a poisoned lock is safe to reuse.
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks whether `name` is a valid symbol name: a letter or `_` followed by
    /// letters, digits or `_`.
    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        (first.is_alphabetic() || first == '_')
            && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
    }

    /// Registers `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid identifier, or if it is already registered.
    pub fn register(&self, name: &str) -> EvalResult<()> {
        if !Self::is_valid_name(name) {
            return Err(Error::InvalidSymbolName(name.to_owned()));
        }
        if !self.lock().insert(name.to_owned()) {
            return Err(Error::DuplicateSymbolName(name.to_owned()));
        }
        log::debug!("registered symbol `{name}`");
        Ok(())
    }

    /// Registers `name` and creates a symbol production for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid identifier, or if it is already registered.
    pub fn symbol(&self, name: &str) -> EvalResult<Production> {
        self.register(name)?;
        Ok(Production::symbol_unchecked(name))
    }

    /// Creates several symbols at once. Names are separated by commas and / or whitespace,
    /// e.g., `"x, y z"`.
    ///
    /// # Errors
    ///
    /// Returns an error on the first invalid or duplicate name. Symbols preceding
    /// the failed one remain registered.
    pub fn symbols(&self, names: &str) -> EvalResult<Vec<Production>> {
        names
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|name| !name.is_empty())
            .map(|name| self.symbol(name))
            .collect()
    }

    /// Checks whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the registered names in the alphabetical order.
    pub fn names(&self) -> BTreeSet<String> {
        self.lock().iter().cloned().collect()
    }
}
