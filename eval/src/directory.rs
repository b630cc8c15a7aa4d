//! Named-formula directory.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{PoisonError, RwLock},
};

use once_cell::sync::Lazy;

use crate::{bindings::Bindings, error::Error, formula::Formula, EvalResult};

static GLOBAL: Lazy<Directory> = Lazy::new(Directory::new);

/// Mapping of names to [`Formula`]s allowing to call formulas by name.
///
/// Unlike [`SymbolRegistry`](crate::SymbolRegistry), the directory does not enforce
/// name uniqueness: inserting a formula under an existing name overwrites the previous
/// entry. Entries are never removed.
///
/// # Examples
///
/// ```
/// # use formula_eval::{Bindings, Directory, Formula, Number, SymbolRegistry};
/// # fn main() -> anyhow::Result<()> {
/// let registry = SymbolRegistry::new();
/// let r = registry.symbol("r")?;
/// let directory = Directory::new();
/// Formula::new(r.pow(2) * 3).register(&directory, "area");
///
/// let area = directory.call("area", Bindings::new().with("r", 2))?;
/// assert_eq!(area, Number::Int(12));
/// assert!(directory.call("volume", Bindings::new()).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Directory {
    formulas: RwLock<HashMap<String, Formula>>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide directory used by [`Formula::named()`].
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Inserts a formula, returning the formula previously registered under the same name.
    pub fn insert(&self, name: impl Into<String>, formula: Formula) -> Option<Formula> {
        let name = name.into();
        let mut formulas = self.formulas.write().unwrap_or_else(PoisonError::into_inner);
        let previous = formulas.insert(name.clone(), formula);
        if previous.is_some() {
            log::debug!("overwritten formula `{name}` in directory");
        } else {
            log::debug!("inserted formula `{name}` into directory");
        }
        previous
    }

    /// Returns a formula with the specified name.
    pub fn get(&self, name: &str) -> Option<Formula> {
        let formulas = self.formulas.read().unwrap_or_else(PoisonError::into_inner);
        formulas.get(name).cloned()
    }

    /// Checks whether the directory contains a formula with the specified name.
    pub fn contains(&self, name: &str) -> bool {
        let formulas = self.formulas.read().unwrap_or_else(PoisonError::into_inner);
        formulas.contains_key(name)
    }

    /// Returns the number of formulas in this directory.
    pub fn len(&self) -> usize {
        let formulas = self.formulas.read().unwrap_or_else(PoisonError::into_inner);
        formulas.len()
    }

    /// Checks whether this directory is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the names of formulas in this directory in the alphabetical order.
    pub fn names(&self) -> BTreeSet<String> {
        let formulas = self.formulas.read().unwrap_or_else(PoisonError::into_inner);
        formulas.keys().cloned().collect()
    }

    /// Substitutes `bindings` into the formula with the specified name and evaluates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormula`] if there is no formula with the specified name.
    /// Propagates substitution and evaluation errors.
    pub fn call(&self, name: &str, bindings: Bindings) -> EvalResult {
        let formula = self
            .get(name)
            .ok_or_else(|| Error::UnknownFormula(name.to_owned()))?;
        formula.subs(bindings)?.value()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Number, Production, SymbolRegistry};

    #[test]
    fn overwriting_formulas() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let directory = Directory::new();
        assert!(directory.is_empty());

        let previous = directory.insert("f", Formula::new(&x + 1));
        assert!(previous.is_none());
        let previous = directory.insert("f", Formula::new(&x * 2)).unwrap();
        assert_eq!(previous.to_string(), "x+1");
        assert_eq!(directory.len(), 1);

        let value = directory.call("f", Bindings::new().with("x", 5)).unwrap();
        assert_eq!(value, Number::Int(10));
    }

    #[test]
    fn calling_formulas() {
        let registry = SymbolRegistry::new();
        let [a, b] = [registry.symbol("a").unwrap(), registry.symbol("b").unwrap()];
        let directory = Directory::new();
        Formula::new(&a - &b).register(&directory, "diff");
        Formula::new(a.less_than(b)).register(&directory, "lt");
        let names: Vec<_> = directory.names().into_iter().collect();
        assert_eq!(names, ["diff", "lt"]);

        let bindings = Bindings::new().with("a", 1).with("b", 2.5);
        assert_eq!(directory.call("diff", bindings.clone()), Ok(Number::Real(-1.5)));
        assert_eq!(directory.call("lt", bindings), Ok(Number::Bool(true)));

        let err = directory.call("diff", Bindings::new().with("a", 1)).unwrap_err();
        assert_matches!(err, Error::ArgumentMismatch { .. });
        let err = directory.call("sum", Bindings::new()).unwrap_err();
        assert_matches!(err, Error::UnknownFormula(name) if name == "sum");
    }

    #[test]
    fn named_formulas_use_global_directory() {
        let x = Production::symbol("directory_test_x").unwrap();
        let formula = Formula::named("directory_test_square", x.pow(2));
        assert_eq!(formula.arity(), 1);
        let value = Directory::global()
            .call(
                "directory_test_square",
                Bindings::new().with("directory_test_x", 3),
            )
            .unwrap();
        assert_eq!(value, Number::Int(9));
    }
}
