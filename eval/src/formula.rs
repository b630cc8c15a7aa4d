//! `Formula`: the user-facing, substitutable view over a production.

use core::fmt;
use std::{collections::BTreeSet, sync::Arc};

use crate::{
    bindings::Bindings,
    compiler::Evaluator,
    config::Config,
    directory::Directory,
    error::Error,
    expression::Expression,
    production::{Composable, Operand, Production},
    EvalResult,
};
use formula_tree::{Number, Template, Tree};

/// Formula over a set of free variables, with a precomputed display [`Template`].
///
/// A formula is created from a [`Production`] or a plain [`Number`], and is immutable.
/// Formulas can be:
///
/// - [substituted](Self::subs()) with values for all free variables, producing
///   a bound [`Expression`]
/// - [curried](Self::curry()) with values for some free variables, producing
///   a formula over the remaining variables
/// - composed with other formulas and numbers using the same operators as productions.
///
/// # Examples
///
/// ```
/// # use approx::assert_abs_diff_eq;
/// # use formula_eval::{Bindings, Formula, Number, SymbolRegistry};
/// # fn main() -> anyhow::Result<()> {
/// let registry = SymbolRegistry::new();
/// let [x, y, z] = [registry.symbol("x")?, registry.symbol("y")?, registry.symbol("z")?];
/// let formula = Formula::new(x * y - z);
/// assert_eq!(formula.arity(), 3);
///
/// let bindings = Bindings::new().with("x", 2).with("y", 8.2).with("z", 10);
/// let expr = formula.subs(bindings)?;
/// assert_eq!(expr.text(), "2*8.2-10");
/// let Number::Real(value) = expr.value()? else { unreachable!() };
/// assert_abs_diff_eq!(value, 6.4, epsilon = 1e-12);
///
/// let curried = formula.curry(Bindings::new().with("z", -1))?;
/// assert_eq!(curried.to_string(), "x*y-(-1)");
/// assert_eq!(curried.arity(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Formula {
    production: Production,
    template: Arc<Template>,
}

impl fmt::Debug for Formula {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Formula")
            .field("template", &self.template.to_string())
            .field("free_variables", self.free_variables())
            .finish()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.template, formatter)
    }
}

impl From<Production> for Formula {
    fn from(production: Production) -> Self {
        Self::new(production)
    }
}

impl Formula {
    /// Creates a formula from the provided production.
    pub fn new(production: Production) -> Self {
        let template = Arc::new(production.template());
        Self {
            production,
            template,
        }
    }

    /// Creates a formula with no free variables.
    pub fn constant(value: impl Into<Number>) -> Self {
        Self::new(Production::constant(value))
    }

    /// Creates a formula and registers it in the [global directory](Directory::global())
    /// under the specified name, overwriting any formula previously registered
    /// under this name.
    pub fn named(name: impl Into<String>, production: Production) -> Self {
        let formula = Self::new(production);
        formula.register(Directory::global(), name);
        formula
    }

    /// Registers a copy of this formula in `directory` under the specified name.
    pub fn register(&self, directory: &Directory, name: impl Into<String>) {
        directory.insert(name, self.clone());
    }

    /// Returns names of the free variables of this formula.
    pub fn free_variables(&self) -> &BTreeSet<String> {
        self.production.free_variables()
    }

    /// Returns the number of free variables.
    pub fn arity(&self) -> usize {
        self.free_variables().len()
    }

    /// Returns the display template of this formula.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Returns the display template with placeholders surrounded by delimiters
    /// from the provided `config`, e.g. `$x@*$y@`.
    pub fn marked(&self, config: &Config) -> String {
        self.template.marked(config.delimiters)
    }

    /// Returns the expression tree of this formula.
    pub fn tree(&self) -> &Tree {
        self.production.tree()
    }

    /// Returns the underlying production.
    pub fn production(&self) -> &Production {
        &self.production
    }

    /// Returns the compiled evaluator of this formula.
    pub fn evaluator(&self) -> &Evaluator {
        self.production.evaluator()
    }

    /// Binds all free variables of this formula to values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentMismatch`] if bound names are not exactly
    /// the free variables of this formula.
    pub fn subs(&self, bindings: Bindings) -> EvalResult<Expression> {
        if !bindings.matches(self.free_variables()) {
            return Err(Error::argument_mismatch(
                self.free_variables(),
                bindings.names(),
            ));
        }
        Ok(Expression::new(
            self.evaluator().clone(),
            Arc::clone(&self.template),
            bindings,
        ))
    }

    /// Fixes values of some free variables of this formula, returning a formula
    /// over the remaining free variables. Fixed variables are replaced with numeric leaves
    /// in the expression tree of the returned formula; this formula is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentMismatch`] if any bound name is not a free variable
    /// of this formula.
    pub fn curry(&self, bindings: Bindings) -> EvalResult<Self> {
        let free_variables = self.free_variables();
        if bindings.names().any(|name| !free_variables.contains(name)) {
            return Err(Error::argument_mismatch(free_variables, bindings.names()));
        }
        if bindings.is_empty() {
            return Ok(self.clone());
        }

        log::debug!(
            "currying formula `{}` with {} fixed variable(s)",
            self.template,
            bindings.len()
        );
        let fixed_value = |name: &str| bindings.get(name);
        let tree = Tree::fix_symbols(self.production.shared_tree(), &fixed_value);
        let remaining = free_variables
            .iter()
            .filter(|&name| !bindings.contains(name))
            .cloned()
            .collect();
        let evaluator = self.evaluator().clone().with_fixed(bindings);
        Ok(Self::new(Production::from_parts(tree, evaluator, remaining)))
    }
}

impl Composable for Formula {
    fn to_production(&self) -> Production {
        self.production.clone()
    }

    fn from_production(production: Production) -> Self {
        Self::new(production)
    }
}

impl From<Formula> for Operand<Formula> {
    fn from(value: Formula) -> Self {
        Self::Node(value)
    }
}

impl From<&Formula> for Operand<Formula> {
    fn from(value: &Formula) -> Self {
        Self::Node(value.clone())
    }
}
