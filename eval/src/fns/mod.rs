//! Math functions usable with plain numbers, productions and formulas.
//!
//! A [`MathFn`] wraps a host function over [`Number`]s. The same wrapped function
//! can be applied in three modes:
//!
//! - [`MathFn::call()`] computes the function on numbers right away.
//! - [`MathFn::compose()`] builds a function node over [`Production`]s or [`Formula`]s
//!   (and optionally numbers). A single call cannot mix productions and formulas;
//!   this is enforced by the type system.
//! - [`MathFn::apply()`] dispatches dynamically over [`Value`]s, rejecting a mix
//!   of productions and formulas with [`Error::TypeMismatch`].
//!
//! [`Library::standard()`] contains a standard set of functions (trigonometry,
//! rounding, combinatorics, logic, etc.).
//!
//! # Examples
//!
//! ```
//! # use formula_eval::{fns::Library, Bindings, Formula, Number, SymbolRegistry};
//! # fn main() -> anyhow::Result<()> {
//! let library = Library::standard();
//! let hypot = library.get("hypot").unwrap();
//! assert_eq!(hypot.call(&[3.into(), 4.into()])?, Number::Real(5.0));
//!
//! let registry = SymbolRegistry::new();
//! let [x, y] = [registry.symbol("x")?, registry.symbol("y")?];
//! let formula = Formula::new(hypot.compose(vec![(&x + 1).into(), y.into()])?);
//! assert_eq!(formula.to_string(), "hypot(x+1, y)");
//! let value = formula.subs(Bindings::new().with("x", 5).with("y", 8))?.value()?;
//! assert_eq!(value, Number::Real(10.0));
//! # Ok(())
//! # }
//! ```
//!
//! [`Production`]: crate::Production
//! [`Formula`]: crate::Formula

use core::fmt;
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    compiler::HostFn,
    error::{Error, OperandKind},
    production::{Composable, Operand, Production},
    value::Value,
    EvalResult, Formula,
};
use formula_tree::Number;

mod library;

/// Number of args accepted by a [`MathFn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly the specified number of args.
    Exact(usize),
    /// At least the specified number of args.
    AtLeast(usize),
    /// Number of args in the specified inclusive range.
    Range(usize, usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(count) => write!(formatter, "{count}"),
            Self::AtLeast(count) => write!(formatter, "at least {count}"),
            Self::Range(min, max) => write!(formatter, "{min}..={max}"),
        }
    }
}

impl Arity {
    /// Checks whether the specified number of args is acceptable.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => count == expected,
            Self::AtLeast(min) => count >= min,
            Self::Range(min, max) => (min..=max).contains(&count),
        }
    }
}

/// Named host function over [`Number`]s with a known [`Arity`].
#[derive(Clone)]
pub struct MathFn {
    name: Arc<str>,
    arity: Arity,
    function: HostFn,
}

impl fmt::Debug for MathFn {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MathFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl MathFn {
    /// Wraps a host function.
    pub fn new<F>(name: &str, arity: Arity, function: F) -> Self
    where
        F: Fn(&[Number]) -> EvalResult + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            arity,
            function: Arc::new(function),
        }
    }

    /// Returns the function name, which is used in rendered formulas.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the function arity.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    fn check_arity(&self, actual: usize) -> EvalResult<()> {
        if self.arity.accepts(actual) {
            Ok(())
        } else {
            Err(Error::ArityMismatch {
                function: self.name.to_string(),
                expected: self.arity,
                actual,
            })
        }
    }

    /// Calls the function on numbers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if the number of args is not accepted by the function,
    /// or propagates the error returned by the function.
    pub fn call(&self, args: &[Number]) -> EvalResult {
        self.check_arity(args.len())?;
        (self.function)(args)
    }

    /// Composes a call of this function over productions or formulas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if the number of args is not accepted by the function.
    pub fn compose<P: Composable>(&self, args: Vec<Operand<P>>) -> EvalResult<P> {
        self.check_arity(args.len())?;
        let args = args
            .into_iter()
            .map(|arg| Operand::Node(arg.into_production()))
            .collect();
        let production = Production::call(&self.name, Arc::clone(&self.function), args);
        Ok(P::from_production(production))
    }

    /// Applies this function to dynamically typed values. If all args are numbers,
    /// the function is called right away; otherwise, the call is composed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if args contain both productions and formulas.
    /// See also [`Self::call()`] and [`Self::compose()`].
    pub fn apply(&self, args: Vec<Value>) -> EvalResult<Value> {
        let has_productions = args.iter().any(|arg| matches!(arg, Value::Production(_)));
        let has_formulas = args.iter().any(|arg| matches!(arg, Value::Formula(_)));

        match (has_productions, has_formulas) {
            (true, true) => Err(Error::TypeMismatch {
                lhs: OperandKind::Production,
                rhs: OperandKind::Formula,
            }),
            (true, false) => {
                let args = args
                    .into_iter()
                    .map(Operand::<Production>::try_from)
                    .collect::<EvalResult<Vec<_>>>()?;
                self.compose(args).map(Value::Production)
            }
            (false, true) => {
                let args = args
                    .into_iter()
                    .map(Operand::<Formula>::try_from)
                    .collect::<EvalResult<Vec<_>>>()?;
                self.compose(args).map(Value::Formula)
            }
            (false, false) => {
                let args: Vec<_> = args.iter().filter_map(Value::as_number).collect();
                self.call(&args).map(Value::Number)
            }
        }
    }
}

/// Collection of named [`MathFn`]s.
#[derive(Debug, Clone, Default)]
pub struct Library {
    functions: BTreeMap<String, MathFn>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a function into this library, returning the function previously registered
    /// under the same name.
    pub fn insert(&mut self, function: MathFn) -> Option<MathFn> {
        self.functions.insert(function.name().to_owned(), function)
    }

    /// Returns the function with the specified name.
    pub fn get(&self, name: &str) -> Option<&MathFn> {
        self.functions.get(name)
    }

    /// Checks whether the library contains a function with the specified name.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns the number of functions in this library.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Checks whether this library is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterates over functions in the alphabetical order of their names.
    pub fn iter(&self) -> impl Iterator<Item = &MathFn> + '_ {
        self.functions.values()
    }
}
