//! Parametric formulas built from symbols by operator composition, with substitution,
//! currying and evaluation.
//!
//! # How it works
//!
//! 1. [Symbols](Production::symbol()) are created with unique names, either in the process-wide
//!   registry or in a scoped [`SymbolRegistry`].
//! 2. Symbols and numbers are combined with Rust operators (`+`, `-`, `*`, `/`, `%`, shifts,
//!   bitwise ops, unary `-` and `!`) and [methods](Production::pow()) for operations without
//!   a matching trait (`**`, `//`, comparisons). The result is a [`Production`]: an immutable
//!   expression tree with a compiled evaluator. Composition never evaluates anything.
//! 3. A [`Formula`] wraps a production and precomputes its display template. Formulas
//!   can be [substituted](Formula::subs()) with values for all free variables, producing
//!   a bound [`Expression`], or [curried](Formula::curry()) with values for some variables.
//! 4. An [`Expression`] computes its [value](Expression::value()) and renders
//!   its [text](Expression::text()) with the bound values inlined.
//!
//! Formulas may be stored in a [`Directory`] and called by name. The [`fns`] module
//! provides math functions working with numbers, productions and formulas alike.
//! Univariate formulas can be sampled on a range with a [`Sampler`].
//!
//! # Type system
//!
//! All computations operate on [`Number`]s, which are integers, reals, complex numbers
//! or Boolean values. See the [`arith`] module for the details of arithmetic operations.
//!
//! Productions and formulas are two separate composition universes: an operation
//! cannot mix a production and a formula. With the statically typed API, such an operation
//! does not compile; with dynamically typed [`Value`]s, it results in [`Error::TypeMismatch`].
//!
//! # Examples
//!
//! ```
//! use approx::assert_abs_diff_eq;
//! use formula_eval::{Bindings, Formula, Number, SymbolRegistry};
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = SymbolRegistry::new();
//! let [x, y, z] = [registry.symbol("x")?, registry.symbol("y")?, registry.symbol("z")?];
//! let formula = Formula::new(x * y - z);
//! assert_eq!(formula.to_string(), "x*y-z");
//!
//! let bindings = Bindings::new().with("x", 2).with("y", 8.2).with("z", 10);
//! let expr = formula.subs(bindings)?;
//! assert_eq!(expr.text(), "2*8.2-10");
//! let Number::Real(value) = expr.value()? else { unreachable!() };
//! assert_abs_diff_eq!(value, 6.4, epsilon = 1e-12);
//!
//! // Currying fixes some variables.
//! let curried = formula.curry(Bindings::new().with("y", 2))?;
//! assert_eq!(curried.to_string(), "x*2-z");
//! let expr = curried.subs(Bindings::new().with("x", 1).with("z", -5))?;
//! assert_eq!(expr.text(), "1*2-(-5)");
//! assert_eq!(expr.value()?, Number::Int(7));
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/formula-eval/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub use self::{
    bindings::Bindings,
    compiler::{Evaluator, HostFn},
    config::Config,
    directory::Directory,
    error::{ArithmeticError, Error, EvalResult, OperandKind},
    expression::Expression,
    formula::Formula,
    production::{Composable, Operand, Production},
    registry::SymbolRegistry,
    sample::{PlotRequest, Sampler, Samples},
    value::Value,
};
pub use formula_tree::{
    BinaryOp, Delimiters, Number, NumberKind, Op, OpPriority, Segment, Template, Tree,
    UnaryOp,
};

pub mod arith;
mod bindings;
mod compiler;
mod config;
mod directory;
pub mod error;
mod expression;
pub mod fns;
mod formula;
mod overload;
mod production;
mod registry;
mod sample;
mod value;

/// Creates several symbols in the [global registry](SymbolRegistry::global()).
/// Names are separated by commas and / or whitespace, e.g., `"x, y z"`.
///
/// # Errors
///
/// Returns an error on the first invalid or duplicate name.
pub fn symbols(names: &str) -> EvalResult<Vec<Production>> {
    SymbolRegistry::global().symbols(names)
}
