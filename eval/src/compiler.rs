//! Compilation of tree nodes into evaluator closures.
//!
//! Evaluators mirror the tree shape: each node is compiled into a closure composing
//! the closures of its children (or captured constants) with the node operation.
//! Compilation never evaluates anything; closures only run once invoked with
//! concrete [`Bindings`].

use std::{fmt, sync::Arc};

use crate::{arith, bindings::Bindings, error::Error, EvalResult};
use formula_tree::{BinaryOp, Number, UnaryOp};

type EvalFn = dyn Fn(&Bindings) -> EvalResult + Send + Sync;

/// Host function over numbers, as used in function calls within formulas.
pub type HostFn = Arc<dyn Fn(&[Number]) -> EvalResult + Send + Sync>;

/// Compiled evaluator: a pure function from variable bindings to a [`Number`].
///
/// Evaluators are cheaply cloneable; clones share the same compiled closure.
#[derive(Clone)]
pub struct Evaluator {
    inner: Arc<EvalFn>,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Evaluator")
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

impl Evaluator {
    fn new<F>(function: F) -> Self
    where
        F: Fn(&Bindings) -> EvalResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(function),
        }
    }

    /// Evaluates this closure with the provided bindings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBinding`] if a variable is not bound, or an arithmetic error
    /// if one of the operations fails.
    pub fn evaluate(&self, bindings: &Bindings) -> EvalResult {
        (self.inner)(bindings)
    }

    /// Compiles a constant.
    pub(crate) fn constant(value: Number) -> Self {
        Self::new(move |_| Ok(value))
    }

    /// Compiles a variable lookup.
    pub(crate) fn symbol(name: Arc<str>) -> Self {
        Self::new(move |bindings| {
            bindings
                .get(&name)
                .ok_or_else(|| Error::MissingBinding(name.to_string()))
        })
    }

    /// Compiles a unary operation.
    pub(crate) fn unary(op: UnaryOp, inner: Self) -> Self {
        Self::new(move |bindings| {
            let value = inner.evaluate(bindings)?;
            arith::unary_op(op, value).map_err(Error::from)
        })
    }

    /// Compiles a binary operation. The LHS is evaluated before the RHS.
    pub(crate) fn binary(lhs: Self, op: BinaryOp, rhs: Self) -> Self {
        Self::new(move |bindings| {
            let lhs_value = lhs.evaluate(bindings)?;
            let rhs_value = rhs.evaluate(bindings)?;
            arith::binary_op(op, lhs_value, rhs_value).map_err(Error::from)
        })
    }

    /// Compiles a call of a host function. Args are evaluated in order.
    pub(crate) fn call(function: HostFn, args: Vec<Self>) -> Self {
        Self::new(move |bindings| {
            let arg_values = args
                .iter()
                .map(|arg| arg.evaluate(bindings))
                .collect::<Result<Vec<_>, _>>()?;
            function(&arg_values)
        })
    }

    /// Compiles an evaluator with some variables fixed. Fixed bindings are merged
    /// into the bindings supplied on each evaluation before delegating to `self`.
    pub(crate) fn with_fixed(self, fixed: Bindings) -> Self {
        if fixed.is_empty() {
            return self;
        }
        Self::new(move |bindings| {
            let all_bindings = bindings.merged(&fixed);
            self.evaluate(&all_bindings)
        })
    }
}
