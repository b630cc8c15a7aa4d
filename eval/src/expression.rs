//! Bound expressions.

use core::fmt;
use std::sync::Arc;

use crate::{bindings::Bindings, compiler::Evaluator, EvalResult};
use formula_tree::Template;

/// [`Formula`](crate::Formula) with every free variable bound to a value.
///
/// Expressions are produced by [`Formula::subs()`](crate::Formula::subs()) and cannot
/// be re-bound. The value is recomputed on each [`Self::value()`] call.
#[derive(Debug, Clone)]
pub struct Expression {
    evaluator: Evaluator,
    template: Arc<Template>,
    bindings: Bindings,
}

impl Expression {
    pub(crate) fn new(evaluator: Evaluator, template: Arc<Template>, bindings: Bindings) -> Self {
        Self {
            evaluator,
            template,
            bindings,
        }
    }

    /// Computes the value of this expression.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic errors, e.g., division by zero.
    pub fn value(&self) -> EvalResult {
        self.evaluator.evaluate(&self.bindings)
    }

    /// Renders this expression with bound values substituted for variables.
    /// Negative integer and real values are parenthesized, e.g. `(-5)+1`.
    pub fn text(&self) -> String {
        self.template.fill_numbers(|name| self.bindings.get(name))
    }

    /// Returns the bindings of this expression.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text())
    }
}
