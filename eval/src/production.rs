//! `Production`: an expression tree paired with its compiled evaluator.

use core::fmt;
use std::{collections::BTreeSet, sync::Arc};

use num_complex::Complex64;

use crate::{
    compiler::{Evaluator, HostFn},
    registry::SymbolRegistry,
    EvalResult,
};
use formula_tree::{BinaryOp, Number, Template, Tree, UnaryOp};

/// Composed expression: an immutable [`Tree`] together with a compiled [`Evaluator`]
/// and the set of free variables appearing in the tree.
///
/// Productions are built from symbols and constants via operators: `x + 1` on a symbol
/// production `x` builds a new tree rather than computing a number. Composition never
/// evaluates operands, and never mutates them; it only creates new productions sharing
/// the structure of the operands.
///
/// Besides standard Rust operators (`+`, `-`, `*`, `/`, `%`, `<<`, `>>`, `&`, `^`, `|`,
/// unary `-` and `!`, the latter standing for the bitwise inversion `~`), productions
/// support exponentiation, floor division and comparisons via methods such as
/// [`Self::pow()`] and [`Self::less_than()`].
///
/// # Examples
///
/// ```
/// # use formula_eval::{Bindings, Number, SymbolRegistry};
/// # fn main() -> anyhow::Result<()> {
/// let registry = SymbolRegistry::new();
/// let [x, y] = [registry.symbol("x")?, registry.symbol("y")?];
/// let production = (&x + 1) * &y - x.pow(2);
/// assert_eq!(production.to_string(), "(x+1)*y-x**2");
///
/// let free_variables: Vec<_> = production.free_variables().iter().collect();
/// assert_eq!(free_variables, ["x", "y"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Production {
    tree: Arc<Tree>,
    evaluator: Evaluator,
    free_variables: Arc<BTreeSet<String>>,
}

impl fmt::Debug for Production {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Production")
            .field("tree", &self.tree)
            .field("free_variables", &self.free_variables)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.tree, formatter)
    }
}

impl Production {
    /// Creates a symbol registered in the [global registry](SymbolRegistry::global()).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid identifier, or if a symbol with the same
    /// name was already created in the global registry.
    pub fn symbol(name: &str) -> EvalResult<Self> {
        SymbolRegistry::global().symbol(name)
    }

    /// Creates a symbol without registering its name.
    pub(crate) fn symbol_unchecked(name: &str) -> Self {
        let name: Arc<str> = Arc::from(name);
        Self {
            tree: Arc::new(Tree::Symbol(Arc::clone(&name))),
            evaluator: Evaluator::symbol(Arc::clone(&name)),
            free_variables: Arc::new(BTreeSet::from([name.to_string()])),
        }
    }

    /// Creates a constant production with no free variables.
    pub fn constant(value: impl Into<Number>) -> Self {
        let value = value.into();
        Self {
            tree: Arc::new(Tree::Number(value)),
            evaluator: Evaluator::constant(value),
            free_variables: Arc::default(),
        }
    }

    pub(crate) fn from_parts(
        tree: Arc<Tree>,
        evaluator: Evaluator,
        free_variables: BTreeSet<String>,
    ) -> Self {
        Self {
            tree,
            evaluator,
            free_variables: Arc::new(free_variables),
        }
    }

    /// Returns the expression tree of this production.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub(crate) fn shared_tree(&self) -> &Arc<Tree> {
        &self.tree
    }

    pub(crate) fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Returns names of free variables in this production.
    pub fn free_variables(&self) -> &BTreeSet<String> {
        &self.free_variables
    }

    /// Checks whether this production has no free variables.
    pub fn is_constant(&self) -> bool {
        self.free_variables.is_empty()
    }

    /// Renders the display template of this production.
    pub fn template(&self) -> Template {
        self.tree.template()
    }

    fn union(
        lhs: &Arc<BTreeSet<String>>,
        rhs: &Arc<BTreeSet<String>>,
    ) -> Arc<BTreeSet<String>> {
        if rhs.is_empty() || Arc::ptr_eq(lhs, rhs) {
            Arc::clone(lhs)
        } else if lhs.is_empty() {
            Arc::clone(rhs)
        } else {
            Arc::new(lhs.union(rhs).cloned().collect())
        }
    }

    /// Composes a unary operation.
    #[must_use]
    pub fn unary(self, op: UnaryOp) -> Self {
        Self {
            tree: Arc::new(Tree::unary(op, self.tree)),
            evaluator: Evaluator::unary(op, self.evaluator),
            free_variables: self.free_variables,
        }
    }

    /// Composes a binary operation. Either of operands may be a constant.
    pub fn binary(lhs: Operand<Self>, op: BinaryOp, rhs: Operand<Self>) -> Self {
        let lhs = lhs.into_production();
        let rhs = rhs.into_production();
        Self {
            free_variables: Self::union(&lhs.free_variables, &rhs.free_variables),
            tree: Arc::new(Tree::binary(lhs.tree, op, rhs.tree)),
            evaluator: Evaluator::binary(lhs.evaluator, op, rhs.evaluator),
        }
    }

    /// Composes a call of a host function with the specified name. The function
    /// is applied to evaluated args in order.
    pub fn call(name: &str, function: HostFn, args: Vec<Operand<Self>>) -> Self {
        let mut free_variables = Arc::default();
        let mut trees = Vec::with_capacity(args.len());
        let mut evaluators = Vec::with_capacity(args.len());
        for arg in args {
            let arg = arg.into_production();
            free_variables = Self::union(&free_variables, &arg.free_variables);
            trees.push(arg.tree);
            evaluators.push(arg.evaluator);
        }

        Self {
            tree: Arc::new(Tree::function(name, trees)),
            evaluator: Evaluator::call(function, evaluators),
            free_variables,
        }
    }
}

/// Types taking part in composition: [`Production`]s and [`Formula`](crate::Formula)s.
///
/// Both types compose via the same primitive: a composable value is unwrapped
/// into a production, composed, and wrapped back.
pub trait Composable: Clone + Sized {
    /// Returns the underlying production.
    fn to_production(&self) -> Production;

    /// Wraps a composed production.
    fn from_production(production: Production) -> Self;
}

impl Composable for Production {
    fn to_production(&self) -> Production {
        self.clone()
    }

    fn from_production(production: Production) -> Self {
        production
    }
}

/// Operand of composition: either a plain number, or a composable node
/// (a [`Production`] or a [`Formula`](crate::Formula)).
///
/// A single operation only accepts nodes of the same type, so that productions
/// and formulas cannot be mixed.
#[derive(Debug, Clone)]
pub enum Operand<P> {
    /// Plain number. It is embedded into the composed tree as a constant.
    Number(Number),
    /// Composable node.
    Node(P),
}

impl<P: Composable> Operand<P> {
    /// Converts this operand into a production.
    pub fn into_production(self) -> Production {
        match self {
            Self::Number(value) => Production::constant(value),
            Self::Node(node) => node.to_production(),
        }
    }
}

impl From<Production> for Operand<Production> {
    fn from(value: Production) -> Self {
        Self::Node(value)
    }
}

impl From<&Production> for Operand<Production> {
    fn from(value: &Production) -> Self {
        Self::Node(value.clone())
    }
}

macro_rules! impl_operand_from_number {
    ($($ty:ty),+) => {
        $(
        impl<P> From<$ty> for Operand<P> {
            fn from(value: $ty) -> Self {
                Self::Number(value.into())
            }
        }
        )+
    };
}

impl_operand_from_number!(i32, i64, u32, f32, f64, bool, Complex64, Number);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bindings;

    #[test]
    fn composition_does_not_evaluate() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        // Would fail with division by zero if evaluated.
        let production = Production::binary(x.clone().into(), BinaryOp::Div, 0.into());
        assert_eq!(production.to_string(), "x/0");
        assert!(production
            .evaluator()
            .evaluate(&Bindings::new().with("x", 1))
            .is_err());
    }

    #[test]
    fn free_variables_are_union_of_operands() {
        let registry = SymbolRegistry::new();
        let [x, y] = [registry.symbol("x").unwrap(), registry.symbol("y").unwrap()];
        let sum = Production::binary(x.clone().into(), BinaryOp::Add, y.into());
        let production = Production::binary(sum.into(), BinaryOp::Mul, x.into());
        assert_eq!(production.free_variables(), &production.tree().symbols());
        assert_eq!(production.free_variables().len(), 2);
    }

    #[test]
    fn constants_have_no_free_variables() {
        let production = Production::binary(2.into(), BinaryOp::Power, 0.5.into());
        assert!(production.is_constant());
        let value = production.evaluator().evaluate(&Bindings::new()).unwrap();
        assert_eq!(value, Number::Real(2.0_f64.sqrt()));
    }

    #[test]
    fn unary_composition() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let production = x.unary(UnaryOp::Neg);
        assert_eq!(production.to_string(), "(-x)");
        let value = production
            .evaluator()
            .evaluate(&Bindings::new().with("x", 3))
            .unwrap();
        assert_eq!(value, Number::Int(-3));
    }

    #[test]
    fn call_composition() {
        let registry = SymbolRegistry::new();
        let [x, y] = [registry.symbol("x").unwrap(), registry.symbol("y").unwrap()];
        let hypot: HostFn = Arc::new(|args: &[Number]| {
            let [x, y] = [args[0].as_real().unwrap(), args[1].as_real().unwrap()];
            Ok(Number::Real(x.hypot(y)))
        });
        let production = Production::call("hypot", hypot, vec![x.into(), y.into()]);
        assert_eq!(production.to_string(), "hypot(x, y)");
        assert_eq!(production.free_variables().len(), 2);

        let bindings = Bindings::new().with("x", 3).with("y", 4);
        let value = production.evaluator().evaluate(&bindings).unwrap();
        assert_eq!(value, Number::Real(5.0));
    }

    #[test]
    fn trees_are_shared_between_compositions() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let shared = Production::binary(x.into(), BinaryOp::Add, 1.into());
        let first = Production::binary(shared.clone().into(), BinaryOp::Mul, 2.into());
        let second = Production::binary(3.into(), BinaryOp::Sub, shared.clone().into());

        let (Tree::Binary { lhs, .. }, Tree::Binary { rhs, .. }) = (first.tree(), second.tree())
        else {
            panic!("unexpected tree shapes");
        };
        assert!(Arc::ptr_eq(lhs, shared.shared_tree()));
        assert!(Arc::ptr_eq(rhs, shared.shared_tree()));
    }
}
