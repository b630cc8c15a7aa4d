//! `Tree` and tightly related types.

use core::fmt;
use std::{collections::BTreeSet, sync::Arc};

use crate::{
    number::Number,
    ops::{BinaryOp, OpPriority, UnaryOp},
    render::Template,
};

/// Immutable expression tree.
///
/// Child nodes are reference-counted, so composing trees shares structure instead
/// of copying it. A tree is never mutated in place; rewriting operations such as
/// [`Self::fix_symbols()`] produce a new tree reusing the untouched subtrees.
///
/// Each operation node stores the priority of its operation at construction time.
/// The priority only influences rendering; evaluation order is defined by the tree shape.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Tree {
    /// Numeric constant, e.g., `8.2`.
    Number(Number),
    /// Free variable, e.g., `x`.
    Symbol(Arc<str>),
    /// Unary operation, e.g., `-x`.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Inner expression.
        inner: Arc<Tree>,
        /// Priority of the operator.
        priority: OpPriority,
    },
    /// Binary operation, e.g., `x + 1`.
    Binary {
        /// LHS of the operation.
        lhs: Arc<Tree>,
        /// Operator.
        op: BinaryOp,
        /// RHS of the operation.
        rhs: Arc<Tree>,
        /// Priority of the operator.
        priority: OpPriority,
    },
    /// Function call, e.g., `sin(x)`.
    Function {
        /// Function name.
        name: Arc<str>,
        /// Function arguments in call order.
        args: Vec<Arc<Tree>>,
    },
}

impl Tree {
    /// Creates a numeric leaf.
    pub fn number(value: impl Into<Number>) -> Self {
        Self::Number(value.into())
    }

    /// Creates a symbol leaf. The name is not validated.
    pub fn symbol(name: impl Into<Arc<str>>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates a unary operation node.
    pub fn unary(op: UnaryOp, inner: impl Into<Arc<Tree>>) -> Self {
        Self::Unary {
            op,
            inner: inner.into(),
            priority: op.priority(),
        }
    }

    /// Creates a binary operation node.
    pub fn binary(lhs: impl Into<Arc<Tree>>, op: BinaryOp, rhs: impl Into<Arc<Tree>>) -> Self {
        Self::Binary {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
            priority: op.priority(),
        }
    }

    /// Creates a function call node.
    pub fn function(name: impl Into<Arc<str>>, args: Vec<Arc<Tree>>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    /// Returns the type of this tree node.
    pub fn ty(&self) -> TreeType {
        match self {
            Self::Number(_) => TreeType::Number,
            Self::Symbol(_) => TreeType::Symbol,
            Self::Unary { .. } => TreeType::Unary,
            Self::Binary { .. } => TreeType::Binary,
            Self::Function { .. } => TreeType::Function,
        }
    }

    /// Returns the priority of the root operation, or `None` for leaves and function calls.
    pub fn priority(&self) -> Option<OpPriority> {
        match self {
            Self::Unary { priority, .. } | Self::Binary { priority, .. } => Some(*priority),
            Self::Number(_) | Self::Symbol(_) | Self::Function { .. } => None,
        }
    }

    /// Returns the names of all symbols reachable in this tree.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_symbols(&mut names);
        names
    }

    fn collect_symbols(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Number(_) => { /* no symbols */ }
            Self::Symbol(name) => {
                if !names.contains(&**name) {
                    names.insert(name.to_string());
                }
            }
            Self::Unary { inner, .. } => inner.collect_symbols(names),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_symbols(names);
                rhs.collect_symbols(names);
            }
            Self::Function { args, .. } => {
                for arg in args {
                    arg.collect_symbols(names);
                }
            }
        }
    }

    /// Checks whether this tree contains a symbol with the specified name.
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Symbol(symbol) => **symbol == *name,
            Self::Unary { inner, .. } => inner.contains_symbol(name),
            Self::Binary { lhs, rhs, .. } => lhs.contains_symbol(name) || rhs.contains_symbol(name),
            Self::Function { args, .. } => args.iter().any(|arg| arg.contains_symbol(name)),
        }
    }

    /// Returns the number of nodes in this tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Number(_) | Self::Symbol(_) => 1,
            Self::Unary { inner, .. } => 1 + inner.size(),
            Self::Binary { lhs, rhs, .. } => 1 + lhs.size() + rhs.size(),
            Self::Function { args, .. } => 1 + args.iter().map(|arg| arg.size()).sum::<usize>(),
        }
    }

    /// Replaces symbols with numeric leaves, bottom-up. `values` returns the value
    /// for a symbol name, or `None` if the symbol should remain free.
    ///
    /// Subtrees without replaced symbols are shared with `tree` rather than copied.
    pub fn fix_symbols<F>(tree: &Arc<Self>, values: &F) -> Arc<Self>
    where
        F: Fn(&str) -> Option<Number>,
    {
        match &**tree {
            Self::Number(_) => Arc::clone(tree),
            Self::Symbol(name) => match values(name) {
                Some(value) => Arc::new(Self::Number(value)),
                None => Arc::clone(tree),
            },

            Self::Unary {
                op,
                inner,
                priority,
            } => {
                let new_inner = Self::fix_symbols(inner, values);
                if Arc::ptr_eq(inner, &new_inner) {
                    Arc::clone(tree)
                } else {
                    Arc::new(Self::Unary {
                        op: *op,
                        inner: new_inner,
                        priority: *priority,
                    })
                }
            }

            Self::Binary {
                lhs,
                op,
                rhs,
                priority,
            } => {
                let new_lhs = Self::fix_symbols(lhs, values);
                let new_rhs = Self::fix_symbols(rhs, values);
                if Arc::ptr_eq(lhs, &new_lhs) && Arc::ptr_eq(rhs, &new_rhs) {
                    Arc::clone(tree)
                } else {
                    Arc::new(Self::Binary {
                        lhs: new_lhs,
                        op: *op,
                        rhs: new_rhs,
                        priority: *priority,
                    })
                }
            }

            Self::Function { name, args } => {
                let new_args: Vec<_> = args
                    .iter()
                    .map(|arg| Self::fix_symbols(arg, values))
                    .collect();
                let unchanged = args
                    .iter()
                    .zip(&new_args)
                    .all(|(old, new)| Arc::ptr_eq(old, new));
                if unchanged {
                    Arc::clone(tree)
                } else {
                    Arc::new(Self::Function {
                        name: Arc::clone(name),
                        args: new_args,
                    })
                }
            }
        }
    }

    /// Renders this tree into a display template.
    pub fn template(&self) -> Template {
        Template::new(self)
    }
}

impl From<Number> for Tree {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.template(), formatter)
    }
}

/// Type of a [`Tree`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TreeType {
    /// Numeric leaf.
    Number,
    /// Symbol leaf.
    Symbol,
    /// Unary operation.
    Unary,
    /// Binary operation.
    Binary,
    /// Function call.
    Function,
}

impl fmt::Display for TreeType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Number => "number",
            Self::Symbol => "symbol",
            Self::Unary => "unary operation",
            Self::Binary => "binary operation",
            Self::Function => "function call",
        })
    }
}
