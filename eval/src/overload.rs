//! Operator overloading for [`Production`]s and [`Formula`]s.
//!
//! Both types get the same set of operators, but only with operands of the same type
//! or plain numbers. There are deliberately no impls for a `Production` / `Formula` pair.

use core::ops;

use num_complex::Complex64;

use crate::{
    formula::Formula,
    production::{Composable, Operand, Production},
};
use formula_tree::{BinaryOp, Number, UnaryOp};

fn compose<P: Composable>(lhs: Operand<P>, op: BinaryOp, rhs: Operand<P>) -> P {
    let lhs = Operand::Node(lhs.into_production());
    let rhs = Operand::Node(rhs.into_production());
    P::from_production(Production::binary(lhs, op, rhs))
}

fn compose_unary<P: Composable>(inner: &P, op: UnaryOp) -> P {
    P::from_production(inner.to_production().unary(op))
}

macro_rules! impl_composition_ops {
    ($node:ty) => {
        impl_composition_ops!(@binary $node;
            Add::add => Add,
            Sub::sub => Sub,
            Mul::mul => Mul,
            Div::div => Div,
            Rem::rem => Rem,
            Shl::shl => Shl,
            Shr::shr => Shr,
            BitAnd::bitand => BitAnd,
            BitXor::bitxor => BitXor,
            BitOr::bitor => BitOr
        );
        impl_composition_ops!(@unary $node; Neg::neg => Neg, Not::not => Not);
        impl_composition_ops!(@methods $node);
    };

    (@binary $node:ty; $($trait:ident :: $method:ident => $op:ident),+) => {
        $(
        impl<Rhs: Into<Operand<$node>>> ops::$trait<Rhs> for $node {
            type Output = $node;

            fn $method(self, rhs: Rhs) -> Self::Output {
                compose(Operand::Node(self), BinaryOp::$op, rhs.into())
            }
        }

        impl<Rhs: Into<Operand<$node>>> ops::$trait<Rhs> for &$node {
            type Output = $node;

            fn $method(self, rhs: Rhs) -> Self::Output {
                compose(Operand::Node(self.clone()), BinaryOp::$op, rhs.into())
            }
        }

        impl_composition_ops!(
            @lhs $node; $trait::$method => $op;
            i64, f64, bool, Complex64, Number
        );
        )+
    };

    (@lhs $node:ty; $trait:ident :: $method:ident => $op:ident; $($num:ty),+) => {
        $(
        impl ops::$trait<$node> for $num {
            type Output = $node;

            fn $method(self, rhs: $node) -> Self::Output {
                compose(Operand::Number(self.into()), BinaryOp::$op, Operand::Node(rhs))
            }
        }

        impl ops::$trait<&$node> for $num {
            type Output = $node;

            fn $method(self, rhs: &$node) -> Self::Output {
                compose(Operand::Number(self.into()), BinaryOp::$op, Operand::Node(rhs.clone()))
            }
        }
        )+
    };

    (@unary $node:ty; $($trait:ident :: $method:ident => $op:ident),+) => {
        $(
        impl ops::$trait for $node {
            type Output = $node;

            fn $method(self) -> Self::Output {
                compose_unary(&self, UnaryOp::$op)
            }
        }

        impl ops::$trait for &$node {
            type Output = $node;

            fn $method(self) -> Self::Output {
                compose_unary(self, UnaryOp::$op)
            }
        }
        )+
    };

    (@methods $node:ty) => {
        /// Operations without a matching trait in `std::ops`.
        impl $node {
            /// Composes exponentiation (`**`).
            #[must_use]
            pub fn pow(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::Power, rhs.into())
            }

            /// Composes floor division (`//`).
            #[must_use]
            pub fn floor_div(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::FloorDiv, rhs.into())
            }

            /// Composes the unary plus.
            #[must_use]
            pub fn pos(&self) -> Self {
                compose_unary(self, UnaryOp::Pos)
            }

            /// Composes the equality comparison (`==`).
            #[must_use]
            pub fn equals(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::Eq, rhs.into())
            }

            /// Composes the non-equality comparison (`!=`).
            #[must_use]
            pub fn not_equals(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::NotEq, rhs.into())
            }

            /// Composes the `<` comparison.
            #[must_use]
            pub fn less_than(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::Lt, rhs.into())
            }

            /// Composes the `<=` comparison.
            #[must_use]
            pub fn less_or_equal(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::Le, rhs.into())
            }

            /// Composes the `>` comparison.
            #[must_use]
            pub fn greater_than(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::Gt, rhs.into())
            }

            /// Composes the `>=` comparison.
            #[must_use]
            pub fn greater_or_equal(&self, rhs: impl Into<Operand<Self>>) -> Self {
                compose(Operand::Node(self.clone()), BinaryOp::Ge, rhs.into())
            }
        }
    };
}

impl_composition_ops!(Production);
impl_composition_ops!(Formula);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bindings, SymbolRegistry};

    #[test]
    fn operators_on_productions() {
        let registry = SymbolRegistry::new();
        let [x, y] = [registry.symbol("x").unwrap(), registry.symbol("y").unwrap()];

        assert_eq!((&x + &y).to_string(), "x+y");
        assert_eq!((&x - 1).to_string(), "x-1");
        assert_eq!((2 * &x).to_string(), "2*x");
        assert_eq!((1.5 / &y).to_string(), "1.5/y");
        assert_eq!((&x % 3).to_string(), "x%3");
        assert_eq!((&x << 2 | &y).to_string(), "x<<2|y");
        assert_eq!((&x & &y ^ 1).to_string(), "x&y^1");
        assert_eq!((-&x).to_string(), "(-x)");
        assert_eq!((!&x).to_string(), "(~x)");
        assert_eq!(x.pos().to_string(), "(+x)");
        assert_eq!(x.pow(&y).pow(2).to_string(), "(x**y)**2");
        assert_eq!(x.floor_div(2).to_string(), "x//2");
        assert_eq!((&x + 1).less_than(&y).to_string(), "x+1<y");
        assert_eq!(x.greater_or_equal(0).to_string(), "x>=0");
        assert_eq!(x.equals(&y).not_equals(true).to_string(), "(x==y)!=true");
    }

    #[test]
    fn integer_literals_on_the_left() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();

        let sum = 8 + &x;
        assert_eq!(sum.to_string(), "8+x");
        let scaled = 100 * (8 + &x);
        assert_eq!(scaled.to_string(), "100*(8+x)");
        let shifted = 1 << (&x - 2);
        assert_eq!(shifted.to_string(), "1<<x-2");

        let bindings = Bindings::new().with("x", 4);
        assert_eq!(scaled.evaluator().evaluate(&bindings).unwrap(), Number::Int(1_200));
        assert_eq!(shifted.evaluator().evaluate(&bindings).unwrap(), Number::Int(4));
    }

    #[test]
    fn evaluating_composed_operators() {
        let registry = SymbolRegistry::new();
        let [x, y] = [registry.symbol("x").unwrap(), registry.symbol("y").unwrap()];
        let bindings = Bindings::new().with("x", 7).with("y", 2);

        let cases = [
            (x.floor_div(&y), Number::Int(3)),
            (&x % &y, Number::Int(1)),
            (x.pow(&y), Number::Int(49)),
            (&x / &y, Number::Real(3.5)),
            (&x >> 1, Number::Int(3)),
            (!&y, Number::Int(-3)),
            (x.greater_than(&y), Number::Bool(true)),
            (x.less_or_equal(&y), Number::Bool(false)),
        ];
        for (production, expected) in cases {
            let value = production.evaluator().evaluate(&bindings).unwrap();
            assert_eq!(value, expected, "{production}");
        }
    }

    #[test]
    fn operands_are_not_consumed_when_borrowed() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let first = &x + 1;
        let second = &x * &x;
        assert_eq!(x.to_string(), "x");
        assert_eq!(first.free_variables(), second.free_variables());
    }
}
