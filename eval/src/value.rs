//! Dynamically typed operands.

use core::fmt;

use num_complex::Complex64;

use crate::{
    arith,
    error::{Error, OperandKind},
    formula::Formula,
    production::{Composable, Operand, Production},
    EvalResult,
};
use formula_tree::{BinaryOp, Number, UnaryOp};

/// Operand which may be a plain number, a [`Production`] or a [`Formula`].
///
/// Operations on values dispatch on the operand kinds: numbers are computed right away,
/// and productions / formulas are composed. Productions and formulas cannot be mixed
/// in a single operation; such operations fail with [`Error::TypeMismatch`].
///
/// # Examples
///
/// ```
/// # use formula_eval::{BinaryOp, Error, Formula, Number, SymbolRegistry, Value};
/// # fn main() -> anyhow::Result<()> {
/// let sum = Value::from(2).binary(BinaryOp::Add, Value::from(3.5))?;
/// assert_eq!(sum.as_number(), Some(Number::Real(5.5)));
///
/// let registry = SymbolRegistry::new();
/// let x = registry.symbol("x")?;
/// let formula = Formula::new(x.clone());
/// let err = Value::from(x).binary(BinaryOp::Mul, formula.into()).unwrap_err();
/// assert!(matches!(err, Error::TypeMismatch { .. }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Plain number.
    Number(Number),
    /// Production.
    Production(Production),
    /// Formula.
    Formula(Formula),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> OperandKind {
        match self {
            Self::Number(_) => OperandKind::Number,
            Self::Production(_) => OperandKind::Production,
            Self::Formula(_) => OperandKind::Formula,
        }
    }

    /// Returns the enclosed number, if any.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Applies a binary operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when mixing a production and a formula,
    /// or an arithmetic error when operating on two numbers.
    pub fn binary(self, op: BinaryOp, rhs: Self) -> EvalResult<Self> {
        Ok(match (self, rhs) {
            (Self::Number(x), Self::Number(y)) => Self::Number(arith::binary_op(op, x, y)?),

            (lhs @ Self::Production(_), rhs @ (Self::Production(_) | Self::Number(_)))
            | (lhs @ Self::Number(_), rhs @ Self::Production(_)) => {
                Self::Production(compose(lhs, op, rhs)?)
            }
            (lhs @ Self::Formula(_), rhs @ (Self::Formula(_) | Self::Number(_)))
            | (lhs @ Self::Number(_), rhs @ Self::Formula(_)) => {
                Self::Formula(compose(lhs, op, rhs)?)
            }

            (lhs, rhs) => {
                return Err(Error::TypeMismatch {
                    lhs: lhs.kind(),
                    rhs: rhs.kind(),
                })
            }
        })
    }

    /// Applies a unary operation.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error when operating on a number.
    pub fn unary(self, op: UnaryOp) -> EvalResult<Self> {
        Ok(match self {
            Self::Number(x) => Self::Number(arith::unary_op(op, x)?),
            Self::Production(x) => Self::Production(x.unary(op)),
            Self::Formula(x) => {
                Self::Formula(Formula::from_production(x.to_production().unary(op)))
            }
        })
    }
}

fn compose<P: Composable>(lhs: Value, op: BinaryOp, rhs: Value) -> EvalResult<P>
where
    Operand<P>: TryFrom<Value, Error = Error>,
{
    let lhs = Operand::<P>::try_from(lhs)?.into_production();
    let rhs = Operand::<P>::try_from(rhs)?.into_production();
    let production = Production::binary(Operand::Node(lhs), op, Operand::Node(rhs));
    Ok(P::from_production(production))
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => fmt::Display::fmt(value, formatter),
            Self::Production(value) => fmt::Display::fmt(value, formatter),
            Self::Formula(value) => fmt::Display::fmt(value, formatter),
        }
    }
}

macro_rules! impl_value_from_number {
    ($($ty:ty),+) => {
        $(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Number(value.into())
            }
        }
        )+
    };
}

impl_value_from_number!(i32, i64, u32, f32, f64, bool, Complex64, Number);

impl From<Production> for Value {
    fn from(value: Production) -> Self {
        Self::Production(value)
    }
}

impl From<Formula> for Value {
    fn from(value: Formula) -> Self {
        Self::Formula(value)
    }
}

impl TryFrom<Value> for Operand<Production> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(value) => Ok(Self::Number(value)),
            Value::Production(value) => Ok(Self::Node(value)),
            Value::Formula(_) => Err(Error::TypeMismatch {
                lhs: OperandKind::Production,
                rhs: OperandKind::Formula,
            }),
        }
    }
}

impl TryFrom<Value> for Operand<Formula> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(value) => Ok(Self::Number(value)),
            Value::Formula(value) => Ok(Self::Node(value)),
            Value::Production(_) => Err(Error::TypeMismatch {
                lhs: OperandKind::Formula,
                rhs: OperandKind::Production,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{error::ArithmeticError, Bindings, SymbolRegistry};

    #[test]
    fn operations_on_numbers() {
        let value = Value::from(7).binary(BinaryOp::FloorDiv, Value::from(-2)).unwrap();
        assert_matches!(value, Value::Number(Number::Int(-4)));
        let value = Value::from(true).unary(UnaryOp::Neg).unwrap();
        assert_matches!(value, Value::Number(Number::Int(-1)));

        let err = Value::from(1).binary(BinaryOp::Rem, Value::from(0)).unwrap_err();
        assert_eq!(err, Error::Arithmetic(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn composing_values() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();

        let value = Value::from(2).binary(BinaryOp::Mul, x.clone().into()).unwrap();
        assert_eq!(value.kind(), OperandKind::Production);
        assert_eq!(value.to_string(), "2*x");

        let formula = Value::from(Formula::new(x)).unary(UnaryOp::Neg).unwrap();
        let value = formula.binary(BinaryOp::Add, Value::from(0.5)).unwrap();
        let Value::Formula(formula) = value else {
            panic!("unexpected value: {value:?}");
        };
        assert_eq!(formula.to_string(), "(-x)+0.5");
        let expr = formula.subs(Bindings::new().with("x", 2)).unwrap();
        assert_eq!(expr.value(), Ok(Number::Real(-1.5)));
    }

    #[test]
    fn mixing_kinds_is_rejected() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let formula = Formula::new(x.clone());

        let err = Value::from(formula.clone())
            .binary(BinaryOp::Sub, x.clone().into())
            .unwrap_err();
        assert_matches!(
            err,
            Error::TypeMismatch {
                lhs: OperandKind::Formula,
                rhs: OperandKind::Production,
            }
        );
        let err = Value::from(x).binary(BinaryOp::Sub, formula.into()).unwrap_err();
        assert_matches!(
            err,
            Error::TypeMismatch {
                lhs: OperandKind::Production,
                rhs: OperandKind::Formula,
            }
        );
    }
}
