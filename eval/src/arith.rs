//! Arithmetic on [`Number`]s.
//!
//! Operands are promoted to a common kind before an operation: Boolean values are
//! promoted to integers, integers to reals, and reals to complex numbers.
//! Integer operations are checked and fail with [`ArithmeticError::IntegerOverflow`]
//! instead of wrapping. Division, floor division and remainder by zero fail with
//! [`ArithmeticError::DivisionByZero`] for all kinds of numbers.
//!
//! Floor division and remainder follow floor semantics: the quotient is rounded
//! towards negative infinity, and the remainder has the sign of the divisor.

use core::cmp::Ordering;

use num_complex::Complex64;
use num_traits::{checked_pow, Zero};

use crate::error::ArithmeticError;
use formula_tree::{BinaryOp, Number, NumberKind, Op, UnaryOp};

/// Operands promoted to a common kind.
#[derive(Debug, Clone, Copy)]
enum Promoted {
    Int(i64, i64),
    Real(f64, f64),
    Complex(Complex64, Complex64),
}

impl Promoted {
    fn new(x: Number, y: Number) -> Self {
        match (x.as_int(), y.as_int()) {
            (Some(x), Some(y)) => Self::Int(x, y),
            _ => match (x.as_real(), y.as_real()) {
                (Some(x), Some(y)) => Self::Real(x, y),
                _ => Self::Complex(x.as_complex(), y.as_complex()),
            },
        }
    }
}

/// Applies a unary operation to a number.
///
/// # Errors
///
/// Returns an error if the operation is undefined for the number kind, or
/// if negating an integer overflows.
pub fn unary_op(op: UnaryOp, x: Number) -> Result<Number, ArithmeticError> {
    match (op, x) {
        (UnaryOp::Neg, Number::Int(x)) => x
            .checked_neg()
            .map(Number::Int)
            .ok_or(ArithmeticError::IntegerOverflow),
        (UnaryOp::Neg, Number::Bool(x)) => Ok(Number::Int(-i64::from(x))),
        (UnaryOp::Neg, Number::Real(x)) => Ok(Number::Real(-x)),
        (UnaryOp::Neg, Number::Complex(x)) => Ok(Number::Complex(-x)),

        (UnaryOp::Pos, Number::Bool(x)) => Ok(Number::Int(i64::from(x))),
        (UnaryOp::Pos, x) => Ok(x),

        (UnaryOp::Not, Number::Int(x)) => Ok(Number::Int(!x)),
        (UnaryOp::Not, Number::Bool(x)) => Ok(Number::Int(!i64::from(x))),
        (_, x) => Err(ArithmeticError::InvalidOperand {
            op: Op::Unary(op),
            kind: x.kind(),
        }),
    }
}

/// Applies a binary operation to a pair of numbers.
///
/// # Errors
///
/// Returns an error if the operation fails (e.g., on division by zero or integer overflow)
/// or is undefined for the number kinds.
pub fn binary_op(op: BinaryOp, x: Number, y: Number) -> Result<Number, ArithmeticError> {
    if op.is_comparison() {
        compare(op, x, y).map(Number::Bool)
    } else if op.is_bitwise() {
        bitwise_op(op, x, y)
    } else if op.is_arithmetic() {
        match Promoted::new(x, y) {
            Promoted::Int(x, y) => int_op(op, x, y),
            Promoted::Real(x, y) if op == BinaryOp::Power => real_or_complex_pow(x, y),
            Promoted::Real(x, y) => real_op(op, x, y).map(Number::Real),
            Promoted::Complex(x, y) => complex_op(op, x, y).map(Number::Complex),
        }
    } else {
        Err(ArithmeticError::InvalidOperand {
            op: Op::Binary(op),
            kind: x.kind(),
        })
    }
}

/// Bitwise ops and shifts. Booleans stay booleans for `&`, `^` and `|`.
fn bitwise_op(op: BinaryOp, x: Number, y: Number) -> Result<Number, ArithmeticError> {
    if let (Number::Bool(x), Number::Bool(y)) = (x, y) {
        match op {
            BinaryOp::BitAnd => return Ok(Number::Bool(x & y)),
            BinaryOp::BitXor => return Ok(Number::Bool(x ^ y)),
            BinaryOp::BitOr => return Ok(Number::Bool(x | y)),
            _ => { /* handled as integers */ }
        }
    }

    let (Some(x_int), Some(y_int)) = (x.as_int(), y.as_int()) else {
        let kind = if x.as_int().is_none() { x.kind() } else { y.kind() };
        return Err(ArithmeticError::InvalidOperand {
            op: Op::Binary(op),
            kind,
        });
    };
    let value = match op {
        BinaryOp::Shl => shl(x_int, y_int)?,
        BinaryOp::Shr => shr(x_int, y_int)?,
        BinaryOp::BitAnd => x_int & y_int,
        BinaryOp::BitXor => x_int ^ y_int,
        BinaryOp::BitOr => x_int | y_int,
        _ => {
            return Err(ArithmeticError::InvalidOperand {
                op: Op::Binary(op),
                kind: NumberKind::Int,
            })
        }
    };
    Ok(Number::Int(value))
}

#[allow(clippy::cast_precision_loss)]
fn int_op(op: BinaryOp, x: i64, y: i64) -> Result<Number, ArithmeticError> {
    let value = match op {
        BinaryOp::Add => x.checked_add(y).ok_or(ArithmeticError::IntegerOverflow)?,
        BinaryOp::Sub => x.checked_sub(y).ok_or(ArithmeticError::IntegerOverflow)?,
        BinaryOp::Mul => x.checked_mul(y).ok_or(ArithmeticError::IntegerOverflow)?,
        BinaryOp::Div => {
            if y == 0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            return Ok(Number::Real(x as f64 / y as f64));
        }
        BinaryOp::FloorDiv => floor_div(x, y)?,
        BinaryOp::Rem => floor_rem(x, y)?,
        BinaryOp::Power => return int_pow(x, y),
        _ => {
            return Err(ArithmeticError::InvalidOperand {
                op: Op::Binary(op),
                kind: NumberKind::Int,
            })
        }
    };
    Ok(Number::Int(value))
}

fn floor_div(x: i64, y: i64) -> Result<i64, ArithmeticError> {
    if y == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let quotient = x.checked_div(y).ok_or(ArithmeticError::IntegerOverflow)?;
    let needs_adjustment = x % y != 0 && ((x < 0) != (y < 0));
    Ok(if needs_adjustment {
        quotient - 1
    } else {
        quotient
    })
}

fn floor_rem(x: i64, y: i64) -> Result<i64, ArithmeticError> {
    if y == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    // `checked_rem` only fails for `i64::MIN % -1`, the mathematical result of which is 0.
    let rem = x.checked_rem(y).unwrap_or(0);
    Ok(if rem != 0 && ((rem < 0) != (y < 0)) {
        rem + y
    } else {
        rem
    })
}

#[allow(clippy::cast_precision_loss)]
fn int_pow(x: i64, y: i64) -> Result<Number, ArithmeticError> {
    if y < 0 {
        if x == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        return Ok(Number::Real((x as f64).powf(y as f64)));
    }
    let exp = usize::try_from(y).map_err(|_| ArithmeticError::InvalidExponent)?;
    checked_pow(x, exp)
        .map(Number::Int)
        .ok_or(ArithmeticError::IntegerOverflow)
}

fn shl(x: i64, y: i64) -> Result<i64, ArithmeticError> {
    if y < 0 {
        return Err(ArithmeticError::InvalidShift);
    }
    if x == 0 {
        return Ok(0);
    }
    let shift = u32::try_from(y).map_err(|_| ArithmeticError::IntegerOverflow)?;
    if shift >= i64::BITS {
        return Err(ArithmeticError::IntegerOverflow);
    }
    let shifted = x << shift;
    if shifted >> shift == x {
        Ok(shifted)
    } else {
        Err(ArithmeticError::IntegerOverflow)
    }
}

fn shr(x: i64, y: i64) -> Result<i64, ArithmeticError> {
    if y < 0 {
        return Err(ArithmeticError::InvalidShift);
    }
    let shift = u32::try_from(y).unwrap_or(u32::MAX).min(i64::BITS - 1);
    Ok(x >> shift)
}

fn real_op(op: BinaryOp, x: f64, y: f64) -> Result<f64, ArithmeticError> {
    Ok(match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Rem if y == 0.0 => {
            return Err(ArithmeticError::DivisionByZero);
        }
        BinaryOp::Div => x / y,
        BinaryOp::FloorDiv => real_divmod(x, y).0,
        BinaryOp::Rem => real_divmod(x, y).1,
        _ => {
            return Err(ArithmeticError::InvalidOperand {
                op: Op::Binary(op),
                kind: NumberKind::Real,
            });
        }
    })
}

/// Floored division with remainder for non-zero `y`. The quotient is computed from
/// the exact remainder, so that `q * y + r == x` holds up to rounding, e.g. `1.0 // 0.1 == 9.0`.
#[allow(clippy::float_cmp)]
fn real_divmod(x: f64, y: f64) -> (f64, f64) {
    let mut rem = x % y;
    let mut div = (x - rem) / y;
    if rem == 0.0 {
        rem = 0.0_f64.copysign(y);
    } else if (y < 0.0) != (rem < 0.0) {
        rem += y;
        div -= 1.0;
    }

    let quotient = if div == 0.0 {
        0.0_f64.copysign(x / y)
    } else {
        let floored = div.floor();
        if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    };
    (quotient, rem)
}

fn real_pow(x: f64, y: f64) -> Result<f64, ArithmeticError> {
    if x == 0.0 && y < 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(x.powf(y))
}

fn complex_op(op: BinaryOp, x: Complex64, y: Complex64) -> Result<Complex64, ArithmeticError> {
    Ok(match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => {
            if y.is_zero() {
                return Err(ArithmeticError::DivisionByZero);
            }
            x / y
        }
        BinaryOp::Power => return complex_pow(x, y),
        _ => {
            return Err(ArithmeticError::InvalidOperand {
                op: Op::Binary(op),
                kind: NumberKind::Complex,
            });
        }
    })
}

fn complex_pow(x: Complex64, y: Complex64) -> Result<Complex64, ArithmeticError> {
    if y.is_zero() {
        return Ok(Complex64::new(1.0, 0.0));
    }
    if x.is_zero() {
        return if y.re > 0.0 && y.im == 0.0 {
            Ok(Complex64::zero())
        } else {
            Err(ArithmeticError::DivisionByZero)
        };
    }
    Ok(x.powc(y))
}

/// Computes a power for a real base and exponent, returning a complex number
/// for a negative base and a non-integer exponent.
fn real_or_complex_pow(x: f64, y: f64) -> Result<Number, ArithmeticError> {
    if x < 0.0 && y.fract() != 0.0 && y.is_finite() {
        complex_pow(Complex64::new(x, 0.0), Complex64::new(y, 0.0)).map(Number::Complex)
    } else {
        real_pow(x, y).map(Number::Real)
    }
}

fn compare(op: BinaryOp, x: Number, y: Number) -> Result<bool, ArithmeticError> {
    let ordering = match Promoted::new(x, y) {
        Promoted::Int(x, y) => Some(x.cmp(&y)),
        Promoted::Real(x, y) => x.partial_cmp(&y),
        Promoted::Complex(_, _) if op.is_order_comparison() => {
            return Err(ArithmeticError::Unordered);
        }
        Promoted::Complex(x, y) => (x == y).then_some(Ordering::Equal),
    };

    Ok(match op {
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinaryOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        _ => unreachable!("not a comparison"),
    })
}
