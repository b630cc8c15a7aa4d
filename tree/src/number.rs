//! Numeric values used as tree leaves and evaluation results.

use core::fmt;

use num_complex::Complex64;
use num_traits::Zero;

/// Kind of a [`Number`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Signed integer.
    Int,
    /// Floating-point real number.
    Real,
    /// Floating-point complex number.
    Complex,
    /// Boolean value.
    Bool,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Int => "integer",
            Self::Real => "real number",
            Self::Complex => "complex number",
            Self::Bool => "Boolean value",
        })
    }
}

/// Numeric value: exactly one of an integer, a real, a complex number or a Boolean value.
///
/// Booleans participate in arithmetic as 0 / 1. Complex numbers have no ordering,
/// and are never considered negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer.
    Int(i64),
    /// Floating-point real number.
    Real(f64),
    /// Floating-point complex number.
    Complex(Complex64),
    /// Boolean value.
    Bool(bool),
}

impl Number {
    /// Returns the kind of this number.
    pub fn kind(&self) -> NumberKind {
        match self {
            Self::Int(_) => NumberKind::Int,
            Self::Real(_) => NumberKind::Real,
            Self::Complex(_) => NumberKind::Complex,
            Self::Bool(_) => NumberKind::Bool,
        }
    }

    /// Checks whether this number is negative. Always `false` for complex numbers
    /// and Boolean values.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Int(value) => *value < 0,
            Self::Real(value) => value.is_sign_negative() && *value != 0.0,
            Self::Complex(_) | Self::Bool(_) => false,
        }
    }

    /// Checks whether this number is zero (`false` is considered zero).
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Real(value) => *value == 0.0,
            Self::Complex(value) => value.is_zero(),
            Self::Bool(value) => !*value,
        }
    }

    /// Interprets this number as a truth value: any non-zero number is truthy.
    pub fn is_truthy(&self) -> bool {
        !self.is_zero()
    }

    /// Returns the integer value of this number, if it is an integer or a Boolean value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(value) => Some(i64::from(*value)),
            Self::Real(_) | Self::Complex(_) => None,
        }
    }

    /// Returns the real value of this number, if it is not a complex number.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            Self::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Self::Complex(_) => None,
        }
    }

    /// Returns this number converted to a complex number.
    pub fn as_complex(&self) -> Complex64 {
        match self {
            Self::Complex(value) => *value,
            other => Complex64::new(other.as_real().unwrap_or_default(), 0.0),
        }
    }

    /// Returns a wrapper displaying this number as an operand: numbers displayed
    /// with a leading minus sign are enclosed in parentheses, e.g. `(-5)` or `(-0.0)`.
    pub fn as_operand(&self) -> OperandDisplay<'_> {
        OperandDisplay(self)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(formatter, "{value}"),
            // `Debug` output is the shortest round-trip form and always retains
            // the fractional part (`10.0` rather than `10`).
            Self::Real(value) => write!(formatter, "{value:?}"),
            Self::Complex(value) => {
                let sign = if value.im.is_sign_negative() { '-' } else { '+' };
                write!(formatter, "({}{sign}{}i)", value.re, value.im.abs())
            }
            Self::Bool(value) => write!(formatter, "{value}"),
        }
    }
}

/// Display wrapper returned by [`Number::as_operand()`].
#[derive(Debug, Clone, Copy)]
pub struct OperandDisplay<'a>(&'a Number);

impl fmt::Display for OperandDisplay<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_minus_sign = match self.0 {
            Number::Real(value) => value.is_sign_negative() && !value.is_nan(),
            other => other.is_negative(),
        };
        if has_minus_sign {
            write!(formatter, "({})", self.0)
        } else {
            fmt::Display::fmt(self.0, formatter)
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {
        $(
        impl From<$ty> for Number {
            fn from(value: $ty) -> Self {
                Self::Int(value.into())
            }
        }
        )+
    };
}

impl_from_int!(i8, u8, i16, u16, i32, u32, i64);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self::Real(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Complex64> for Number {
    fn from(value: Complex64) -> Self {
        Self::Complex(value)
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displaying_numbers() {
        assert_eq!(Number::Int(-4).to_string(), "-4");
        assert_eq!(Number::Real(8.2).to_string(), "8.2");
        assert_eq!(Number::Real(10.0).to_string(), "10.0");
        assert_eq!(Number::Real(3e3).to_string(), "3000.0");
        assert_eq!(Number::Bool(true).to_string(), "true");
        assert_eq!(Number::from(Complex64::new(-2.1, 8.0)).to_string(), "(-2.1+8i)");
        assert_eq!(Number::from(Complex64::new(0.0, -3.0)).to_string(), "(0-3i)");
    }

    #[test]
    fn operand_display_parenthesizes_negative_values() {
        assert_eq!(Number::Int(-5).as_operand().to_string(), "(-5)");
        assert_eq!(Number::Real(-0.5).as_operand().to_string(), "(-0.5)");
        assert_eq!(Number::Int(5).as_operand().to_string(), "5");
        let complex = Number::from(Complex64::new(-1.0, -1.0));
        assert_eq!(complex.as_operand().to_string(), "(-1-1i)");
        assert!(!complex.is_negative());
    }

    #[test]
    fn negative_zero_is_not_negative() {
        let zero = Number::Real(-0.0);
        assert!(!zero.is_negative());
        assert!(zero.is_zero());
        // ...but its sign is still visible in the text, so it is parenthesized as an operand.
        assert_eq!(zero.as_operand().to_string(), "(-0.0)");
        assert_eq!(Number::Real(0.0).as_operand().to_string(), "0.0");
        assert_eq!(Number::Real(f64::NEG_INFINITY).as_operand().to_string(), "(-inf)");
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(true).as_int(), Some(1));
        assert_eq!(Number::from(3_u8).as_real(), Some(3.0));
        assert_eq!(Number::Real(1.5).as_int(), None);
        assert_eq!(Number::Int(2).as_complex(), Complex64::new(2.0, 0.0));
        assert_eq!(Number::from(Complex64::new(1.0, 1.0)).as_real(), None);
        assert!(Number::Bool(false).is_zero());
        assert!(Number::Int(-1).is_truthy());
        assert_eq!(Number::Real(0.5).kind(), NumberKind::Real);
    }
}
