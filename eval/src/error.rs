//! Errors raised by formula composition, substitution and evaluation.

use core::fmt;
use std::collections::BTreeSet;

use crate::fns::Arity;
use formula_tree::{NumberKind, Op};

/// Arithmetic errors raised by operations on [`Number`](crate::Number)s.
///
/// These errors are produced by the underlying numeric operations and passed
/// through unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArithmeticError {
    /// Integer overflow or underflow.
    IntegerOverflow,
    /// Division by zero.
    DivisionByZero,
    /// Exponent of the power operation is too large.
    InvalidExponent,
    /// Shift count is negative.
    InvalidShift,
    /// Order comparison of complex numbers.
    Unordered,
    /// Operation is not defined for the operand.
    InvalidOperand {
        /// Failed operation.
        op: Op,
        /// Kind of the offending operand.
        kind: NumberKind,
    },
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerOverflow => formatter.write_str("integer overflow or underflow"),
            Self::DivisionByZero => formatter.write_str("division by zero"),
            Self::InvalidExponent => formatter.write_str("exponent is too large"),
            Self::InvalidShift => formatter.write_str("negative shift count"),
            Self::Unordered => formatter.write_str("complex numbers cannot be ordered"),
            Self::InvalidOperand { op, kind } => {
                write!(formatter, "{op} is not defined for a {kind}")
            }
        }
    }
}

impl std::error::Error for ArithmeticError {}

/// Kind of an operand in dynamically typed composition (see [`Value`](crate::Value)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// Plain number.
    Number,
    /// Production (composed expression tree).
    Production,
    /// Formula.
    Formula,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Number => "number",
            Self::Production => "production",
            Self::Formula => "formula",
        })
    }
}

/// Errors that can occur when building, binding or evaluating formulas.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Symbol name is not a valid identifier.
    InvalidSymbolName(String),
    /// Symbol with the same name is already registered.
    DuplicateSymbolName(String),
    /// Bound variables do not match the free variables of a formula.
    ArgumentMismatch {
        /// Free variables of the formula. For currying, this is the set of variables
        /// that may be bound.
        expected: BTreeSet<String>,
        /// Variables supplied by the caller.
        actual: BTreeSet<String>,
    },
    /// Operands from incompatible composition universes (formulas and productions)
    /// are mixed in a single operation.
    TypeMismatch {
        /// Kind of the left-hand side / first offending operand.
        lhs: OperandKind,
        /// Kind of the right-hand side / second offending operand.
        rhs: OperandKind,
    },
    /// Variable with the enclosed name is not bound.
    MissingBinding(String),
    /// Arithmetic error.
    Arithmetic(ArithmeticError),
    /// Math function is called with a wrong number of args.
    ArityMismatch {
        /// Function name.
        function: String,
        /// Expected arity.
        expected: Arity,
        /// Actual number of args.
        actual: usize,
    },
    /// Generic error during execution of a math function.
    NativeCall {
        /// Function name.
        function: String,
        /// Error message.
        message: String,
    },
    /// Formula with the enclosed name is not present in the directory.
    UnknownFormula(String),
    /// Formula must have exactly one free variable.
    NotUnivariate {
        /// Actual number of free variables.
        arity: usize,
    },
    /// Sampling range is invalid.
    InvalidRange {
        /// Range start.
        start: f64,
        /// Range end.
        end: f64,
    },
    /// Sampling precision is zero or exceeds [`Sampler::MAX_PRECISION`](crate::Sampler::MAX_PRECISION).
    InvalidPrecision,
}

impl Error {
    /// Creates a native error.
    pub fn native(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NativeCall {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Creates an argument mismatch error.
    pub(crate) fn argument_mismatch<'a>(
        expected: &BTreeSet<String>,
        actual: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self::ArgumentMismatch {
            expected: expected.clone(),
            actual: actual.map(str::to_owned).collect(),
        }
    }

    /// For [`Self::ArgumentMismatch`], returns variables that were expected but not supplied.
    pub fn missing_arguments(&self) -> Vec<&str> {
        match self {
            Self::ArgumentMismatch { expected, actual } => {
                expected.difference(actual).map(String::as_str).collect()
            }
            _ => vec![],
        }
    }

    /// For [`Self::ArgumentMismatch`], returns variables that were supplied but not expected.
    pub fn unexpected_arguments(&self) -> Vec<&str> {
        match self {
            Self::ArgumentMismatch { expected, actual } => {
                actual.difference(expected).map(String::as_str).collect()
            }
            _ => vec![],
        }
    }
}

fn write_names(formatter: &mut fmt::Formatter<'_>, names: &BTreeSet<String>) -> fmt::Result {
    formatter.write_str("{")?;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            formatter.write_str(", ")?;
        }
        formatter.write_str(name)?;
    }
    formatter.write_str("}")
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSymbolName(name) => {
                write!(formatter, "`{name}` is not a valid symbol name")
            }
            Self::DuplicateSymbolName(name) => {
                write!(formatter, "Symbol `{name}` is already defined")
            }
            Self::ArgumentMismatch { expected, actual } => {
                formatter.write_str("Mismatch between expected variables ")?;
                write_names(formatter, expected)?;
                formatter.write_str(" and supplied variables ")?;
                write_names(formatter, actual)
            }
            Self::TypeMismatch { lhs, rhs } => {
                write!(formatter, "Cannot mix {lhs} and {rhs} operands")
            }
            Self::MissingBinding(name) => write!(formatter, "Variable `{name}` is not bound"),
            Self::Arithmetic(err) => write!(formatter, "Arithmetic error: {err}"),
            Self::ArityMismatch {
                function,
                expected,
                actual,
            } => write!(
                formatter,
                "Function `{function}` expects {expected} arg(s), but is called with {actual}"
            ),
            Self::NativeCall { function, message } => {
                write!(formatter, "Failed executing `{function}`: {message}")
            }
            Self::UnknownFormula(name) => write!(formatter, "Formula `{name}` is not defined"),
            Self::NotUnivariate { arity } => write!(
                formatter,
                "Formula must have exactly 1 free variable, but it has {arity}"
            ),
            Self::InvalidRange { start, end } => {
                write!(formatter, "[{start}, {end}] is not a valid range")
            }
            Self::InvalidPrecision => write!(
                formatter,
                "Precision must be between 1 and {}",
                crate::Sampler::MAX_PRECISION
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArithmeticError> for Error {
    fn from(err: ArithmeticError) -> Self {
        Self::Arithmetic(err)
    }
}

/// Result of an evaluation or another fallible operation.
pub type EvalResult<T = crate::Number> = Result<T, Error>;
