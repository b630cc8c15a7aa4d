//! Operation-related types.

use core::fmt;

/// Priority of an operation.
///
/// Variants are ordered from the loosest-binding to the tightest-binding operation,
/// so priorities can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum OpPriority {
    /// Equality and order comparisons: `==`, `!=`, `>`, `<`, `>=`, `<=`.
    Comparison,
    /// Bitwise OR (`|`).
    BitOr,
    /// Bitwise XOR (`^`).
    BitXor,
    /// Bitwise AND (`&`).
    BitAnd,
    /// Bit shifts: `<<` or `>>`.
    Shift,
    /// Addition or subtraction: `+` or `-`.
    AddOrSub,
    /// Multiplication, division, floor division or remainder: `*`, `/`, `//`, `%`.
    MulOrDiv,
    /// Power (`**`).
    Power,
    /// Unary ops: `-`, `+` or `~`.
    Unary,
}

impl OpPriority {
    /// Level of the top-level context (e.g., a whole formula or a function argument).
    /// No operation is ever parenthesized at this level.
    pub const TOP_LEVEL: u8 = 0;

    /// Returns the maximum priority.
    pub const fn max_priority() -> Self {
        Self::Unary
    }

    /// Returns the integer level of this priority. Levels start from 1 for comparisons
    /// and grow with binding strength.
    pub const fn level(self) -> u8 {
        match self {
            Self::Comparison => 1,
            Self::BitOr => 2,
            Self::BitXor => 3,
            Self::BitAnd => 4,
            Self::Shift => 5,
            Self::AddOrSub => 6,
            Self::MulOrDiv => 7,
            Self::Power => 8,
            Self::Unary => 9,
        }
    }
}

/// Associativity of a binary operation, used to decide which operand needs parentheses
/// when it has the same priority as the operation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a op b op c` is `(a op b) op c`.
    Left,
    /// `a op b op c` is `a op (b op c)`.
    Right,
    /// Chaining is not allowed; both operands are parenthesized on equal priority.
    None,
}

/// Unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum UnaryOp {
    /// Negation (`-`).
    Neg,
    /// Unary plus (`+`).
    Pos,
    /// Bitwise inversion (`~`).
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Neg => "negation",
            Self::Pos => "unary plus",
            Self::Not => "bitwise inversion",
        })
    }
}

impl UnaryOp {
    /// Returns the string representation of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Pos => "+",
            Self::Not => "~",
        }
    }

    /// Returns a relative priority of this operation.
    pub fn priority(self) -> OpPriority {
        match self {
            Self::Neg | Self::Pos | Self::Not => OpPriority::Unary,
        }
    }
}

/// Binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Floor division (`//`).
    FloorDiv,
    /// Remainder (`%`).
    Rem,
    /// Power (`**`).
    Power,
    /// Left shift (`<<`).
    Shl,
    /// Right shift (`>>`).
    Shr,
    /// Bitwise AND (`&`).
    BitAnd,
    /// Bitwise XOR (`^`).
    BitXor,
    /// Bitwise OR (`|`).
    BitOr,
    /// Equality (`==`).
    Eq,
    /// Non-equality (`!=`).
    NotEq,
    /// "Greater than" comparison.
    Gt,
    /// "Lesser than" comparison.
    Lt,
    /// "Greater or equal" comparison.
    Ge,
    /// "Lesser or equal" comparison.
    Le,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Add => "addition",
            Self::Sub => "subtraction",
            Self::Mul => "multiplication",
            Self::Div => "division",
            Self::FloorDiv => "floor division",
            Self::Rem => "remainder",
            Self::Power => "exponentiation",
            Self::Shl => "left shift",
            Self::Shr => "right shift",
            Self::BitAnd => "bitwise AND",
            Self::BitXor => "bitwise XOR",
            Self::BitOr => "bitwise OR",
            Self::Eq => "equality comparison",
            Self::NotEq => "non-equality comparison",
            Self::Gt => "greater comparison",
            Self::Lt => "lesser comparison",
            Self::Ge => "greater-or-equal comparison",
            Self::Le => "lesser-or-equal comparison",
        })
    }
}

impl BinaryOp {
    /// Returns the string representation of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Rem => "%",
            Self::Power => "**",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }

    /// Returns the priority of this operation.
    pub fn priority(self) -> OpPriority {
        match self {
            Self::Eq | Self::NotEq | Self::Gt | Self::Lt | Self::Le | Self::Ge => {
                OpPriority::Comparison
            }
            Self::BitOr => OpPriority::BitOr,
            Self::BitXor => OpPriority::BitXor,
            Self::BitAnd => OpPriority::BitAnd,
            Self::Shl | Self::Shr => OpPriority::Shift,
            Self::Add | Self::Sub => OpPriority::AddOrSub,
            Self::Mul | Self::Div | Self::FloorDiv | Self::Rem => OpPriority::MulOrDiv,
            Self::Power => OpPriority::Power,
        }
    }

    /// Returns the associativity of this operation.
    pub fn associativity(self) -> Associativity {
        if self == Self::Power {
            Associativity::Right
        } else if self.is_comparison() {
            Associativity::None
        } else {
            Associativity::Left
        }
    }

    /// Checks if this operation is arithmetic.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Mul
                | Self::Div
                | Self::FloorDiv
                | Self::Rem
                | Self::Power
        )
    }

    /// Checks if this operation is a shift or a bitwise operation.
    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            Self::Shl | Self::Shr | Self::BitAnd | Self::BitXor | Self::BitOr
        )
    }

    /// Checks if this operation is a comparison.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Gt | Self::Lt | Self::Le | Self::Ge
        )
    }

    /// Checks if this operation is an order comparison.
    pub fn is_order_comparison(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Le | Self::Ge)
    }
}

/// Generic operation, either unary or binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Op {
    /// Unary operation.
    Unary(UnaryOp),
    /// Binary operation.
    Binary(BinaryOp),
}

impl fmt::Display for Op {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary(inner) => fmt::Display::fmt(inner, formatter),
            Self::Binary(inner) => fmt::Display::fmt(inner, formatter),
        }
    }
}

impl From<UnaryOp> for Op {
    fn from(value: UnaryOp) -> Self {
        Self::Unary(value)
    }
}

impl From<BinaryOp> for Op {
    fn from(value: BinaryOp) -> Self {
        Self::Binary(value)
    }
}
