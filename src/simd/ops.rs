//! Lanewise operator tables.
//!
//! Every operator is a plain enum dispatched with `match` inside the element
//! implementations (see [`Element`]). Before any lane is touched the vector
//! templates call `check::<E>()`, which rejects operators that are not defined
//! for the element kind (bitwise operators on floating lanes, transcendental
//! functions on integral lanes, and so on).

use crate::{
    error::{unsupported_operation, Result},
    simd::element::{Element, ElementKind},
};

/// Unary lanewise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-a` (wrapping for integral lanes)
    Neg,
    /// `|a|` (wrapping for integral lanes, so `abs(MIN) == MIN`)
    Abs,
    /// `!a`
    Not,
    /// Number of set bits.
    BitCount,
    /// Number of leading zero bits.
    LeadingZerosCount,
    /// Number of trailing zero bits.
    TrailingZerosCount,
    /// Bit order reversal.
    ReverseBits,
    /// Byte order reversal.
    ReverseBytes,
    Sqrt,
    Cbrt,
    Exp,
    /// `e^a - 1`
    Expm1,
    /// Natural logarithm.
    Log,
    Log10,
    /// `ln(1 + a)`
    Log1p,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

impl UnaryOp {
    /// Operator name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "NEG",
            UnaryOp::Abs => "ABS",
            UnaryOp::Not => "NOT",
            UnaryOp::BitCount => "BIT_COUNT",
            UnaryOp::LeadingZerosCount => "LEADING_ZEROS_COUNT",
            UnaryOp::TrailingZerosCount => "TRAILING_ZEROS_COUNT",
            UnaryOp::ReverseBits => "REVERSE",
            UnaryOp::ReverseBytes => "REVERSE_BYTES",
            UnaryOp::Sqrt => "SQRT",
            UnaryOp::Cbrt => "CBRT",
            UnaryOp::Exp => "EXP",
            UnaryOp::Expm1 => "EXPM1",
            UnaryOp::Log => "LOG",
            UnaryOp::Log10 => "LOG10",
            UnaryOp::Log1p => "LOG1P",
            UnaryOp::Sin => "SIN",
            UnaryOp::Cos => "COS",
            UnaryOp::Tan => "TAN",
            UnaryOp::Asin => "ASIN",
            UnaryOp::Acos => "ACOS",
            UnaryOp::Atan => "ATAN",
            UnaryOp::Sinh => "SINH",
            UnaryOp::Cosh => "COSH",
            UnaryOp::Tanh => "TANH",
        }
    }

    /// Returns `true` if the operator is defined for lanes of `kind`.
    pub const fn supports(self, kind: ElementKind) -> bool {
        match self {
            UnaryOp::Neg | UnaryOp::Abs => true,
            UnaryOp::Not
            | UnaryOp::BitCount
            | UnaryOp::LeadingZerosCount
            | UnaryOp::TrailingZerosCount
            | UnaryOp::ReverseBits
            | UnaryOp::ReverseBytes => matches!(kind, ElementKind::Integral),
            _ => matches!(kind, ElementKind::Floating),
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        check_support(self.supports(E::KIND), self.name(), E::NAME)
    }
}

/// Binary lanewise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b` (wrapping for integral lanes)
    Add,
    /// `a - b` (wrapping for integral lanes)
    Sub,
    /// `a * b` (wrapping for integral lanes)
    Mul,
    /// `a / b`; integral division by zero is an error.
    Div,
    /// Smaller of the two lanes. NaN wins, `-0.0 < +0.0`.
    Min,
    /// Larger of the two lanes. NaN wins, `-0.0 < +0.0`.
    Max,
    /// `a` if its bit pattern is nonzero, else `b`.
    FirstNonzero,
    And,
    Or,
    Xor,
    /// `a & !b`
    AndNot,
    /// Logical shift left, count masked to the lane width.
    Lshl,
    /// Arithmetic shift right, count masked to the lane width.
    Ashr,
    /// Logical shift right, count masked to the lane width.
    Lshr,
    /// Rotate left.
    Rol,
    /// Rotate right.
    Ror,
    /// `a` raised to the power `b`.
    Pow,
    /// Four-quadrant arctangent of `a / b`.
    Atan2,
    /// `sqrt(a² + b²)` without intermediate overflow.
    Hypot,
}

impl BinaryOp {
    /// Operator name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "ADD",
            BinaryOp::Sub => "SUB",
            BinaryOp::Mul => "MUL",
            BinaryOp::Div => "DIV",
            BinaryOp::Min => "MIN",
            BinaryOp::Max => "MAX",
            BinaryOp::FirstNonzero => "FIRST_NONZERO",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Xor => "XOR",
            BinaryOp::AndNot => "AND_NOT",
            BinaryOp::Lshl => "LSHL",
            BinaryOp::Ashr => "ASHR",
            BinaryOp::Lshr => "LSHR",
            BinaryOp::Rol => "ROL",
            BinaryOp::Ror => "ROR",
            BinaryOp::Pow => "POW",
            BinaryOp::Atan2 => "ATAN2",
            BinaryOp::Hypot => "HYPOT",
        }
    }

    /// Returns `true` if the operator is defined for lanes of `kind`.
    pub const fn supports(self, kind: ElementKind) -> bool {
        match self {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Min
            | BinaryOp::Max
            | BinaryOp::FirstNonzero => true,
            BinaryOp::Pow | BinaryOp::Atan2 | BinaryOp::Hypot => {
                matches!(kind, ElementKind::Floating)
            }
            _ => matches!(kind, ElementKind::Integral),
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        check_support(self.supports(E::KIND), self.name(), E::NAME)
    }
}

/// Ternary lanewise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    /// Fused `a * b + c` with a single rounding.
    Fma,
    /// Bits of `b` where `c` is set, bits of `a` elsewhere.
    BitwiseBlend,
}

impl TernaryOp {
    /// Operator name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            TernaryOp::Fma => "FMA",
            TernaryOp::BitwiseBlend => "BITWISE_BLEND",
        }
    }

    /// Returns `true` if the operator is defined for lanes of `kind`.
    pub const fn supports(self, kind: ElementKind) -> bool {
        match self {
            TernaryOp::Fma => matches!(kind, ElementKind::Floating),
            TernaryOp::BitwiseBlend => matches!(kind, ElementKind::Integral),
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        check_support(self.supports(E::KIND), self.name(), E::NAME)
    }
}

/// Single-lane predicates producing a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestOp {
    /// Bit pattern is all zeros.
    IsDefault,
    /// Sign bit is set.
    IsNegative,
    IsFinite,
    IsNaN,
    IsInfinite,
}

impl TestOp {
    /// Operator name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            TestOp::IsDefault => "IS_DEFAULT",
            TestOp::IsNegative => "IS_NEGATIVE",
            TestOp::IsFinite => "IS_FINITE",
            TestOp::IsNaN => "IS_NAN",
            TestOp::IsInfinite => "IS_INFINITE",
        }
    }

    /// Returns `true` if the operator is defined for lanes of `kind`.
    pub const fn supports(self, kind: ElementKind) -> bool {
        match self {
            TestOp::IsDefault | TestOp::IsNegative => true,
            _ => matches!(kind, ElementKind::Floating),
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        check_support(self.supports(E::KIND), self.name(), E::NAME)
    }
}

/// Lanewise comparisons producing a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Unsigned `<`.
    Ult,
    /// Unsigned `<=`.
    Ule,
    /// Unsigned `>`.
    Ugt,
    /// Unsigned `>=`.
    Uge,
}

impl ComparisonOp {
    /// Operator name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "EQ",
            ComparisonOp::Ne => "NE",
            ComparisonOp::Lt => "LT",
            ComparisonOp::Le => "LE",
            ComparisonOp::Gt => "GT",
            ComparisonOp::Ge => "GE",
            ComparisonOp::Ult => "UNSIGNED_LT",
            ComparisonOp::Ule => "UNSIGNED_LE",
            ComparisonOp::Ugt => "UNSIGNED_GT",
            ComparisonOp::Uge => "UNSIGNED_GE",
        }
    }

    /// Returns `true` if the operator is defined for lanes of `kind`.
    pub const fn supports(self, kind: ElementKind) -> bool {
        match self {
            ComparisonOp::Ult | ComparisonOp::Ule | ComparisonOp::Ugt | ComparisonOp::Uge => {
                matches!(kind, ElementKind::Integral)
            }
            _ => true,
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        check_support(self.supports(E::KIND), self.name(), E::NAME)
    }
}

/// Associative operators accepted by lane reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociativeOp {
    Add,
    Mul,
    Min,
    Max,
    And,
    Or,
    Xor,
    FirstNonzero,
}

impl AssociativeOp {
    /// Operator name used in error messages.
    pub const fn name(self) -> &'static str {
        self.binary_op().name()
    }

    /// The lanewise operator used to fold two lanes.
    pub const fn binary_op(self) -> BinaryOp {
        match self {
            AssociativeOp::Add => BinaryOp::Add,
            AssociativeOp::Mul => BinaryOp::Mul,
            AssociativeOp::Min => BinaryOp::Min,
            AssociativeOp::Max => BinaryOp::Max,
            AssociativeOp::And => BinaryOp::And,
            AssociativeOp::Or => BinaryOp::Or,
            AssociativeOp::Xor => BinaryOp::Xor,
            AssociativeOp::FirstNonzero => BinaryOp::FirstNonzero,
        }
    }

    /// Returns `true` if the operator is defined for lanes of `kind`.
    pub const fn supports(self, kind: ElementKind) -> bool {
        self.binary_op().supports(kind)
    }

    /// Result of reducing zero lanes.
    ///
    /// `0` for ADD, OR, XOR and FIRST_NONZERO, `1` for MUL, all ones for AND,
    /// the largest value (`+∞` for floating lanes) for MIN and the smallest
    /// (`-∞`) for MAX.
    pub fn identity<E: Element>(self) -> E {
        match self {
            AssociativeOp::Add
            | AssociativeOp::Or
            | AssociativeOp::Xor
            | AssociativeOp::FirstNonzero => E::zero(),
            AssociativeOp::Mul => E::one(),
            AssociativeOp::Min => E::min_identity(),
            AssociativeOp::Max => E::max_identity(),
            AssociativeOp::And => E::from_raw_bits(u64::MAX),
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        check_support(self.supports(E::KIND), self.name(), E::NAME)
    }
}

#[inline(always)]
fn check_support(supported: bool, operation: &'static str, element: &'static str) -> Result<()> {
    if supported {
        Ok(())
    } else {
        Err(unsupported_operation(operation, element))
    }
}
