//! Lane element types.
//!
//! [`Element`] is implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64`
//! and is sealed. Besides the numeric bounds coming from `num`, it carries the
//! per-element operator table the vector templates dispatch to, and the raw
//! bit/byte primitives used by memory access and `FIRST_NONZERO`.

use std::fmt::Debug;

use num::traits::{Num, NumCast};

use crate::simd::ops::{BinaryOp, ComparisonOp, TernaryOp, TestOp, UnaryOp};

mod sealed {
    pub trait Sealed {}
}

/// Whether an element type is an integer or a floating point number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Integral,
    Floating,
}

/// A scalar type that can occupy a vector lane.
///
/// The operator methods (`unary`, `binary`, ...) assume the operator was
/// already accepted by the matching `check` in [`crate::simd::ops`]; they are
/// total over the operators supported for the element kind.
pub trait Element:
    Copy
    + Default
    + Debug
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Num
    + NumCast
    + sealed::Sealed
{
    /// Width of one lane in bits.
    const BITS: usize;
    /// Width of one lane in bytes.
    const BYTES: usize = Self::BITS / 8;
    const KIND: ElementKind;
    /// Rust name of the type.
    const NAME: &'static str;

    /// Raw bit pattern, zero-extended to 64 bits.
    fn to_raw_bits(self) -> u64;

    /// Builds a value from the low `BITS` bits of `bits`.
    fn from_raw_bits(bits: u64) -> Self;

    /// Reverses the byte order of the raw bit pattern.
    fn swap_bytes(self) -> Self;

    /// Lane number as a value (`iota`); integral lanes wrap.
    fn from_lane_index(index: usize) -> Self;

    /// Shuffle code as a value.
    fn from_lane_code(code: i32) -> Self;

    /// Value as a lane index request. Integral values are truncated to `i32`,
    /// floating values saturate (NaN becomes 0).
    fn to_lane_index(self) -> i32;

    /// Identity of `MIN`: `+∞` for floating lanes, the largest value otherwise.
    fn min_identity() -> Self;

    /// Identity of `MAX`: `-∞` for floating lanes, the smallest value otherwise.
    fn max_identity() -> Self;

    fn as_f64(self) -> f64;

    fn as_i64(self) -> i64;

    /// Saturating conversion for integral targets, rounding for floating ones.
    fn from_f64_lossy(value: f64) -> Self;

    /// Wrapping conversion for integral targets, rounding for floating ones.
    fn from_i64_wrapping(value: i64) -> Self;

    fn unary(op: UnaryOp, a: Self) -> Self;

    fn binary(op: BinaryOp, a: Self, b: Self) -> Self;

    fn ternary(op: TernaryOp, a: Self, b: Self, c: Self) -> Self;

    fn test(op: TestOp, a: Self) -> bool;

    fn compare(op: ComparisonOp, a: Self, b: Self) -> bool;

    /// `true` if every bit of the lane is zero (`-0.0` is not default).
    #[inline(always)]
    fn is_default(self) -> bool {
        self.to_raw_bits() == 0
    }

    /// Value cast to another element type.
    ///
    /// Integral to integral wraps, floating to integral saturates, anything
    /// to floating rounds to nearest.
    #[inline(always)]
    fn cast<F: Element>(self) -> F {
        match Self::KIND {
            ElementKind::Integral => F::from_i64_wrapping(self.as_i64()),
            ElementKind::Floating => F::from_f64_lossy(self.as_f64()),
        }
    }
}

macro_rules! impl_integral_element {
    ($t:ty, $u:ty) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const BITS: usize = <$t>::BITS as usize;
            const KIND: ElementKind = ElementKind::Integral;
            const NAME: &'static str = stringify!($t);

            #[inline(always)]
            fn to_raw_bits(self) -> u64 {
                self as $u as u64
            }

            #[inline(always)]
            fn from_raw_bits(bits: u64) -> Self {
                bits as $u as $t
            }

            #[inline(always)]
            fn swap_bytes(self) -> Self {
                <$t>::swap_bytes(self)
            }

            #[inline(always)]
            fn from_lane_index(index: usize) -> Self {
                index as $t
            }

            #[inline(always)]
            fn from_lane_code(code: i32) -> Self {
                code as $t
            }

            #[inline(always)]
            fn to_lane_index(self) -> i32 {
                self as i32
            }

            #[inline(always)]
            fn min_identity() -> Self {
                <$t>::MAX
            }

            #[inline(always)]
            fn max_identity() -> Self {
                <$t>::MIN
            }

            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn as_i64(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn from_i64_wrapping(value: i64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn unary(op: UnaryOp, a: Self) -> Self {
                match op {
                    UnaryOp::Neg => a.wrapping_neg(),
                    UnaryOp::Abs => a.wrapping_abs(),
                    UnaryOp::Not => !a,
                    UnaryOp::BitCount => a.count_ones() as $t,
                    UnaryOp::LeadingZerosCount => a.leading_zeros() as $t,
                    UnaryOp::TrailingZerosCount => a.trailing_zeros() as $t,
                    UnaryOp::ReverseBits => a.reverse_bits(),
                    UnaryOp::ReverseBytes => <$t>::swap_bytes(a),
                    _ => unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME),
                }
            }

            #[inline(always)]
            fn binary(op: BinaryOp, a: Self, b: Self) -> Self {
                // Shift and rotate counts only keep their low log2(BITS) bits.
                let count = b as u32;
                match op {
                    BinaryOp::Add => a.wrapping_add(b),
                    BinaryOp::Sub => a.wrapping_sub(b),
                    BinaryOp::Mul => a.wrapping_mul(b),
                    BinaryOp::Div => {
                        if b == 0 {
                            0
                        } else {
                            a.wrapping_div(b)
                        }
                    }
                    BinaryOp::Min => a.min(b),
                    BinaryOp::Max => a.max(b),
                    BinaryOp::FirstNonzero => {
                        if a != 0 {
                            a
                        } else {
                            b
                        }
                    }
                    BinaryOp::And => a & b,
                    BinaryOp::Or => a | b,
                    BinaryOp::Xor => a ^ b,
                    BinaryOp::AndNot => a & !b,
                    BinaryOp::Lshl => a.wrapping_shl(count),
                    BinaryOp::Ashr => a.wrapping_shr(count),
                    BinaryOp::Lshr => (a as $u).wrapping_shr(count) as $t,
                    BinaryOp::Rol => a.rotate_left(count),
                    BinaryOp::Ror => a.rotate_right(count),
                    _ => unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME),
                }
            }

            #[inline(always)]
            fn ternary(op: TernaryOp, a: Self, b: Self, c: Self) -> Self {
                match op {
                    TernaryOp::BitwiseBlend => a ^ ((a ^ b) & c),
                    TernaryOp::Fma => {
                        unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME)
                    }
                }
            }

            #[inline(always)]
            fn test(op: TestOp, a: Self) -> bool {
                match op {
                    TestOp::IsDefault => a == 0,
                    TestOp::IsNegative => a < 0,
                    _ => unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME),
                }
            }

            #[inline(always)]
            fn compare(op: ComparisonOp, a: Self, b: Self) -> bool {
                match op {
                    ComparisonOp::Eq => a == b,
                    ComparisonOp::Ne => a != b,
                    ComparisonOp::Lt => a < b,
                    ComparisonOp::Le => a <= b,
                    ComparisonOp::Gt => a > b,
                    ComparisonOp::Ge => a >= b,
                    ComparisonOp::Ult => (a as $u) < (b as $u),
                    ComparisonOp::Ule => (a as $u) <= (b as $u),
                    ComparisonOp::Ugt => (a as $u) > (b as $u),
                    ComparisonOp::Uge => (a as $u) >= (b as $u),
                }
            }
        }
    };
}

macro_rules! impl_floating_element {
    ($t:ty, $u:ty) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const BITS: usize = <$u>::BITS as usize;
            const KIND: ElementKind = ElementKind::Floating;
            const NAME: &'static str = stringify!($t);

            #[inline(always)]
            fn to_raw_bits(self) -> u64 {
                self.to_bits() as u64
            }

            #[inline(always)]
            fn from_raw_bits(bits: u64) -> Self {
                <$t>::from_bits(bits as $u)
            }

            #[inline(always)]
            fn swap_bytes(self) -> Self {
                <$t>::from_bits(self.to_bits().swap_bytes())
            }

            #[inline(always)]
            fn from_lane_index(index: usize) -> Self {
                index as $t
            }

            #[inline(always)]
            fn from_lane_code(code: i32) -> Self {
                code as $t
            }

            #[inline(always)]
            fn to_lane_index(self) -> i32 {
                self as i32
            }

            #[inline(always)]
            fn min_identity() -> Self {
                <$t>::INFINITY
            }

            #[inline(always)]
            fn max_identity() -> Self {
                <$t>::NEG_INFINITY
            }

            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn as_i64(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn from_i64_wrapping(value: i64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn unary(op: UnaryOp, a: Self) -> Self {
                match op {
                    UnaryOp::Neg => -a,
                    UnaryOp::Abs => a.abs(),
                    UnaryOp::Sqrt => a.sqrt(),
                    UnaryOp::Cbrt => a.cbrt(),
                    UnaryOp::Exp => a.exp(),
                    UnaryOp::Expm1 => a.exp_m1(),
                    UnaryOp::Log => a.ln(),
                    UnaryOp::Log10 => a.log10(),
                    UnaryOp::Log1p => a.ln_1p(),
                    UnaryOp::Sin => a.sin(),
                    UnaryOp::Cos => a.cos(),
                    UnaryOp::Tan => a.tan(),
                    UnaryOp::Asin => a.asin(),
                    UnaryOp::Acos => a.acos(),
                    UnaryOp::Atan => a.atan(),
                    UnaryOp::Sinh => a.sinh(),
                    UnaryOp::Cosh => a.cosh(),
                    UnaryOp::Tanh => a.tanh(),
                    _ => unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME),
                }
            }

            #[inline(always)]
            fn binary(op: BinaryOp, a: Self, b: Self) -> Self {
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Min => {
                        if a.is_nan() {
                            a
                        } else if b.is_nan() {
                            b
                        } else if a == b {
                            // -0.0 == +0.0, prefer the negative zero
                            if a.is_sign_negative() {
                                a
                            } else {
                                b
                            }
                        } else if a < b {
                            a
                        } else {
                            b
                        }
                    }
                    BinaryOp::Max => {
                        if a.is_nan() {
                            a
                        } else if b.is_nan() {
                            b
                        } else if a == b {
                            if a.is_sign_negative() {
                                b
                            } else {
                                a
                            }
                        } else if a > b {
                            a
                        } else {
                            b
                        }
                    }
                    BinaryOp::FirstNonzero => {
                        if a.to_bits() != 0 {
                            a
                        } else {
                            b
                        }
                    }
                    BinaryOp::Pow => a.powf(b),
                    BinaryOp::Atan2 => a.atan2(b),
                    BinaryOp::Hypot => a.hypot(b),
                    _ => unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME),
                }
            }

            #[inline(always)]
            fn ternary(op: TernaryOp, a: Self, b: Self, c: Self) -> Self {
                match op {
                    TernaryOp::Fma => a.mul_add(b, c),
                    TernaryOp::BitwiseBlend => {
                        unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME)
                    }
                }
            }

            #[inline(always)]
            fn test(op: TestOp, a: Self) -> bool {
                match op {
                    TestOp::IsDefault => a.to_bits() == 0,
                    TestOp::IsNegative => a.is_sign_negative(),
                    TestOp::IsFinite => a.is_finite(),
                    TestOp::IsNaN => a.is_nan(),
                    TestOp::IsInfinite => a.is_infinite(),
                }
            }

            #[inline(always)]
            fn compare(op: ComparisonOp, a: Self, b: Self) -> bool {
                match op {
                    ComparisonOp::Eq => a == b,
                    ComparisonOp::Ne => a != b,
                    ComparisonOp::Lt => a < b,
                    ComparisonOp::Le => a <= b,
                    ComparisonOp::Gt => a > b,
                    ComparisonOp::Ge => a >= b,
                    _ => unreachable!("{} is not defined for {} lanes", op.name(), Self::NAME),
                }
            }
        }
    };
}

impl_integral_element!(i8, u8);
impl_integral_element!(i16, u16);
impl_integral_element!(i32, u32);
impl_integral_element!(i64, u64);

impl_floating_element!(f32, u32);
impl_floating_element!(f64, u64);
