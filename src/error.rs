//! Error types for vector, mask and shuffle operations.
//!
//! Every fallible operation validates its inputs before touching any lane, so
//! an error never comes with a partially built result. Broken internal
//! invariants (a shuffle code outside `[-N, N)`, for example) are not part of
//! this taxonomy: they panic.

use std::fmt;

/// Errors that can occur during vector operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// An index fell outside the valid range `[0, length)`.
    IndexOutOfRange {
        /// The offending index, as requested by the caller.
        index: i64,
        /// Exclusive upper bound of the valid range.
        length: usize,
    },
    /// Two operands do not share lane count and element type.
    SpeciesMismatch {
        /// Species the operation required.
        expected: String,
        /// Species that was supplied.
        actual: String,
    },
    /// A reduction result does not fit the requested scalar width.
    UnsupportedReduction {
        /// Number of lanes being folded.
        lanes: usize,
        /// Width of the scalar accumulator in bits.
        bits: usize,
    },
    /// The operator is not defined for the element type.
    UnsupportedOperation {
        /// Operator name.
        operation: &'static str,
        /// Element type name.
        element: &'static str,
    },
    /// Integral division with a zero divisor.
    DivideByZero {
        /// Lane holding the zero divisor.
        lane: usize,
    },
    /// Two slices handed to a bulk kernel have different lengths.
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::IndexOutOfRange { index, length } => write!(
                f,
                "Index {} out of range: valid range is [0, {}]",
                index,
                *length as i64 - 1
            ),
            VectorError::SpeciesMismatch { expected, actual } => {
                write!(f, "Species mismatch: expected {}, found {}", expected, actual)
            }
            VectorError::UnsupportedReduction { lanes, bits } => write!(
                f,
                "Unsupported reduction: {} lanes do not fit a {}-bit result",
                lanes, bits
            ),
            VectorError::UnsupportedOperation { operation, element } => write!(
                f,
                "Unsupported operation: {} is not defined for {} lanes",
                operation, element
            ),
            VectorError::DivideByZero { lane } => {
                write!(f, "Integral division by zero in lane {}", lane)
            }
            VectorError::LengthMismatch { left, right } => write!(
                f,
                "Length mismatch: left operand has {} elements, right operand has {}",
                left, right
            ),
        }
    }
}

impl std::error::Error for VectorError {}

/// Result type alias for vector operations.
pub type Result<T> = std::result::Result<T, VectorError>;

/// Creates an index out of range error.
pub fn index_out_of_range(index: i64, length: usize) -> VectorError {
    VectorError::IndexOutOfRange { index, length }
}

/// Creates a species mismatch error.
pub fn species_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> VectorError {
    VectorError::SpeciesMismatch {
        expected: expected.into(),
        actual: actual.into(),
    }
}

/// Creates an unsupported reduction error.
pub fn unsupported_reduction(lanes: usize, bits: usize) -> VectorError {
    VectorError::UnsupportedReduction { lanes, bits }
}

/// Creates an unsupported operation error.
pub fn unsupported_operation(operation: &'static str, element: &'static str) -> VectorError {
    VectorError::UnsupportedOperation { operation, element }
}

/// Creates a divide by zero error.
pub fn divide_by_zero(lane: usize) -> VectorError {
    VectorError::DivideByZero { lane }
}

/// Creates a length mismatch error.
pub fn length_mismatch(left: usize, right: usize) -> VectorError {
    VectorError::LengthMismatch { left, right }
}
