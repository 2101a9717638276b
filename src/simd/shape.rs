//! Vector shapes (total register width, independent of the lane type).

use crate::config::{MAX_VECTOR_BITS, PREFERRED_VECTOR_BITS};

/// Total bit width of a vector.
///
/// `SMax` is the build-configured maximum (`MAX_VECTOR_BITS`). It is a fixed
/// architectural width, 2048 bits unless overridden, and does not follow the
/// register width of the build host; that is [`VectorShape::preferred`].
/// When the maximum coincides with one of the fixed widths, the fixed shape is
/// the one reported by [`VectorShape::for_bit_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorShape {
    S64,
    S128,
    S256,
    S512,
    SMax,
}

impl VectorShape {
    /// Width of the shape in bits.
    pub const fn vector_bit_size(self) -> usize {
        match self {
            VectorShape::S64 => 64,
            VectorShape::S128 => 128,
            VectorShape::S256 => 256,
            VectorShape::S512 => 512,
            VectorShape::SMax => MAX_VECTOR_BITS,
        }
    }

    /// Shape with the given width, if any.
    pub const fn for_bit_size(bits: usize) -> Option<Self> {
        match bits {
            64 => Some(VectorShape::S64),
            128 => Some(VectorShape::S128),
            256 => Some(VectorShape::S256),
            512 => Some(VectorShape::S512),
            b if b == MAX_VECTOR_BITS => Some(VectorShape::SMax),
            _ => None,
        }
    }

    /// Returns `true` if some shape is exactly `bits` wide.
    pub const fn is_supported_bit_size(bits: usize) -> bool {
        Self::for_bit_size(bits).is_some()
    }

    /// Shape matching the widest instruction set found at build time.
    pub fn preferred() -> Self {
        let shape = Self::for_bit_size(PREFERRED_VECTOR_BITS).unwrap_or(VectorShape::SMax);
        log::debug!(
            "preferred vector shape {:?} ({} bits, {} backend)",
            shape,
            shape.vector_bit_size(),
            crate::config::backend_name()
        );
        shape
    }

    /// Number of `element_bits`-wide lanes that fit the shape.
    pub const fn lane_count(self, element_bits: usize) -> usize {
        self.vector_bit_size() / element_bits
    }
}
