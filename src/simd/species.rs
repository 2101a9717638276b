//! Species: the (element type, lane count) pair behind every vector, mask and
//! shuffle.

use std::{any::TypeId, fmt, marker::PhantomData};

use crate::{
    error::{species_mismatch, Result},
    simd::{
        element::{Element, ElementKind},
        mask::Mask,
        shape::VectorShape,
        shuffle::Shuffle,
        vector::Vector,
    },
};

/// Zero-sized descriptor of `N` lanes of type `E`.
///
/// `N * E::BITS` must be the width of a [`VectorShape`]; other combinations
/// fail to compile as soon as a species, vector, mask or shuffle is built for
/// them.
///
/// ```rust
/// use simdly_vector::simd::Species;
///
/// let species = Species::<i32, 8>::new();
/// assert_eq!(species.length(), 8);
/// assert_eq!(species.vector_bit_size(), 256);
/// ```
pub struct Species<E: Element, const N: usize> {
    _element: PhantomData<E>,
}

impl<E: Element, const N: usize> Species<E, N> {
    pub(crate) const VALID: () = assert!(
        N >= 1 && VectorShape::is_supported_bit_size(N * E::BITS),
        "lane count times element width must match a vector shape"
    );

    /// Number of lanes.
    pub const LANES: usize = N;

    pub const fn new() -> Self {
        let () = Self::VALID;
        Species {
            _element: PhantomData,
        }
    }

    /// Number of lanes.
    #[inline(always)]
    pub const fn length(&self) -> usize {
        N
    }

    /// Lane width in bits.
    #[inline(always)]
    pub const fn element_size(&self) -> usize {
        E::BITS
    }

    #[inline(always)]
    pub const fn element_kind(&self) -> ElementKind {
        E::KIND
    }

    #[inline(always)]
    pub const fn vector_bit_size(&self) -> usize {
        N * E::BITS
    }

    #[inline(always)]
    pub const fn vector_byte_size(&self) -> usize {
        N * E::BYTES
    }

    pub fn shape(&self) -> VectorShape {
        // VALID guarantees the width matches a shape.
        VectorShape::for_bit_size(self.vector_bit_size()).unwrap_or(VectorShape::SMax)
    }

    /// Largest multiple of `N` not greater than `length`.
    #[inline(always)]
    pub const fn loop_bound(&self, length: usize) -> usize {
        length - length % N
    }

    /// Vector whose lanes all hold the default (zero) element.
    pub fn zero(&self) -> Vector<E, N> {
        Vector::zero(*self)
    }

    /// Vector whose lane `i` holds `i`.
    pub fn iota(&self) -> Vector<E, N> {
        Vector::iota(*self)
    }

    pub fn broadcast(&self, e: E) -> Vector<E, N> {
        Vector::broadcast(*self, e)
    }

    pub fn mask_all(&self, bit: bool) -> Mask<E, N> {
        Mask::splat(*self, bit)
    }

    /// Mask of lanes `i` with `offset + i < limit`.
    pub fn index_in_range(&self, offset: usize, limit: usize) -> Mask<E, N> {
        Mask::index_in_range_of(*self, offset, limit)
    }

    /// Shuffle with lane `i` sourced from `start + i * step`.
    pub fn iota_shuffle(&self, start: i32, step: i32, wrap: bool) -> Shuffle<E, N> {
        Shuffle::iota(*self, start, step, wrap)
    }

    /// Checks that `other` names the same species.
    pub fn check<F: Element, const M: usize>(&self, other: Species<F, M>) -> Result<Self> {
        if TypeId::of::<E>() == TypeId::of::<F>() && N == M {
            Ok(*self)
        } else {
            Err(species_mismatch(self.to_string(), other.to_string()))
        }
    }
}

impl<E: Element, const N: usize> Clone for Species<E, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Element, const N: usize> Copy for Species<E, N> {}

impl<E: Element, const N: usize> Default for Species<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element, const N: usize> PartialEq for Species<E, N> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<E: Element, const N: usize> Eq for Species<E, N> {}

impl<E: Element, const N: usize> fmt::Debug for Species<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<E: Element, const N: usize> fmt::Display for Species<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Species<{}, {}>", E::NAME, N)
    }
}
