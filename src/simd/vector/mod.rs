//! Fixed-width vectors.
//!
//! A [`Vector`] is an immutable array of `N` lanes of type `E`. Every
//! operation builds its result in a private lane array and returns it as a new
//! value. The operation families are split by concern:
//!
//! - `lanewise`: unary, binary and ternary operators, with masked forms
//! - `permute`: rearrange, select, compress/expand, slice/unslice
//! - `reduce`: associative folds across lanes
//! - `memory`: loads and stores against slices, byte buffers and `ndarray`
//!   views
//! - `convert`: lane casts between species

use std::ops::{Add, Mul, Neg, Sub};

use crate::{
    error::Result,
    simd::{
        element::Element,
        index::{check_index, saturating_index},
        mask::Mask,
        ops::{BinaryOp, ComparisonOp, TestOp, UnaryOp},
        species::Species,
    },
};

mod convert;
mod lanewise;
mod memory;
mod permute;
mod reduce;

pub use memory::ByteOrder;

/// `N` lanes of `E`.
///
/// ```rust
/// use simdly_vector::simd::{Species, Vector};
///
/// let species = Species::<i32, 4>::new();
/// let a = Vector::from_lanes([1, 2, 3, 4]);
/// let b = species.broadcast(10);
/// assert_eq!((a + b).to_array(), [11, 12, 13, 14]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<E: Element, const N: usize> {
    lanes: [E; N],
}

impl<E: Element, const N: usize> Vector<E, N> {
    #[inline(always)]
    pub fn from_lanes(lanes: [E; N]) -> Self {
        let () = Species::<E, N>::VALID;
        Vector { lanes }
    }

    /// All lanes default (zero).
    #[inline(always)]
    pub fn zero(_species: Species<E, N>) -> Self {
        Self::from_lanes([E::default(); N])
    }

    #[inline(always)]
    pub fn broadcast(_species: Species<E, N>, e: E) -> Self {
        Self::from_lanes([e; N])
    }

    /// Lane `i` holds `i`.
    pub fn iota(_species: Species<E, N>) -> Self {
        Self::from_lanes(std::array::from_fn(E::from_lane_index))
    }

    /// Lane `i` holds `f(i)`.
    pub fn from_generator<F: FnMut(usize) -> E>(_species: Species<E, N>, f: F) -> Self {
        Self::from_lanes(std::array::from_fn(f))
    }

    #[inline(always)]
    pub fn species(&self) -> Species<E, N> {
        Species::new()
    }

    #[inline(always)]
    pub const fn length(&self) -> usize {
        N
    }

    pub fn lane(&self, lane: usize) -> Result<E> {
        let lane = check_index(saturating_index(lane), N)?;
        Ok(self.lanes[lane])
    }

    /// Copy with one lane replaced.
    pub fn with_lane(&self, lane: usize, e: E) -> Result<Self> {
        let lane = check_index(saturating_index(lane), N)?;
        let mut lanes = self.lanes;
        lanes[lane] = e;
        Ok(Self::from_lanes(lanes))
    }

    #[inline(always)]
    pub fn to_array(&self) -> [E; N] {
        self.lanes
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[E; N] {
        &self.lanes
    }

    #[inline(always)]
    pub(crate) fn get(&self, lane: usize) -> E {
        self.lanes[lane]
    }

    #[inline(always)]
    pub(crate) fn map(&self, f: impl Fn(E) -> E) -> Self {
        Self::from_lanes(self.lanes.map(f))
    }

    #[inline(always)]
    pub(crate) fn zip_map(&self, other: &Self, f: impl Fn(E, E) -> E) -> Self {
        Self::from_lanes(std::array::from_fn(|i| f(self.lanes[i], other.lanes[i])))
    }

    /// Lanewise choice: `other[i]` where `mask` is set, `self[i]` elsewhere.
    pub fn blend(&self, other: &Self, mask: &Mask<E, N>) -> Self {
        let bits = mask.bits();
        Self::from_lanes(std::array::from_fn(|i| {
            if bits[i] {
                other.lanes[i]
            } else {
                self.lanes[i]
            }
        }))
    }

    pub fn blend_scalar(&self, e: E, mask: &Mask<E, N>) -> Self {
        self.blend(&self.species().broadcast(e), mask)
    }

    /// Lanes where `op(self[i], other[i])` holds.
    pub fn compare(&self, op: ComparisonOp, other: &Self) -> Result<Mask<E, N>> {
        op.check::<E>()?;
        Ok(self.compare_lanes(op, other))
    }

    pub fn compare_scalar(&self, op: ComparisonOp, e: E) -> Result<Mask<E, N>> {
        self.compare(op, &self.species().broadcast(e))
    }

    /// Like [`Vector::compare`], with unset lanes of `mask` reported false.
    pub fn compare_masked(
        &self,
        op: ComparisonOp,
        other: &Self,
        mask: &Mask<E, N>,
    ) -> Result<Mask<E, N>> {
        Ok(self.compare(op, other)?.and(mask))
    }

    #[inline(always)]
    pub(crate) fn compare_lanes(&self, op: ComparisonOp, other: &Self) -> Mask<E, N> {
        Mask::from_lanes(std::array::from_fn(|i| {
            E::compare(op, self.lanes[i], other.lanes[i])
        }))
    }

    /// Lanes satisfying the predicate `op`.
    pub fn test(&self, op: TestOp) -> Result<Mask<E, N>> {
        op.check::<E>()?;
        Ok(Mask::from_lanes(self.lanes.map(|e| E::test(op, e))))
    }

    pub fn test_masked(&self, op: TestOp, mask: &Mask<E, N>) -> Result<Mask<E, N>> {
        Ok(self.test(op)?.and(mask))
    }

    pub fn min(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| E::binary(BinaryOp::Min, a, b))
    }

    pub fn max(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| E::binary(BinaryOp::Max, a, b))
    }

    pub fn abs(&self) -> Self {
        self.map(|a| E::unary(UnaryOp::Abs, a))
    }

    /// Lanewise division; integral lanes fail on a zero divisor.
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Div, other)
    }
}

impl<E: Element, const N: usize> Add for Vector<E, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| E::binary(BinaryOp::Add, a, b))
    }
}

impl<E: Element, const N: usize> Sub for Vector<E, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| E::binary(BinaryOp::Sub, a, b))
    }
}

impl<E: Element, const N: usize> Mul for Vector<E, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| E::binary(BinaryOp::Mul, a, b))
    }
}

impl<E: Element, const N: usize> Neg for Vector<E, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| E::unary(UnaryOp::Neg, a))
    }
}
