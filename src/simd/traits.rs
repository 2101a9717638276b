//! Bulk operations over slices.
//!
//! Each trait comes in three flavours, mirroring how the kernels are picked
//! by input size:
//!
//! - `scalar_*`: a plain element loop, the reference result
//! - `simd_*`: full vectors of the given species plus one masked tail vector
//! - `par_simd_*`: the `simd_*` kernel run on fixed-size chunks with rayon
//!
//! The `simd_*` methods fall back to the scalar loop below
//! [`SIMD_THRESHOLD`](crate::SIMD_THRESHOLD) elements, and the `par_simd_*`
//! methods to the single-threaded kernel up to
//! [`PARALLEL_SIMD_THRESHOLD`](crate::PARALLEL_SIMD_THRESHOLD).

use crate::simd::{
    element::Element,
    ops::{AssociativeOp, BinaryOp, ComparisonOp},
    species::Species,
};

/// Element-wise binary operators over two slices of equal length.
///
/// All variants fail with `LengthMismatch` when the lengths differ, with
/// `UnsupportedOperation` when `op` is not defined for `E`, and with
/// `DivideByZero` (carrying the element index) on an integral zero divisor.
///
/// ```rust
/// use simdly_vector::simd::{BinaryOp, SimdLanewise, Species};
///
/// let a: Vec<i32> = (0..100).collect();
/// let b = vec![2; 100];
/// let c = a.as_slice()
///     .simd_lanewise(Species::<i32, 8>::new(), BinaryOp::Mul, b.as_slice())
///     .unwrap();
/// assert_eq!(c[99], 198);
/// ```
pub trait SimdLanewise<E: Element, Rhs = Self> {
    type Output;

    fn simd_lanewise<const N: usize>(
        self,
        species: Species<E, N>,
        op: BinaryOp,
        rhs: Rhs,
    ) -> Self::Output;
    fn par_simd_lanewise<const N: usize>(
        self,
        species: Species<E, N>,
        op: BinaryOp,
        rhs: Rhs,
    ) -> Self::Output;
    fn scalar_lanewise(self, op: BinaryOp, rhs: Rhs) -> Self::Output;
}

/// Folds a slice with an associative operator.
///
/// The vector kernels reduce each vector on its own and fold the partial
/// results from left to right; the parallel kernel folds chunk results in
/// chunk order. Integral results are therefore identical across variants;
/// floating point sums may differ in the last bits.
pub trait SimdReduce<E: Element> {
    type Output;

    fn simd_reduce<const N: usize>(self, species: Species<E, N>, op: AssociativeOp) -> Self::Output;
    fn par_simd_reduce<const N: usize>(
        self,
        species: Species<E, N>,
        op: AssociativeOp,
    ) -> Self::Output;
    fn scalar_reduce(self, op: AssociativeOp) -> Self::Output;
}

/// Keeps the elements `x` with `op(x, threshold)`, in order.
pub trait SimdFilter<E: Element> {
    type Output;

    fn simd_filter<const N: usize>(
        self,
        species: Species<E, N>,
        op: ComparisonOp,
        threshold: E,
    ) -> Self::Output;
    fn scalar_filter(self, op: ComparisonOp, threshold: E) -> Self::Output;
}
