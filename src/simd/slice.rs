//! Slice implementations of the bulk traits.
//!
//! Every kernel walks its input in steps of one vector. The last, partial
//! vector is handled with a mask from [`Species::index_in_range`], so no
//! element past the end of the slice is read or written. The parallel kernels
//! split the output into chunks of a multiple of the lane count and run the
//! single-threaded kernel on each chunk.

use rayon::prelude::*;

use crate::{
    error::{divide_by_zero, length_mismatch, Result, VectorError},
    simd::{
        element::{Element, ElementKind},
        ops::{AssociativeOp, BinaryOp, ComparisonOp},
        species::Species,
        traits::{SimdFilter, SimdLanewise, SimdReduce},
        vector::Vector,
    },
    PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD, SIMD_THRESHOLD,
};

// ================================================================================================
// HELPER FUNCTIONS
// ================================================================================================

#[inline(always)]
fn check_lengths<E>(a: &[E], b: &[E]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(length_mismatch(a.len(), b.len()))
    }
}

/// Chunk length for the parallel kernels: a multiple of the lane count.
#[inline(always)]
fn parallel_chunk_size(step: usize) -> usize {
    ((PARALLEL_CHUNK_SIZE / step) * step).max(step)
}

/// Turns a lane-relative division error into an element index.
fn shift_lane(error: VectorError, base: usize) -> VectorError {
    match error {
        VectorError::DivideByZero { lane } => divide_by_zero(base + lane),
        other => other,
    }
}

/// Writes `op(a[i], b[i])` into `out[i]`; `base` is the position of `out[0]`
/// in the full output.
fn lanewise_into<E: Element, const N: usize>(
    species: Species<E, N>,
    op: BinaryOp,
    a: &[E],
    b: &[E],
    out: &mut [E],
    base: usize,
) -> Result<()> {
    let size = out.len();
    let complete_lanes = species.loop_bound(size);

    for i in (0..complete_lanes).step_by(N) {
        let va = Vector::from_array(species, a, i)?;
        let vb = Vector::from_array(species, b, i)?;
        va.lanewise(op, &vb)
            .map_err(|e| shift_lane(e, base + i))?
            .into_array(out, i)?;
    }

    if complete_lanes < size {
        let mask = species.index_in_range(complete_lanes, size);
        let va = Vector::from_array_masked(species, a, complete_lanes, &mask)?;
        let vb = Vector::from_array_masked(species, b, complete_lanes, &mask)?;
        va.lanewise_masked(op, &vb, &mask)
            .map_err(|e| shift_lane(e, base + complete_lanes))?
            .into_array_masked(out, complete_lanes, &mask)?;
    }

    Ok(())
}

/// Folds `a` vector by vector, starting from the identity of `op`.
fn reduce_chunk<E: Element, const N: usize>(
    species: Species<E, N>,
    op: AssociativeOp,
    a: &[E],
) -> Result<E> {
    let size = a.len();
    let complete_lanes = species.loop_bound(size);
    let binary = op.binary_op();
    let mut acc = op.identity::<E>();

    for i in (0..complete_lanes).step_by(N) {
        let partial = Vector::from_array(species, a, i)?.reduce_lanes(op)?;
        acc = E::binary(binary, acc, partial);
    }

    if complete_lanes < size {
        let mask = species.index_in_range(complete_lanes, size);
        let tail = Vector::from_array_masked(species, a, complete_lanes, &mask)?;
        acc = E::binary(binary, acc, tail.reduce_lanes_masked(op, &mask)?);
    }

    Ok(acc)
}

// ================================================================================================
// LANEWISE
// ================================================================================================

impl<E: Element> SimdLanewise<E> for &[E] {
    type Output = Result<Vec<E>>;

    fn simd_lanewise<const N: usize>(
        self,
        species: Species<E, N>,
        op: BinaryOp,
        rhs: Self,
    ) -> Self::Output {
        check_lengths(self, rhs)?;
        if self.len() < SIMD_THRESHOLD {
            log::trace!("lanewise {}: {} elements, scalar path", op.name(), self.len());
            return self.scalar_lanewise(op, rhs);
        }
        op.check::<E>()?;

        let mut c = vec![E::default(); self.len()];
        lanewise_into(species, op, self, rhs, &mut c, 0)?;
        Ok(c)
    }

    fn par_simd_lanewise<const N: usize>(
        self,
        species: Species<E, N>,
        op: BinaryOp,
        rhs: Self,
    ) -> Self::Output {
        check_lengths(self, rhs)?;
        if self.len() <= PARALLEL_SIMD_THRESHOLD {
            log::trace!("lanewise {}: {} elements, simd path", op.name(), self.len());
            return self.simd_lanewise(species, op, rhs);
        }
        op.check::<E>()?;

        let chunk_size = parallel_chunk_size(N);
        log::trace!(
            "lanewise {}: {} elements, parallel path ({} per chunk)",
            op.name(),
            self.len(),
            chunk_size
        );

        let mut c = vec![E::default(); self.len()];
        let results: Vec<Result<()>> = c
            .par_chunks_mut(chunk_size)
            .enumerate()
            .map(|(chunk_idx, c_chunk)| {
                let start_idx = chunk_idx * chunk_size;
                let end_idx = start_idx + c_chunk.len();
                lanewise_into(
                    species,
                    op,
                    &self[start_idx..end_idx],
                    &rhs[start_idx..end_idx],
                    c_chunk,
                    start_idx,
                )
            })
            .collect();

        // Report the error of the lowest chunk, as the sequential kernel would.
        results.into_iter().collect::<Result<()>>()?;
        Ok(c)
    }

    fn scalar_lanewise(self, op: BinaryOp, rhs: Self) -> Self::Output {
        check_lengths(self, rhs)?;
        op.check::<E>()?;
        let checks_divisor = op == BinaryOp::Div && E::KIND == ElementKind::Integral;

        self.iter()
            .zip(rhs.iter())
            .enumerate()
            .map(|(i, (&x, &y))| {
                if checks_divisor && y == E::zero() {
                    Err(divide_by_zero(i))
                } else {
                    Ok(E::binary(op, x, y))
                }
            })
            .collect()
    }
}

// ================================================================================================
// REDUCTION
// ================================================================================================

impl<E: Element> SimdReduce<E> for &[E] {
    type Output = Result<E>;

    fn simd_reduce<const N: usize>(
        self,
        species: Species<E, N>,
        op: AssociativeOp,
    ) -> Self::Output {
        if self.len() < SIMD_THRESHOLD {
            log::trace!("reduce {}: {} elements, scalar path", op.name(), self.len());
            return self.scalar_reduce(op);
        }
        op.check::<E>()?;
        reduce_chunk(species, op, self)
    }

    fn par_simd_reduce<const N: usize>(
        self,
        species: Species<E, N>,
        op: AssociativeOp,
    ) -> Self::Output {
        if self.len() <= PARALLEL_SIMD_THRESHOLD {
            log::trace!("reduce {}: {} elements, simd path", op.name(), self.len());
            return self.simd_reduce(species, op);
        }
        op.check::<E>()?;

        let chunk_size = parallel_chunk_size(N);
        log::trace!(
            "reduce {}: {} elements, parallel path ({} per chunk)",
            op.name(),
            self.len(),
            chunk_size
        );

        // Chunk partials come back in chunk order and are folded left to right.
        let partials: Vec<Result<E>> = self
            .par_chunks(chunk_size)
            .map(|chunk| reduce_chunk(species, op, chunk))
            .collect();

        let binary = op.binary_op();
        partials
            .into_iter()
            .try_fold(op.identity::<E>(), |acc, partial| {
                Ok(E::binary(binary, acc, partial?))
            })
    }

    fn scalar_reduce(self, op: AssociativeOp) -> Self::Output {
        op.check::<E>()?;
        let binary = op.binary_op();
        Ok(self
            .iter()
            .fold(op.identity::<E>(), |acc, &x| E::binary(binary, acc, x)))
    }
}

// ================================================================================================
// FILTER
// ================================================================================================

impl<E: Element> SimdFilter<E> for &[E] {
    type Output = Result<Vec<E>>;

    fn simd_filter<const N: usize>(
        self,
        species: Species<E, N>,
        op: ComparisonOp,
        threshold: E,
    ) -> Self::Output {
        if self.len() < SIMD_THRESHOLD {
            log::trace!("filter {}: {} elements, scalar path", op.name(), self.len());
            return self.scalar_filter(op, threshold);
        }

        let size = self.len();
        let complete_lanes = species.loop_bound(size);
        let bound = species.broadcast(threshold);
        let mut kept = Vec::with_capacity(size);

        for i in (0..complete_lanes).step_by(N) {
            let v = Vector::from_array(species, self, i)?;
            let mask = v.compare(op, &bound)?;
            let packed = v.compress(&mask);
            kept.extend_from_slice(&packed.as_array()[..mask.true_count()]);
        }

        if complete_lanes < size {
            let in_range = species.index_in_range(complete_lanes, size);
            let v = Vector::from_array_masked(species, self, complete_lanes, &in_range)?;
            let mask = v.compare_masked(op, &bound, &in_range)?;
            let packed = v.compress(&mask);
            kept.extend_from_slice(&packed.as_array()[..mask.true_count()]);
        }

        Ok(kept)
    }

    fn scalar_filter(self, op: ComparisonOp, threshold: E) -> Self::Output {
        op.check::<E>()?;
        Ok(self
            .iter()
            .copied()
            .filter(|&x| E::compare(op, x, threshold))
            .collect())
    }
}
