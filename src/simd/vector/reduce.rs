use super::Vector;
use crate::{
    error::Result,
    simd::{element::Element, mask::Mask, ops::AssociativeOp},
};

impl<E: Element, const N: usize> Vector<E, N> {
    /// Folds all lanes with `op`.
    ///
    /// Lanes are combined from lane 0 upwards starting at the identity of
    /// `op`, so floating point results are reproducible.
    pub fn reduce_lanes(&self, op: AssociativeOp) -> Result<E> {
        op.check::<E>()?;
        let binary = op.binary_op();
        Ok(self
            .as_array()
            .iter()
            .fold(op.identity::<E>(), |acc, &e| E::binary(binary, acc, e)))
    }

    /// Folds the set lanes of `mask`; returns the identity of `op` when no
    /// lane is set.
    pub fn reduce_lanes_masked(&self, op: AssociativeOp, mask: &Mask<E, N>) -> Result<E> {
        op.check::<E>()?;
        let binary = op.binary_op();
        Ok(self
            .as_array()
            .iter()
            .zip(mask.bits())
            .filter(|(_, bit)| **bit)
            .fold(op.identity::<E>(), |acc, (&e, _)| E::binary(binary, acc, e)))
    }
}
