use super::Vector;
use crate::{
    error::{divide_by_zero, Result},
    simd::{
        element::{Element, ElementKind},
        mask::Mask,
        ops::{BinaryOp, TernaryOp, UnaryOp},
    },
};

impl<E: Element, const N: usize> Vector<E, N> {
    /// Applies `op` to every lane.
    pub fn lanewise_unary(&self, op: UnaryOp) -> Result<Self> {
        op.check::<E>()?;
        Ok(self.map(|a| E::unary(op, a)))
    }

    /// Applies `op` to the set lanes of `mask`; other lanes keep `self`.
    pub fn lanewise_unary_masked(&self, op: UnaryOp, mask: &Mask<E, N>) -> Result<Self> {
        Ok(self.blend(&self.lanewise_unary(op)?, mask))
    }

    /// Combines `self` and `other` lane by lane.
    ///
    /// Integral division fails with `DivideByZero` on the first zero divisor.
    pub fn lanewise(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        op.check::<E>()?;
        self.check_divisors(op, other, None)?;
        Ok(self.zip_map(other, |a, b| E::binary(op, a, b)))
    }

    /// Like [`Vector::lanewise`] on the set lanes of `mask`; other lanes keep
    /// `self`. Divisors of unset lanes are not inspected.
    pub fn lanewise_masked(&self, op: BinaryOp, other: &Self, mask: &Mask<E, N>) -> Result<Self> {
        op.check::<E>()?;
        self.check_divisors(op, other, Some(mask))?;
        let bits = mask.bits();
        Ok(Self::from_lanes(std::array::from_fn(|i| {
            if bits[i] {
                E::binary(op, self.get(i), other.get(i))
            } else {
                self.get(i)
            }
        })))
    }

    pub fn lanewise_scalar(&self, op: BinaryOp, e: E) -> Result<Self> {
        self.lanewise(op, &self.species().broadcast(e))
    }

    pub fn lanewise_scalar_masked(&self, op: BinaryOp, e: E, mask: &Mask<E, N>) -> Result<Self> {
        self.lanewise_masked(op, &self.species().broadcast(e), mask)
    }

    pub fn lanewise_ternary(&self, op: TernaryOp, b: &Self, c: &Self) -> Result<Self> {
        op.check::<E>()?;
        Ok(Self::from_lanes(std::array::from_fn(|i| {
            E::ternary(op, self.get(i), b.get(i), c.get(i))
        })))
    }

    pub fn lanewise_ternary_masked(
        &self,
        op: TernaryOp,
        b: &Self,
        c: &Self,
        mask: &Mask<E, N>,
    ) -> Result<Self> {
        Ok(self.blend(&self.lanewise_ternary(op, b, c)?, mask))
    }

    /// `self * b + c` with a single rounding.
    pub fn fma(&self, b: &Self, c: &Self) -> Result<Self> {
        self.lanewise_ternary(TernaryOp::Fma, b, c)
    }

    fn check_divisors(&self, op: BinaryOp, other: &Self, mask: Option<&Mask<E, N>>) -> Result<()> {
        if op != BinaryOp::Div || E::KIND != ElementKind::Integral {
            return Ok(());
        }
        let zero = (0..N).find(|&i| {
            mask.map_or(true, |mask| mask.get(i)) && other.get(i) == E::zero()
        });
        match zero {
            Some(lane) => Err(divide_by_zero(lane)),
            None => Ok(()),
        }
    }
}
