//! Lane masks.

use std::{
    any::TypeId,
    fmt,
    marker::PhantomData,
    ops::{BitAnd, BitOr, BitXor, Not},
};

use crate::{
    error::{index_out_of_range, species_mismatch, unsupported_reduction, Result},
    simd::{
        element::Element,
        index::{check_from_index_size, check_index, saturating_index},
        species::Species,
        vector::Vector,
    },
};

/// One boolean per lane of a `Species<E, N>`.
///
/// Masks select which lanes a masked operation computes; unset lanes keep a
/// fallback value instead.
pub struct Mask<E: Element, const N: usize> {
    bits: [bool; N],
    _element: PhantomData<E>,
}

impl<E: Element, const N: usize> Mask<E, N> {
    #[inline(always)]
    pub fn from_lanes(bits: [bool; N]) -> Self {
        let () = Species::<E, N>::VALID;
        Mask {
            bits,
            _element: PhantomData,
        }
    }

    /// Every lane set to `bit`.
    #[inline(always)]
    pub fn splat(_species: Species<E, N>, bit: bool) -> Self {
        Self::from_lanes([bit; N])
    }

    /// Lane `i` set to `f(i)`.
    pub fn from_op<F: FnMut(usize) -> bool>(_species: Species<E, N>, f: F) -> Self {
        Self::from_lanes(std::array::from_fn(f))
    }

    /// Loads `N` booleans starting at `offset`.
    pub fn from_array(_species: Species<E, N>, bits: &[bool], offset: usize) -> Result<Self> {
        check_from_index_size(offset, N, bits.len())?;
        Ok(Self::from_lanes(std::array::from_fn(|i| bits[offset + i])))
    }

    /// Loads the first `N` booleans of `bits`.
    pub fn from_values(species: Species<E, N>, bits: &[bool]) -> Result<Self> {
        Self::from_array(species, bits, 0)
    }

    /// Lane `i` set to bit `i` of `bits`; lanes past 64 are unset.
    pub fn from_long(_species: Species<E, N>, bits: u64) -> Self {
        Self::from_lanes(std::array::from_fn(|i| i < 64 && (bits >> i) & 1 == 1))
    }

    /// Lanes `i` with `offset + i < limit`.
    pub fn index_in_range_of(_species: Species<E, N>, offset: usize, limit: usize) -> Self {
        Self::from_lanes(std::array::from_fn(|i| {
            offset.checked_add(i).is_some_and(|index| index < limit)
        }))
    }

    #[inline(always)]
    pub fn species(&self) -> Species<E, N> {
        Species::new()
    }

    #[inline(always)]
    pub const fn length(&self) -> usize {
        N
    }

    #[inline(always)]
    pub(crate) fn bits(&self) -> &[bool; N] {
        &self.bits
    }

    #[inline(always)]
    pub fn to_array(&self) -> [bool; N] {
        self.bits
    }

    /// Stores the lanes into `out[offset..offset + N]`.
    pub fn into_array(&self, out: &mut [bool], offset: usize) -> Result<()> {
        check_from_index_size(offset, N, out.len())?;
        out[offset..offset + N].copy_from_slice(&self.bits);
        Ok(())
    }

    pub fn lane_is_set(&self, lane: usize) -> Result<bool> {
        let lane = check_index(saturating_index(lane), N)?;
        Ok(self.bits[lane])
    }

    /// Sets or clears one lane.
    pub fn with_lane(&self, lane: usize, bit: bool) -> Result<Self> {
        let lane = check_index(saturating_index(lane), N)?;
        let mut bits = self.bits;
        bits[lane] = bit;
        Ok(Self::from_lanes(bits))
    }

    /// Packs lane `i` into bit `i`.
    pub fn to_long(&self) -> Result<u64> {
        if N > 64 {
            return Err(unsupported_reduction(N, 64));
        }
        Ok(self
            .bits
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &bit)| acc | ((bit as u64) << i)))
    }

    pub fn any_true(&self) -> bool {
        self.bits.iter().any(|&bit| bit)
    }

    pub fn all_true(&self) -> bool {
        self.bits.iter().all(|&bit| bit)
    }

    pub fn true_count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    pub fn first_true(&self) -> Option<usize> {
        self.bits.iter().position(|&bit| bit)
    }

    pub fn last_true(&self) -> Option<usize> {
        self.bits.iter().rposition(|&bit| bit)
    }

    #[inline(always)]
    fn zip_with(&self, other: &Self, f: impl Fn(bool, bool) -> bool) -> Self {
        Self::from_lanes(std::array::from_fn(|i| f(self.bits[i], other.bits[i])))
    }

    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn or(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    pub fn xor(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Lanes set in `self` but not in `other`.
    pub fn and_not(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Lanes where both masks agree.
    pub fn eq_lanes(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a == b)
    }

    pub fn not(&self) -> Self {
        Self::from_lanes(self.bits.map(|bit| !bit))
    }

    /// Clears lanes `i` with `offset + i >= limit`.
    pub fn index_in_range(&self, offset: usize, limit: usize) -> Self {
        self.and(&Self::index_in_range_of(self.species(), offset, limit))
    }

    /// Mask with the first `true_count()` lanes set.
    pub fn compress(&self) -> Self {
        let count = self.true_count();
        Self::from_lanes(std::array::from_fn(|i| i < count))
    }

    /// Set lanes become `-1`, unset lanes `0`.
    pub fn to_vector(&self) -> Vector<E, N> {
        let set = E::from_i64_wrapping(-1);
        let unset = E::default();
        Vector::from_lanes(self.bits.map(|bit| if bit { set } else { unset }))
    }

    /// Same lanes, reinterpreted for another element type.
    pub fn cast<F: Element, const M: usize>(&self) -> Result<Mask<F, M>> {
        if M != N {
            return Err(species_mismatch(
                Species::<F, M>::new().to_string(),
                self.species().to_string(),
            ));
        }
        Ok(Mask::from_lanes(std::array::from_fn(|i| self.bits[i])))
    }

    /// Returns the mask typed as `Mask<F, M>` if that is its own species.
    pub fn check<F: Element, const M: usize>(&self, species: Species<F, M>) -> Result<Mask<F, M>> {
        if TypeId::of::<E>() != TypeId::of::<F>() || M != N {
            return Err(species_mismatch(
                species.to_string(),
                self.species().to_string(),
            ));
        }
        self.cast()
    }

    /// Lane bit with bounds checking deferred to the caller.
    #[inline(always)]
    pub(crate) fn get(&self, lane: usize) -> bool {
        debug_assert!(lane < N, "{}", index_out_of_range(lane as i64, N));
        self.bits[lane]
    }
}

impl<E: Element, const N: usize> Clone for Mask<E, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Element, const N: usize> Copy for Mask<E, N> {}

impl<E: Element, const N: usize> PartialEq for Mask<E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<E: Element, const N: usize> Eq for Mask<E, N> {}

impl<E: Element, const N: usize> fmt::Debug for Mask<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("species", &self.species())
            .field("bits", &self.bits)
            .finish()
    }
}

impl<E: Element, const N: usize> BitAnd for Mask<E, N> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Mask::and(&self, &rhs)
    }
}

impl<E: Element, const N: usize> BitOr for Mask<E, N> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Mask::or(&self, &rhs)
    }
}

impl<E: Element, const N: usize> BitXor for Mask<E, N> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Mask::xor(&self, &rhs)
    }
}

impl<E: Element, const N: usize> Not for Mask<E, N> {
    type Output = Self;

    fn not(self) -> Self {
        Mask::not(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VectorError;

    const I32X4: Species<i32, 4> = Species::new();

    #[test]
    fn test_counts_and_positions() {
        let mask = Mask::<i32, 4>::from_lanes([false, true, false, true]);
        assert_eq!(mask.true_count(), 2);
        assert_eq!(mask.first_true(), Some(1));
        assert_eq!(mask.last_true(), Some(3));
        assert!(mask.any_true());
        assert!(!mask.all_true());

        let none = I32X4.mask_all(false);
        assert_eq!(none.first_true(), None);
        assert_eq!(none.last_true(), None);
        assert!(I32X4.mask_all(true).all_true());
    }

    #[test]
    fn test_long_round_trip() {
        let mask = Mask::from_long(I32X4, 0b1011);
        assert_eq!(mask.to_array(), [true, true, false, true]);
        assert_eq!(mask.to_long(), Ok(0b1011));
        assert_eq!(Mask::from_long(I32X4, u64::MAX).to_long(), Ok(0b1111));
    }

    #[test]
    #[allow(arithmetic_overflow)]
    fn test_to_long_rejects_wide_masks() {
        // Byte lanes across the widest shape: more than 64 of them unless the
        // build caps the width at 512 bits or less.
        const LANES: usize = crate::config::MAX_VECTOR_BITS / 8;
        let mask = Species::<i8, LANES>::new().mask_all(true);
        if LANES > 64 {
            assert_eq!(
                mask.to_long(),
                Err(VectorError::UnsupportedReduction {
                    lanes: LANES,
                    bits: 64
                })
            );
        } else {
            assert_eq!(mask.to_long(), Ok(u64::MAX >> (64 - LANES)));
        }
    }

    #[test]
    fn test_logical_operators() {
        let a = Mask::<i32, 4>::from_lanes([true, true, false, false]);
        let b = Mask::from_lanes([true, false, true, false]);
        assert_eq!((a & b).to_array(), [true, false, false, false]);
        assert_eq!((a | b).to_array(), [true, true, true, false]);
        assert_eq!((a ^ b).to_array(), [false, true, true, false]);
        assert_eq!(a.and_not(&b).to_array(), [false, true, false, false]);
        assert_eq!(a.eq_lanes(&b).to_array(), [true, false, false, true]);
        assert_eq!((!a).to_array(), [false, false, true, true]);
    }

    #[test]
    fn test_index_in_range() {
        let mask = I32X4.index_in_range(6, 8);
        assert_eq!(mask.to_array(), [true, true, false, false]);
        let mask = I32X4.mask_all(true).index_in_range(usize::MAX - 1, usize::MAX);
        assert_eq!(mask.to_array(), [true, false, false, false]);
    }

    #[test]
    fn test_array_access_is_checked() {
        let bits = [true, false, true, true, false];
        let mask = Mask::from_array(I32X4, &bits, 1).unwrap();
        assert_eq!(mask.to_array(), [false, true, true, false]);
        assert!(Mask::from_array(I32X4, &bits, 2).is_err());
        assert_eq!(mask.lane_is_set(1), Ok(true));
        assert!(mask.lane_is_set(4).is_err());

        let mut out = [false; 6];
        mask.into_array(&mut out, 2).unwrap();
        assert_eq!(out, [false, false, false, true, true, false]);
        assert!(mask.into_array(&mut out, 3).is_err());
    }

    #[test]
    fn test_compress_and_to_vector() {
        let mask = Mask::<i32, 4>::from_lanes([false, true, false, true]);
        assert_eq!(mask.compress().to_array(), [true, true, false, false]);
        assert_eq!(mask.to_vector().to_array(), [0, -1, 0, -1]);

        let mask = Mask::<f64, 2>::from_lanes([true, false]);
        assert_eq!(mask.to_vector().to_array(), [-1.0, 0.0]);
    }

    #[test]
    fn test_cast_and_check() {
        let mask = Mask::<i32, 4>::from_lanes([true, false, false, true]);
        let cast: Mask<f32, 4> = mask.cast().unwrap();
        assert_eq!(cast.to_array(), mask.to_array());
        assert!(mask.cast::<i64, 2>().is_err());
        assert!(mask.check(I32X4).is_ok());
        assert!(mask.check(Species::<f32, 4>::new()).is_err());
    }
}
