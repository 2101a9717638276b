//! Cross-lane operations.
//!
//! Everything here reduces to two primitives: gathering lanes by wrapped
//! shuffle position, and [`Vector::blend`]. Slice and unslice are iota
//! shuffles plus a lane-index mask.

use super::Vector;
use crate::{
    error::Result,
    simd::{
        element::Element,
        index::{check_index, saturating_index},
        mask::Mask,
        shuffle::Shuffle,
    },
};

impl<E: Element, const N: usize> Vector<E, N> {
    /// Lane `i` of the result is `self[position(shuffle[i])]`, ignoring
    /// validity.
    #[inline(always)]
    fn gather_lanes(&self, shuffle: &Shuffle<E, N>) -> Self {
        let sources = shuffle.sources();
        Self::from_lanes(std::array::from_fn(|i| self.get(sources[i].position())))
    }

    /// Permutes the lanes of `self`.
    ///
    /// Fails with `IndexOutOfRange` if any lane of `shuffle` is exceptional.
    pub fn rearrange(&self, shuffle: &Shuffle<E, N>) -> Result<Self> {
        let shuffle = shuffle.check_indexes()?;
        Ok(self.gather_lanes(&shuffle))
    }

    /// Permutes the lanes of `self`; lanes that are unset in `mask` or
    /// exceptional in `shuffle` become zero.
    pub fn rearrange_masked(&self, shuffle: &Shuffle<E, N>, mask: &Mask<E, N>) -> Self {
        let valid = shuffle.lane_is_valid().and(mask);
        self.species()
            .zero()
            .blend(&self.gather_lanes(shuffle), &valid)
    }

    /// Permutes the lanes of `self` and `other` as one table.
    ///
    /// Valid lanes of `shuffle` read from `self`, exceptional lanes read from
    /// `other` at their wrapped position.
    pub fn rearrange_with(&self, shuffle: &Shuffle<E, N>, other: &Self) -> Self {
        let valid = shuffle.lane_is_valid();
        let wrapped = shuffle.wrap_indexes();
        let r0 = self.gather_lanes(&wrapped);
        let r1 = other.gather_lanes(&wrapped);
        r1.blend(&r0, &valid)
    }

    /// Lane values as requested shuffle indexes.
    ///
    /// Integral lanes are truncated to `i32`; floating lanes saturate.
    pub fn to_shuffle(&self) -> Shuffle<E, N> {
        Shuffle::from_op(self.species(), |i| self.get(i).to_lane_index())
    }

    /// Gathers lanes of `v` using the lanes of `self` as indexes.
    pub fn select_from(&self, v: &Self) -> Result<Self> {
        v.rearrange(&self.to_shuffle())
    }

    /// Like [`Vector::select_from`]; unset or out-of-range lanes become zero.
    pub fn select_from_masked(&self, v: &Self, mask: &Mask<E, N>) -> Self {
        v.rearrange_masked(&self.to_shuffle(), mask)
    }

    /// Gathers from the `2N`-lane table `v1 ++ v2`, indexes taken modulo `2N`.
    pub fn select_from_pair(&self, v1: &Self, v2: &Self) -> Self {
        let table = 2 * N as i64;
        let shuffle = Shuffle::from_op(self.species(), |i| {
            (self.get(i).to_lane_index() as i64).rem_euclid(table) as i32
        });
        v1.rearrange_with(&shuffle, v2)
    }

    /// Packs the set lanes of `mask` into the low lanes, in order; the
    /// remaining lanes are zero.
    pub fn compress(&self, mask: &Mask<E, N>) -> Self {
        let mut lanes = [E::default(); N];
        let mut j = 0;
        for (i, &bit) in mask.bits().iter().enumerate() {
            if bit {
                lanes[j] = self.get(i);
                j += 1;
            }
        }
        Self::from_lanes(lanes)
    }

    /// Inverse of [`Vector::compress`]: the low lanes of `self` are spread, in
    /// order, over the set lanes of `mask`; unset lanes are zero.
    pub fn expand(&self, mask: &Mask<E, N>) -> Self {
        let mut lanes = [E::default(); N];
        let mut j = 0;
        for (i, &bit) in mask.bits().iter().enumerate() {
            if bit {
                lanes[i] = self.get(j);
                j += 1;
            }
        }
        Self::from_lanes(lanes)
    }

    /// Lanes `origin..N` of `self` followed by lanes `0..origin` of `v1`.
    ///
    /// `origin` must lie in `[0, N]`.
    pub fn slice(&self, origin: usize, v1: &Self) -> Result<Self> {
        let origin = check_index(saturating_index(origin), N + 1)?;
        let species = self.species();
        let from_self = species.index_in_range(origin, N);
        let iota = species.iota_shuffle(origin as i32, 1, true);
        Ok(v1.gather_lanes(&iota).blend(&self.gather_lanes(&iota), &from_self))
    }

    /// Shifts lanes down by `origin`, filling the top with zeros.
    pub fn slice_zero(&self, origin: usize) -> Result<Self> {
        self.slice(origin, &self.species().zero())
    }

    /// [`Vector::slice`] with unset lanes of `mask` zeroed.
    pub fn slice_masked(&self, origin: usize, v1: &Self, mask: &Mask<E, N>) -> Result<Self> {
        let slice = self.slice(origin, v1)?;
        Ok(self.species().zero().blend(&slice, mask))
    }

    /// Inverse of [`Vector::slice`]: writes `self` into `base` at `origin`.
    ///
    /// Part 0 places lanes `0..N - origin` of `self` at `origin..N`; part 1
    /// places lanes `N - origin..N` at `0..origin`. Other lanes come from
    /// `base`.
    pub fn unslice(&self, origin: usize, base: &Self, part: usize) -> Result<Self> {
        let origin = check_index(saturating_index(origin), N + 1)?;
        let part = check_index(saturating_index(part), 2)?;
        let species = self.species();
        let iota = species.iota_shuffle(-(origin as i32), 1, true);
        let placed = Mask::from_op(species, |i| (i >= origin) == (part == 0));
        Ok(base.blend(&self.gather_lanes(&iota), &placed))
    }

    /// Shifts lanes up by `origin`, filling the bottom with zeros.
    pub fn unslice_zero(&self, origin: usize) -> Result<Self> {
        self.unslice(origin, &self.species().zero(), 0)
    }

    /// [`Vector::unslice`] that only writes lanes whose moved `mask` bit is
    /// set.
    pub fn unslice_masked(
        &self,
        origin: usize,
        base: &Self,
        part: usize,
        mask: &Mask<E, N>,
    ) -> Result<Self> {
        let slice = base.slice(origin, base)?.blend(self, mask);
        slice.unslice(origin, base, part)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::VectorError,
        simd::{mask::Mask, shuffle::Shuffle, species::Species, vector::Vector},
    };

    const I32X4: Species<i32, 4> = Species::new();

    fn v(lanes: [i32; 4]) -> Vector<i32, 4> {
        Vector::from_lanes(lanes)
    }

    #[test]
    fn test_rearrange_forms() {
        let a = v([10, 20, 30, 40]);
        let b = v([50, 60, 70, 80]);
        let shuffle = Shuffle::from_values(I32X4, &[1, -5, 2, 0]).unwrap();

        assert_eq!(
            a.rearrange(&shuffle),
            Err(VectorError::IndexOutOfRange {
                index: -1,
                length: 4
            })
        );
        let all = I32X4.mask_all(true);
        assert_eq!(a.rearrange_masked(&shuffle, &all).to_array(), [20, 0, 30, 10]);
        assert_eq!(a.rearrange_with(&shuffle, &b).to_array(), [20, 80, 30, 10]);
        assert_eq!(
            a.rearrange(&shuffle.wrap_indexes()).unwrap().to_array(),
            [20, 40, 30, 10]
        );
    }

    #[test]
    fn test_select_from() {
        let indexes = v([3, 2, 1, 0]);
        let table = v([10, 20, 30, 40]);
        assert_eq!(indexes.select_from(&table).unwrap().to_array(), [40, 30, 20, 10]);
        assert!(v([0, 4, 1, 2]).select_from(&table).is_err());

        let mask = Mask::from_lanes([true, true, false, true]);
        assert_eq!(
            v([0, 4, 1, 2]).select_from_masked(&table, &mask).to_array(),
            [10, 0, 0, 30]
        );

        let high = v([50, 60, 70, 80]);
        assert_eq!(
            v([0, 5, 7, -1]).select_from_pair(&table, &high).to_array(),
            [10, 60, 80, 80]
        );

        let float_indexes = Vector::<f32, 4>::from_lanes([1.9, 0.0, 3.0, 2.2]);
        let float_table = Vector::from_lanes([0.5, 1.5, 2.5, 3.5]);
        assert_eq!(
            float_indexes.select_from(&float_table).unwrap().to_array(),
            [1.5, 0.5, 3.5, 2.5]
        );
    }

    #[test]
    fn test_compress_expand() {
        let source = v([10, 20, 30, 40]);
        let mask = Mask::from_lanes([true, false, true, false]);
        let packed = source.compress(&mask);
        assert_eq!(packed.to_array(), [10, 30, 0, 0]);
        assert_eq!(packed.expand(&mask).to_array(), [10, 0, 30, 0]);

        let all = I32X4.mask_all(true);
        assert_eq!(source.compress(&all), source);
        assert_eq!(source.expand(&all), source);
        assert_eq!(source.compress(&I32X4.mask_all(false)), I32X4.zero());
    }

    #[test]
    fn test_slice() {
        let a = v([1, 2, 3, 4]);
        let b = v([5, 6, 7, 8]);
        assert_eq!(a.slice(0, &b).unwrap(), a);
        assert_eq!(a.slice(1, &b).unwrap().to_array(), [2, 3, 4, 5]);
        assert_eq!(a.slice(3, &b).unwrap().to_array(), [4, 5, 6, 7]);
        assert_eq!(a.slice(4, &b).unwrap(), b);
        assert_eq!(a.slice_zero(2).unwrap().to_array(), [3, 4, 0, 0]);
        let mask = Mask::from_lanes([true, false, true, true]);
        assert_eq!(a.slice_masked(1, &b, &mask).unwrap().to_array(), [2, 0, 4, 5]);
        assert_eq!(
            a.slice(5, &b),
            Err(VectorError::IndexOutOfRange {
                index: 5,
                length: 5
            })
        );
    }

    #[test]
    fn test_unslice() {
        let a = v([1, 2, 3, 4]);
        let base = v([-1, -2, -3, -4]);
        assert_eq!(a.unslice(1, &base, 0).unwrap().to_array(), [-1, 1, 2, 3]);
        assert_eq!(a.unslice(1, &base, 1).unwrap().to_array(), [4, -2, -3, -4]);
        assert_eq!(a.unslice(0, &base, 0).unwrap(), a);
        assert_eq!(a.unslice(4, &base, 1).unwrap(), a);
        assert_eq!(a.unslice_zero(2).unwrap().to_array(), [0, 0, 1, 2]);
        assert!(a.unslice(5, &base, 0).is_err());
        assert!(a.unslice(1, &base, 2).is_err());
    }

    #[test]
    fn test_unslice_masked_uses_moved_mask() {
        let a = v([1, 2, 3, 4]);
        let base = v([-1, -2, -3, -4]);
        let mask = Mask::from_lanes([true, false, true, true]);
        assert_eq!(
            a.unslice_masked(1, &base, 0, &mask).unwrap().to_array(),
            [-1, 1, -3, 3]
        );
        assert_eq!(
            a.unslice_masked(1, &base, 1, &mask).unwrap().to_array(),
            [4, -2, -3, -4]
        );
    }

    #[test]
    fn test_slice_unslice_round_trip() {
        let a = v([1, 2, 3, 4]);
        let b = v([5, 6, 7, 8]);
        for origin in 0..=4 {
            let placed = a.unslice(origin, &b, 0).unwrap();
            let back = placed.slice(origin, &b).unwrap().to_array();
            assert_eq!(back[..4 - origin], a.to_array()[..4 - origin]);
        }
    }
}
