//! Lane shuffles.

use std::{any::TypeId, fmt, marker::PhantomData};

use crate::{
    error::{index_out_of_range, species_mismatch, Result},
    simd::{
        element::Element,
        index::{check_from_index_size, check_index, saturating_index, wrap_index, LaneSource},
        mask::Mask,
        species::Species,
        vector::Vector,
    },
};

/// For each destination lane, the lane of a source vector it is read from.
///
/// Requested indexes outside `[0, N)` are kept modulo `N` and marked
/// exceptional. Exceptional lanes make [`Vector::rearrange`] fail, are zeroed
/// by [`Vector::rearrange_masked`] and read from the second operand of
/// [`Vector::rearrange_with`].
///
/// ```rust
/// use simdly_vector::simd::{Shuffle, Species};
///
/// let species = Species::<i32, 4>::new();
/// let shuffle = Shuffle::from_values(species, &[1, -5, 2, 0]).unwrap();
/// assert_eq!(shuffle.to_array(), [1, -1, 2, 0]);
/// assert_eq!(shuffle.wrap_indexes().to_array(), [1, 3, 2, 0]);
/// ```
pub struct Shuffle<E: Element, const N: usize> {
    sources: [LaneSource; N],
    _element: PhantomData<E>,
}

impl<E: Element, const N: usize> Shuffle<E, N> {
    fn from_sources(sources: [LaneSource; N]) -> Self {
        let () = Species::<E, N>::VALID;
        let shuffle = Shuffle {
            sources,
            _element: PhantomData,
        };
        debug_assert!(shuffle.indices_in_range());
        shuffle
    }

    /// Builds a shuffle from `N` requested indexes.
    pub fn from_lanes(indexes: [i32; N]) -> Self {
        Self::from_sources(indexes.map(|index| LaneSource::encode(index as i64, N)))
    }

    /// Lane `i` requests index `f(i)`.
    pub fn from_op<F: FnMut(usize) -> i32>(_species: Species<E, N>, mut f: F) -> Self {
        Self::from_sources(std::array::from_fn(|i| LaneSource::encode(f(i) as i64, N)))
    }

    /// Reads `N` requested indexes starting at `offset`.
    pub fn from_array(_species: Species<E, N>, indexes: &[i32], offset: usize) -> Result<Self> {
        check_from_index_size(offset, N, indexes.len())?;
        Ok(Self::from_sources(std::array::from_fn(|i| {
            LaneSource::encode(indexes[offset + i] as i64, N)
        })))
    }

    pub fn from_values(species: Species<E, N>, indexes: &[i32]) -> Result<Self> {
        Self::from_array(species, indexes, 0)
    }

    /// Lane `i` requests `start + i * step`.
    ///
    /// With `wrap` every request is reduced modulo `N` and the shuffle is
    /// fully valid; otherwise out-of-range requests become exceptional.
    pub fn iota(_species: Species<E, N>, start: i32, step: i32, wrap: bool) -> Self {
        Self::from_sources(std::array::from_fn(|i| {
            let index = start as i64 + i as i64 * step as i64;
            if wrap {
                LaneSource::Valid(wrap_index(index, N) as u32)
            } else {
                LaneSource::encode(index, N)
            }
        }))
    }

    /// Interleaves two vectors when used with [`Vector::rearrange_with`].
    ///
    /// Part 0 yields `a0 b0 a1 b1 ...` over the low halves, part 1 the same
    /// over the high halves.
    pub fn make_zip(species: Species<E, N>, part: usize) -> Result<Self> {
        let part = check_index(saturating_index(part), 2)?;
        let offset = part * ((N + 1) >> 1);
        Ok(Self::from_op(species, |i| {
            ((i >> 1) + (i & 1) * N + offset) as i32
        }))
    }

    /// Undoes [`Shuffle::make_zip`] when used with [`Vector::rearrange_with`].
    ///
    /// Part 0 collects the even lanes of the concatenated pair, part 1 the odd
    /// ones.
    pub fn make_unzip(species: Species<E, N>, part: usize) -> Result<Self> {
        let part = check_index(saturating_index(part), 2)?;
        Ok(Self::from_op(species, |i| (2 * i + part) as i32))
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
    pub(crate) fn sources(&self) -> &[LaneSource; N] {
        &self.sources
    }

    fn indices_in_range(&self) -> bool {
        self.sources.iter().all(|source| source.position() < N)
    }

    /// Fails on the first exceptional lane.
    ///
    /// The error's index is that lane's packed code in `[-N, 0)`, not the
    /// index originally requested: a request of 6 with `N = 4` is stored as
    /// `-2` and reported as `-2`. Add `N` to recover the wrapped position.
    pub fn check_indexes(&self) -> Result<Self> {
        match self.sources.iter().find(|source| !source.is_valid()) {
            Some(source) => Err(index_out_of_range(source.code(N) as i64, N)),
            None => Ok(*self),
        }
    }

    /// Same positions with every lane marked valid.
    pub fn wrap_indexes(&self) -> Self {
        Self::from_sources(self.sources.map(LaneSource::wrap))
    }

    /// Lanes whose requested index was in range.
    pub fn lane_is_valid(&self) -> Mask<E, N> {
        Mask::from_lanes(self.sources.map(LaneSource::is_valid))
    }

    /// `index` reduced into `[0, N)`.
    pub fn wrap_index(&self, index: i64) -> usize {
        wrap_index(index, N)
    }

    pub fn check_index(&self, index: i64) -> Result<usize> {
        check_index(index, N)
    }

    /// Packed code of one lane.
    pub fn lane_source(&self, lane: usize) -> Result<i32> {
        Ok(self.lane_source_tagged(lane)?.code(N))
    }

    pub fn lane_source_tagged(&self, lane: usize) -> Result<LaneSource> {
        let lane = check_index(saturating_index(lane), N)?;
        Ok(self.sources[lane])
    }

    /// Packed codes, each in `[-N, N)`.
    pub fn to_array(&self) -> [i32; N] {
        self.sources.map(|source| source.code(N))
    }

    pub fn into_array(&self, out: &mut [i32], offset: usize) -> Result<()> {
        check_from_index_size(offset, N, out.len())?;
        for (slot, source) in out[offset..offset + N].iter_mut().zip(&self.sources) {
            *slot = source.code(N);
        }
        Ok(())
    }

    /// Packed codes as lane values.
    pub fn to_vector(&self) -> Vector<E, N> {
        Vector::from_lanes(self.sources.map(|source| E::from_lane_code(source.code(N))))
    }

    /// Composition: lane `i` of the result is lane `other[i]` of `self`.
    ///
    /// `other` must be fully valid; exceptional lanes of `self` stay
    /// exceptional.
    pub fn rearrange(&self, other: &Self) -> Result<Self> {
        let other = other.check_indexes()?;
        Ok(Self::from_sources(
            other.sources.map(|source| self.sources[source.position()]),
        ))
    }

    /// Same lane sources for another element type with the same lane count.
    pub fn cast<F: Element, const M: usize>(&self) -> Result<Shuffle<F, M>> {
        if M != N {
            return Err(species_mismatch(
                Species::<F, M>::new().to_string(),
                self.species().to_string(),
            ));
        }
        Ok(Shuffle::from_sources(std::array::from_fn(|i| {
            self.sources[i]
        })))
    }

    /// Returns the shuffle typed as `Shuffle<F, M>` if that is its own
    /// species.
    pub fn check<F: Element, const M: usize>(
        &self,
        species: Species<F, M>,
    ) -> Result<Shuffle<F, M>> {
        if TypeId::of::<E>() != TypeId::of::<F>() || M != N {
            return Err(species_mismatch(
                species.to_string(),
                self.species().to_string(),
            ));
        }
        self.cast()
    }
}

impl<E: Element, const N: usize> Clone for Shuffle<E, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Element, const N: usize> Copy for Shuffle<E, N> {}

impl<E: Element, const N: usize> PartialEq for Shuffle<E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.sources == other.sources
    }
}

impl<E: Element, const N: usize> Eq for Shuffle<E, N> {}

impl<E: Element, const N: usize> fmt::Debug for Shuffle<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffle")
            .field("species", &self.species())
            .field("codes", &self.to_array())
            .finish()
    }
}
