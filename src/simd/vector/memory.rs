//! Loads and stores.
//!
//! Unmasked accesses check the whole `N`-lane window up front. Masked
//! accesses take the same path when the window fits; otherwise only the set
//! lanes are checked, and unset lanes may point anywhere. Every check happens
//! before the first element is read or written.

use ndarray::{ArrayView1, ArrayViewMut1};

use super::Vector;
use crate::{
    error::{index_out_of_range, Result},
    simd::{
        element::Element,
        index::{check_from_index_size, saturating_index},
        mask::Mask,
        species::Species,
    },
};

/// Byte order of lanes in a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the target.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }
}

#[inline]
fn window_fits(offset: usize, size: usize, length: usize) -> bool {
    offset.checked_add(size).is_some_and(|end| end <= length)
}

/// Checks `offset + i` for every set lane.
fn check_masked_lanes<E: Element, const N: usize>(
    offset: usize,
    length: usize,
    mask: &Mask<E, N>,
) -> Result<()> {
    for (i, &bit) in mask.bits().iter().enumerate() {
        if bit && !window_fits(offset, i + 1, length) {
            return Err(index_out_of_range(saturating_index(offset.saturating_add(i)), length));
        }
    }
    Ok(())
}

/// Byte-granular [`check_masked_lanes`]; a failing lane is reported by the
/// byte offset it starts at.
fn check_masked_byte_lanes<E: Element, const N: usize>(
    offset: usize,
    length: usize,
    mask: &Mask<E, N>,
) -> Result<()> {
    if window_fits(offset, N * E::BYTES, length) {
        return Ok(());
    }
    for (i, &bit) in mask.bits().iter().enumerate() {
        if bit && !window_fits(offset, (i + 1) * E::BYTES, length) {
            let start = offset.saturating_add(i * E::BYTES);
            return Err(index_out_of_range(saturating_index(start), length));
        }
    }
    Ok(())
}

/// Resolves `offset + map[map_offset + i]` for every lane, or every set lane
/// when a mask is given.
fn gather_indexes<E: Element, const N: usize>(
    offset: usize,
    length: usize,
    map: &[i32],
    map_offset: usize,
    mask: Option<&Mask<E, N>>,
) -> Result<[usize; N]> {
    check_from_index_size(map_offset, N, map.len())?;
    let mut indexes = [0usize; N];
    for (i, slot) in indexes.iter_mut().enumerate() {
        if mask.is_some_and(|mask| !mask.get(i)) {
            continue;
        }
        let index = offset as i128 + map[map_offset + i] as i128;
        if index < 0 || index >= length as i128 {
            let reported = i64::try_from(index).unwrap_or(i64::MAX);
            return Err(index_out_of_range(reported, length));
        }
        *slot = index as usize;
    }
    Ok(indexes)
}

#[inline]
fn read_lane<E: Element>(bytes: &[u8], order: ByteOrder) -> E {
    let bits = bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);
    let e = E::from_raw_bits(bits);
    match order {
        ByteOrder::LittleEndian => e,
        ByteOrder::BigEndian => e.swap_bytes(),
    }
}

#[inline]
fn write_lane<E: Element>(e: E, bytes: &mut [u8], order: ByteOrder) {
    let e = match order {
        ByteOrder::LittleEndian => e,
        ByteOrder::BigEndian => e.swap_bytes(),
    };
    let bits = e.to_raw_bits();
    for (k, byte) in bytes.iter_mut().enumerate() {
        *byte = (bits >> (8 * k)) as u8;
    }
}

impl<E: Element, const N: usize> Vector<E, N> {
    /// Loads `array[offset..offset + N]`.
    pub fn from_array(species: Species<E, N>, array: &[E], offset: usize) -> Result<Self> {
        check_from_index_size(offset, N, array.len())?;
        Ok(Self::from_generator(species, |i| array[offset + i]))
    }

    /// Loads the first `N` elements of `array`.
    pub fn from_values(species: Species<E, N>, array: &[E]) -> Result<Self> {
        Self::from_array(species, array, 0)
    }

    /// Loads the set lanes of `mask`; unset lanes are zero and are not read.
    pub fn from_array_masked(
        species: Species<E, N>,
        array: &[E],
        offset: usize,
        mask: &Mask<E, N>,
    ) -> Result<Self> {
        if window_fits(offset, N, array.len()) {
            let loaded = Self::from_array(species, array, offset)?;
            return Ok(species.zero().blend(&loaded, mask));
        }
        check_masked_lanes(offset, array.len(), mask)?;
        Ok(Self::from_generator(species, |i| {
            if mask.get(i) {
                array[offset + i]
            } else {
                E::default()
            }
        }))
    }

    /// Stores into `array[offset..offset + N]`.
    pub fn into_array(&self, array: &mut [E], offset: usize) -> Result<()> {
        check_from_index_size(offset, N, array.len())?;
        array[offset..offset + N].copy_from_slice(self.as_array());
        Ok(())
    }

    /// Stores the set lanes of `mask`; other elements are left untouched.
    pub fn into_array_masked(
        &self,
        array: &mut [E],
        offset: usize,
        mask: &Mask<E, N>,
    ) -> Result<()> {
        if !window_fits(offset, N, array.len()) {
            check_masked_lanes(offset, array.len(), mask)?;
        }
        for (i, &bit) in mask.bits().iter().enumerate() {
            if bit {
                array[offset + i] = self.get(i);
            }
        }
        Ok(())
    }

    /// Lane `i` loaded from `array[offset + map[map_offset + i]]`.
    pub fn from_array_gather(
        species: Species<E, N>,
        array: &[E],
        offset: usize,
        map: &[i32],
        map_offset: usize,
    ) -> Result<Self> {
        let indexes = gather_indexes::<E, N>(offset, array.len(), map, map_offset, None)?;
        Ok(Self::from_generator(species, |i| array[indexes[i]]))
    }

    /// Gathers the set lanes of `mask`; unset lanes are zero.
    ///
    /// The index map window must always fit; only set lanes are required to
    /// address the array.
    pub fn from_array_gather_masked(
        species: Species<E, N>,
        array: &[E],
        offset: usize,
        map: &[i32],
        map_offset: usize,
        mask: &Mask<E, N>,
    ) -> Result<Self> {
        let indexes = gather_indexes(offset, array.len(), map, map_offset, Some(mask))?;
        Ok(Self::from_generator(species, |i| {
            if mask.get(i) {
                array[indexes[i]]
            } else {
                E::default()
            }
        }))
    }

    /// Lane `i` stored to `array[offset + map[map_offset + i]]`, in lane
    /// order, so later lanes win on repeated indexes.
    pub fn into_array_scatter(
        &self,
        array: &mut [E],
        offset: usize,
        map: &[i32],
        map_offset: usize,
    ) -> Result<()> {
        let indexes = gather_indexes::<E, N>(offset, array.len(), map, map_offset, None)?;
        for (i, &index) in indexes.iter().enumerate() {
            array[index] = self.get(i);
        }
        Ok(())
    }

    pub fn into_array_scatter_masked(
        &self,
        array: &mut [E],
        offset: usize,
        map: &[i32],
        map_offset: usize,
        mask: &Mask<E, N>,
    ) -> Result<()> {
        let indexes = gather_indexes(offset, array.len(), map, map_offset, Some(mask))?;
        for (i, &index) in indexes.iter().enumerate() {
            if mask.get(i) {
                array[index] = self.get(i);
            }
        }
        Ok(())
    }

    /// Loads `N * E::BYTES` bytes starting at byte `offset`.
    pub fn from_byte_array(
        species: Species<E, N>,
        bytes: &[u8],
        offset: usize,
        order: ByteOrder,
    ) -> Result<Self> {
        check_from_index_size(offset, N * E::BYTES, bytes.len())?;
        Ok(Self::from_generator(species, |i| {
            let start = offset + i * E::BYTES;
            read_lane(&bytes[start..start + E::BYTES], order)
        }))
    }

    /// Byte loads of the set lanes of `mask`; unset lanes are zero.
    ///
    /// A failing lane is reported by the byte offset it starts at.
    pub fn from_byte_array_masked(
        species: Species<E, N>,
        bytes: &[u8],
        offset: usize,
        order: ByteOrder,
        mask: &Mask<E, N>,
    ) -> Result<Self> {
        check_masked_byte_lanes(offset, bytes.len(), mask)?;
        Ok(Self::from_generator(species, |i| {
            if mask.get(i) {
                let start = offset + i * E::BYTES;
                read_lane(&bytes[start..start + E::BYTES], order)
            } else {
                E::default()
            }
        }))
    }

    pub fn into_byte_array(&self, bytes: &mut [u8], offset: usize, order: ByteOrder) -> Result<()> {
        check_from_index_size(offset, N * E::BYTES, bytes.len())?;
        for (i, chunk) in bytes[offset..offset + N * E::BYTES]
            .chunks_exact_mut(E::BYTES)
            .enumerate()
        {
            write_lane(self.get(i), chunk, order);
        }
        Ok(())
    }

    pub fn into_byte_array_masked(
        &self,
        bytes: &mut [u8],
        offset: usize,
        order: ByteOrder,
        mask: &Mask<E, N>,
    ) -> Result<()> {
        check_masked_byte_lanes(offset, bytes.len(), mask)?;
        for (i, &bit) in mask.bits().iter().enumerate() {
            if bit {
                let start = offset + i * E::BYTES;
                write_lane(self.get(i), &mut bytes[start..start + E::BYTES], order);
            }
        }
        Ok(())
    }

    /// Loads `view[offset..offset + N]`; the view need not be contiguous.
    pub fn from_array_view(
        species: Species<E, N>,
        view: ArrayView1<'_, E>,
        offset: usize,
    ) -> Result<Self> {
        check_from_index_size(offset, N, view.len())?;
        if let Some(slice) = view.as_slice() {
            return Self::from_array(species, slice, offset);
        }
        Ok(Self::from_generator(species, |i| view[offset + i]))
    }

    pub fn into_array_view_mut(&self, mut view: ArrayViewMut1<'_, E>, offset: usize) -> Result<()> {
        check_from_index_size(offset, N, view.len())?;
        if let Some(slice) = view.as_slice_mut() {
            return self.into_array(slice, offset);
        }
        for i in 0..N {
            view[offset + i] = self.get(i);
        }
        Ok(())
    }
}
