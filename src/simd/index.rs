//! Lane index encoding.
//!
//! Shuffles store one source per destination lane. A requested index that is
//! already in `[0, N)` is a valid source; any other index is reduced modulo
//! `N` and remembered as exceptional. Packed into an `i32` the two cases are
//! told apart by sign: valid sources keep their index, exceptional ones are
//! stored as `wrapped - N`.

use crate::error::{index_out_of_range, Result};

/// How [`check_index0`] treats an index outside `[0, lane_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// Reduce modulo the lane count into `[0, lane_count)`.
    Wrap,
    /// Reject with `IndexOutOfRange`.
    Check,
    /// Reduce modulo the lane count and subtract the lane count when the
    /// index changed, so the result is negative exactly for exceptional
    /// indexes.
    PartialWrap,
}

/// Applies `mode` to `index` for a vector of `lane_count` lanes.
///
/// Every other normalization in this module goes through here.
pub fn check_index0(index: i64, lane_count: usize, mode: IndexMode) -> Result<i64> {
    debug_assert!(lane_count > 0);
    let n = lane_count as i64;
    let wrapped = index.rem_euclid(n);
    if wrapped == index {
        return Ok(index);
    }
    match mode {
        IndexMode::Wrap => Ok(wrapped),
        IndexMode::Check => Err(index_out_of_range(index, lane_count)),
        IndexMode::PartialWrap => Ok(wrapped - n),
    }
}

#[inline]
fn wrapping_mode(index: i64, lane_count: usize, mode: IndexMode) -> i64 {
    match check_index0(index, lane_count, mode) {
        Ok(index) => index,
        Err(_) => unreachable!("{mode:?} never rejects an index"),
    }
}

/// Packed code for `index`: the index itself when in range, otherwise
/// `(index mod lane_count) - lane_count`.
#[inline]
pub fn partially_wrap_index(index: i64, lane_count: usize) -> i64 {
    wrapping_mode(index, lane_count, IndexMode::PartialWrap)
}

/// `index` reduced into `[0, lane_count)`.
#[inline]
pub fn wrap_index(index: i64, lane_count: usize) -> usize {
    wrapping_mode(index, lane_count, IndexMode::Wrap) as usize
}

/// Returns `index` if it lies in `[0, length)`.
#[inline]
pub fn check_index(index: i64, length: usize) -> Result<usize> {
    check_index0(index, length, IndexMode::Check).map(|index| index as usize)
}

/// `value` as a signed index, saturating at `i64::MAX`.
#[inline]
pub fn saturating_index(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Checks that `[offset, offset + size)` fits in `length` elements.
///
/// The reported index is the first element past the end of the array, or
/// `offset` itself when it already lies beyond it.
pub fn check_from_index_size(offset: usize, size: usize, length: usize) -> Result<()> {
    match offset.checked_add(size) {
        Some(end) if end <= length => Ok(()),
        _ => Err(index_out_of_range(saturating_index(offset.max(length)), length)),
    }
}

/// Source of one destination lane of a shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneSource {
    /// The requested index was in range.
    Valid(u32),
    /// The requested index was out of range; this is its wrapped position.
    OutOfRange(u32),
}

impl LaneSource {
    /// Tags `index` for a vector of `lane_count` lanes.
    #[inline]
    pub fn encode(index: i64, lane_count: usize) -> Self {
        Self::decode(partially_wrap_index(index, lane_count), lane_count)
    }

    #[inline(always)]
    fn decode(code: i64, lane_count: usize) -> Self {
        if code >= 0 {
            LaneSource::Valid(code as u32)
        } else {
            LaneSource::OutOfRange((code + lane_count as i64) as u32)
        }
    }

    /// Unpacks a code in `[-lane_count, lane_count)`.
    ///
    /// # Panics
    ///
    /// Panics if the code is outside that range.
    #[inline]
    pub fn from_code(code: i32, lane_count: usize) -> Self {
        let n = lane_count as i64;
        let code = code as i64;
        assert!(
            -n <= code && code < n,
            "shuffle code {} outside [-{}, {})",
            code,
            n,
            n
        );
        Self::decode(code, lane_count)
    }

    /// Packed signed form: the position when valid, `position - lane_count`
    /// otherwise.
    #[inline]
    pub fn code(self, lane_count: usize) -> i32 {
        match self {
            LaneSource::Valid(i) => i as i32,
            LaneSource::OutOfRange(w) => w as i32 - lane_count as i32,
        }
    }

    /// Lane the value is read from, ignoring validity.
    #[inline(always)]
    pub fn position(self) -> usize {
        match self {
            LaneSource::Valid(i) | LaneSource::OutOfRange(i) => i as usize,
        }
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        matches!(self, LaneSource::Valid(_))
    }

    /// Same position, marked valid.
    #[inline(always)]
    pub fn wrap(self) -> Self {
        LaneSource::Valid(self.position() as u32)
    }
}
