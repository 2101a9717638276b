use super::Vector;
use crate::{
    error::{index_out_of_range, Result},
    simd::{element::Element, species::Species},
};

impl<E: Element, const N: usize> Vector<E, N> {
    /// Casts the lanes to `F` and packs them into a `Vector<F, M>`.
    ///
    /// With `M == N`, `part` must be 0. A narrower result (`M < N`) takes
    /// lanes `part * M..(part + 1) * M`, for `part` in `[0, N / M)`. A wider
    /// result (`M > N`) places the `N` cast lanes at block `-part` and zeroes
    /// the rest, for `part` in `(-M / N, 0]`.
    ///
    /// ```rust
    /// use simdly_vector::simd::Vector;
    ///
    /// let v = Vector::<i32, 4>::from_lanes([1, 2, 3, 4]);
    /// let high = v.convert::<i64, 2>(1).unwrap();
    /// assert_eq!(high.to_array(), [3, 4]);
    /// let wide = v.convert::<i16, 8>(-1).unwrap();
    /// assert_eq!(wide.to_array(), [0, 0, 0, 0, 1, 2, 3, 4]);
    /// ```
    pub fn convert<F: Element, const M: usize>(&self, part: i32) -> Result<Vector<F, M>> {
        let species = Species::<F, M>::new();
        // Lane counts are powers of two, so one divides the other.
        let blocks = if M > N { M / N } else { N / M };
        let block = if M > N { -(part as i64) } else { part as i64 };
        if block < 0 || block >= blocks as i64 {
            return Err(index_out_of_range(part as i64, blocks));
        }
        let block = block as usize;

        if M <= N {
            let start = block * M;
            return Ok(Vector::from_generator(species, |i| self.get(start + i).cast()));
        }
        let start = block * N;
        Ok(Vector::from_generator(species, |i| {
            if (start..start + N).contains(&i) {
                self.get(i - start).cast()
            } else {
                F::default()
            }
        }))
    }

    /// Lanewise cast to another element type with the same lane count.
    pub fn cast<F: Element>(&self) -> Vector<F, N> {
        Vector::from_lanes(self.to_array().map(|e| e.cast::<F>()))
    }
}
