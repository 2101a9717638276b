//! Fixed-width SIMD vectors with masks and shuffles.
//!
//! ```rust
//! use simdly_vector::simd::{AssociativeOp, Mask, Shuffle, Species, Vector};
//!
//! let species = Species::<i32, 4>::new();
//! let v = Vector::from_lanes([10, 20, 30, 40]);
//!
//! let reversed = v.rearrange(&Shuffle::from_lanes([3, 2, 1, 0])).unwrap();
//! assert_eq!(reversed.to_array(), [40, 30, 20, 10]);
//!
//! let mask = Mask::from_lanes([true, false, true, false]);
//! assert_eq!(v.compress(&mask).to_array(), [10, 30, 0, 0]);
//! assert_eq!(v.reduce_lanes_masked(AssociativeOp::Add, &mask), Ok(40));
//! assert_eq!(species.iota().to_array(), [0, 1, 2, 3]);
//! ```

pub mod config;
pub mod error;
pub mod simd;

pub use error::{Result, VectorError};
pub use simd::{SimdFilter, SimdLanewise, SimdReduce};

/// Below this many elements the `simd_*` slice kernels use the scalar loop.
pub const SIMD_THRESHOLD: usize = 64;

/// Up to this many elements the `par_simd_*` slice kernels stay on one
/// thread.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Elements per rayon task in the `par_simd_*` slice kernels, rounded down to
/// a multiple of the lane count.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;
