//! Vector, mask and shuffle types.
//!
//! All three are parameterised by an element type `E` and a lane count `N`
//! fixed at compile time. The aliases below name the common shapes.

pub mod element;
pub mod index;
pub mod mask;
pub mod ops;
pub mod shape;
pub mod shuffle;
pub mod slice;
pub mod species;
pub mod traits;
pub mod vector;

pub use element::{Element, ElementKind};
pub use index::{IndexMode, LaneSource};
pub use mask::Mask;
pub use ops::{AssociativeOp, BinaryOp, ComparisonOp, TernaryOp, TestOp, UnaryOp};
pub use shape::VectorShape;
pub use shuffle::Shuffle;
pub use species::Species;
pub use traits::{SimdFilter, SimdLanewise, SimdReduce};
pub use vector::{ByteOrder, Vector};

// 64-bit shapes
pub type I8x8 = Vector<i8, 8>;
pub type I16x4 = Vector<i16, 4>;
pub type I32x2 = Vector<i32, 2>;
pub type I64x1 = Vector<i64, 1>;
pub type F32x2 = Vector<f32, 2>;
pub type F64x1 = Vector<f64, 1>;

// 128-bit shapes
pub type I8x16 = Vector<i8, 16>;
pub type I16x8 = Vector<i16, 8>;
pub type I32x4 = Vector<i32, 4>;
pub type I64x2 = Vector<i64, 2>;
pub type F32x4 = Vector<f32, 4>;
pub type F64x2 = Vector<f64, 2>;

// 256-bit shapes
pub type I8x32 = Vector<i8, 32>;
pub type I16x16 = Vector<i16, 16>;
pub type I32x8 = Vector<i32, 8>;
pub type I64x4 = Vector<i64, 4>;
pub type F32x8 = Vector<f32, 8>;
pub type F64x4 = Vector<f64, 4>;

// 512-bit shapes
pub type I8x64 = Vector<i8, 64>;
pub type I16x32 = Vector<i16, 32>;
pub type I32x16 = Vector<i32, 16>;
pub type I64x8 = Vector<i64, 8>;
pub type F32x16 = Vector<f32, 16>;
pub type F64x8 = Vector<f64, 8>;
