//! Build-time vector configuration.
//!
//! `build.rs` probes the host CPU the same way for every build and writes the
//! detected register width into `OUT_DIR/vector_config.rs`. The widest shape
//! (`VectorShape::SMax`) is a fixed architectural width rather than a property
//! of the host: 2048 bits, the largest scalable-vector register, unless the
//! `SIMDLY_MAX_VECTOR_BITS` environment variable says otherwise. It is never
//! narrower than the detected width, so on a host without an override
//! `PREFERRED_VECTOR_BITS` and `MAX_VECTOR_BITS` usually differ.
//!
//! Exactly one of the `avx512`, `avx2`, `sse`, `neon` or `fallback` cfg flags
//! is set by the build script.

include!(concat!(env!("OUT_DIR"), "/vector_config.rs"));

/// Name of the instruction set the preferred shape was derived from.
pub const fn backend_name() -> &'static str {
    if cfg!(avx512) {
        "avx512"
    } else if cfg!(avx2) {
        "avx2"
    } else if cfg!(sse) {
        "sse4.1"
    } else if cfg!(neon) {
        "neon"
    } else {
        "fallback"
    }
}
