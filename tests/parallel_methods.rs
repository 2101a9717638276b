use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdly_vector::simd::{AssociativeOp, BinaryOp, ComparisonOp, Species};
use simdly_vector::{SimdFilter, SimdLanewise, SimdReduce, VectorError};
use simdly_vector::{PARALLEL_SIMD_THRESHOLD, SIMD_THRESHOLD};

const I32X8: Species<i32, 8> = Species::new();
const I64X4: Species<i64, 4> = Species::new();
const F32X8: Species<f32, 8> = Species::new();

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_i32(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1_000..1_000)).collect()
}

#[test]
fn test_parallel_lanewise_small_array() {
    init_logger();
    let a = vec![1i32, -2, 3, -4];
    let b = vec![10i32, 20, 30, 40];
    let result = a.as_slice().par_simd_lanewise(I32X8, BinaryOp::Add, b.as_slice());
    assert_eq!(result, Ok(vec![11, 18, 33, 36]));
}

#[test]
fn test_parallel_lanewise_large_array() {
    init_logger();
    let len = PARALLEL_SIMD_THRESHOLD + 1_234;
    let a = random_i32(len, 1);
    let b = random_i32(len, 2);

    for op in [BinaryOp::Add, BinaryOp::Mul, BinaryOp::Max, BinaryOp::Xor] {
        let scalar = a.as_slice().scalar_lanewise(op, b.as_slice()).unwrap();
        let simd = a.as_slice().simd_lanewise(I32X8, op, b.as_slice()).unwrap();
        let parallel = a.as_slice().par_simd_lanewise(I32X8, op, b.as_slice()).unwrap();
        assert_eq!(simd, scalar, "simd {}", op.name());
        assert_eq!(parallel, scalar, "parallel {}", op.name());
    }
}

#[test]
fn test_parallel_lanewise_floating() {
    init_logger();
    let len = PARALLEL_SIMD_THRESHOLD + 77;
    let a: Vec<f32> = (0..len).map(|i| i as f32 * 0.5).collect();
    let b: Vec<f32> = (0..len).map(|i| 1.0 + (i % 13) as f32).collect();

    let result = a.as_slice().par_simd_lanewise(F32X8, BinaryOp::Div, b.as_slice()).unwrap();
    for (i, &val) in result.iter().enumerate() {
        let expected = a[i] / b[i];
        assert!(
            (val - expected).abs() <= expected.abs() * 1e-6,
            "par_simd_lanewise DIV failed at index {i}: {val} != {expected}"
        );
    }
}

#[test]
fn test_length_mismatch() {
    let a = vec![1i32; 100];
    let b = vec![1i32; 99];
    let expected = Err(VectorError::LengthMismatch {
        left: 100,
        right: 99,
    });
    assert_eq!(a.as_slice().scalar_lanewise(BinaryOp::Add, b.as_slice()), expected);
    assert_eq!(a.as_slice().simd_lanewise(I32X8, BinaryOp::Add, b.as_slice()), expected);
    assert_eq!(
        a.as_slice().par_simd_lanewise(I32X8, BinaryOp::Add, b.as_slice()),
        expected
    );
}

#[test]
fn test_divide_by_zero_reports_element_index() {
    init_logger();
    for len in [SIMD_THRESHOLD - 1, 1_000, PARALLEL_SIMD_THRESHOLD + 9] {
        let a = vec![7i64; len];
        let mut b = vec![1i64; len];
        let zero_at = len - 3;
        b[zero_at] = 0;
        b[len - 1] = 0;

        let expected = Err(VectorError::DivideByZero { lane: zero_at });
        assert_eq!(
            a.as_slice().simd_lanewise(I64X4, BinaryOp::Div, b.as_slice()),
            expected,
            "simd, length {len}"
        );
        assert_eq!(
            a.as_slice().par_simd_lanewise(I64X4, BinaryOp::Div, b.as_slice()),
            expected,
            "parallel, length {len}"
        );
    }
}

#[test]
fn test_unsupported_operator_is_rejected_on_every_path() {
    let data = vec![1.0f32; PARALLEL_SIMD_THRESHOLD + 1];
    let error = VectorError::UnsupportedOperation {
        operation: "AND",
        element: "f32",
    };
    for len in [8, 1_000, data.len()] {
        let a = &data[..len];
        assert_eq!(
            a.par_simd_lanewise(F32X8, BinaryOp::And, a),
            Err(error.clone()),
            "lanewise, length {len}"
        );
        assert_eq!(
            a.par_simd_reduce(F32X8, AssociativeOp::And),
            Err(error.clone()),
            "reduce, length {len}"
        );
    }
}

#[test]
fn test_parallel_reduce_matches_scalar() {
    init_logger();
    let len = 3 * PARALLEL_SIMD_THRESHOLD + 5;
    let data = random_i32(len, 3);

    for op in [
        AssociativeOp::Add,
        AssociativeOp::Min,
        AssociativeOp::Max,
        AssociativeOp::Or,
        AssociativeOp::Xor,
        AssociativeOp::FirstNonzero,
    ] {
        let scalar = data.as_slice().scalar_reduce(op).unwrap();
        assert_eq!(data.as_slice().simd_reduce(I32X8, op), Ok(scalar), "simd {}", op.name());
        assert_eq!(
            data.as_slice().par_simd_reduce(I32X8, op),
            Ok(scalar),
            "parallel {}",
            op.name()
        );
    }
}

#[test]
fn test_reduce_empty_slice_is_identity() {
    let empty: &[i32] = &[];
    assert_eq!(empty.par_simd_reduce(I32X8, AssociativeOp::Add), Ok(0));
    assert_eq!(empty.par_simd_reduce(I32X8, AssociativeOp::Mul), Ok(1));
    assert_eq!(empty.simd_reduce(I32X8, AssociativeOp::Min), Ok(i32::MAX));
}

#[test]
fn test_floating_reduce_close_to_scalar() {
    let len = PARALLEL_SIMD_THRESHOLD * 2;
    let data: Vec<f64> = (0..len).map(|i| ((i % 1_000) as f64) * 1e-3).collect();
    let scalar = data.as_slice().scalar_reduce(AssociativeOp::Add).unwrap();
    let parallel = data
        .as_slice()
        .par_simd_reduce(Species::<f64, 4>::new(), AssociativeOp::Add)
        .unwrap();
    assert!((parallel - scalar).abs() <= scalar.abs() * 1e-9);
}

#[test]
fn test_filter_keeps_order() {
    init_logger();
    for len in [10, 1_001] {
        let data = random_i32(len, 4);
        let expected: Vec<i32> = data.iter().copied().filter(|&x| x >= 250).collect();
        assert_eq!(
            data.as_slice().simd_filter(I32X8, ComparisonOp::Ge, 250),
            Ok(expected.clone())
        );
        assert_eq!(
            data.as_slice().scalar_filter(ComparisonOp::Ge, 250),
            Ok(expected)
        );
    }
}

#[test]
fn test_match_statement_threshold_selection() {
    let small = vec![2i32; 10];
    let large = vec![2i32; PARALLEL_SIMD_THRESHOLD + 1];

    let result_small = small
        .as_slice()
        .par_simd_lanewise(I32X8, BinaryOp::Mul, small.as_slice());
    assert_eq!(result_small.map(|c| c.len()), Ok(10));

    let result_large = large
        .as_slice()
        .par_simd_lanewise(I32X8, BinaryOp::Mul, large.as_slice())
        .unwrap();
    assert_eq!(result_large.len(), large.len());
    assert!(result_large.iter().all(|&x| x == 4));
}
