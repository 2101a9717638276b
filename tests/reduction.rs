//! Lane reductions against left-to-right scalar folds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdly_vector::simd::{AssociativeOp, Mask, Species, Vector};
use simdly_vector::VectorError;

const I32X8: Species<i32, 8> = Species::new();
const I64X4: Species<i64, 4> = Species::new();
const F64X4: Species<f64, 4> = Species::new();

const INTEGRAL_OPS: [AssociativeOp; 8] = [
    AssociativeOp::Add,
    AssociativeOp::Mul,
    AssociativeOp::Min,
    AssociativeOp::Max,
    AssociativeOp::And,
    AssociativeOp::Or,
    AssociativeOp::Xor,
    AssociativeOp::FirstNonzero,
];

fn scalar_fold(op: AssociativeOp, lanes: impl Iterator<Item = i32>) -> i32 {
    lanes.fold(op.identity::<i32>(), |acc, x| match op {
        AssociativeOp::Add => acc.wrapping_add(x),
        AssociativeOp::Mul => acc.wrapping_mul(x),
        AssociativeOp::Min => acc.min(x),
        AssociativeOp::Max => acc.max(x),
        AssociativeOp::And => acc & x,
        AssociativeOp::Or => acc | x,
        AssociativeOp::Xor => acc ^ x,
        AssociativeOp::FirstNonzero => {
            if acc != 0 {
                acc
            } else {
                x
            }
        }
    })
}

#[test]
fn test_add_scenario() {
    let v = Vector::<i32, 4>::from_lanes([1, 2, 3, 4]);
    assert_eq!(v.reduce_lanes(AssociativeOp::Add), Ok(10));

    let mask = Mask::from_lanes([true, false, true, false]);
    assert_eq!(v.reduce_lanes_masked(AssociativeOp::Add, &mask), Ok(4));

    let none = v.species().mask_all(false);
    assert_eq!(v.reduce_lanes_masked(AssociativeOp::Add, &none), Ok(0));
}

#[test]
fn test_integral_reductions_match_reference() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let lanes: [i32; 8] = std::array::from_fn(|_| {
            if rng.random_bool(0.3) {
                0
            } else {
                rng.random_range(-50..50)
            }
        });
        let bits: [bool; 8] = std::array::from_fn(|_| rng.random_bool(0.5));
        let v = Vector::from_lanes(lanes);
        let mask = Mask::from_lanes(bits);

        for op in INTEGRAL_OPS {
            assert_eq!(
                v.reduce_lanes(op).unwrap(),
                scalar_fold(op, lanes.into_iter()),
                "{op:?} over {lanes:?}"
            );
            let selected = lanes.into_iter().zip(bits).filter(|&(_, bit)| bit);
            assert_eq!(
                v.reduce_lanes_masked(op, &mask).unwrap(),
                scalar_fold(op, selected.map(|(x, _)| x)),
                "{op:?} over {lanes:?} masked by {bits:?}"
            );
        }
    }
}

#[test]
fn test_first_nonzero_picks_lowest_lane() {
    let v = Vector::<i32, 8>::from_lanes([0, 0, 0, 7, 0, 9, 0, 0]);
    assert_eq!(v.reduce_lanes(AssociativeOp::FirstNonzero), Ok(7));

    let skip_seven = Mask::from_lanes([true, true, true, false, true, true, true, true]);
    assert_eq!(
        v.reduce_lanes_masked(AssociativeOp::FirstNonzero, &skip_seven),
        Ok(9)
    );
    assert_eq!(I32X8.zero().reduce_lanes(AssociativeOp::FirstNonzero), Ok(0));

    // Negative zero has a nonzero bit pattern.
    let f = Vector::<f64, 4>::from_lanes([0.0, -0.0, 3.0, 4.0]);
    let first = f.reduce_lanes(AssociativeOp::FirstNonzero).unwrap();
    assert_eq!(first, 0.0);
    assert!(first.is_sign_negative());
}

#[test]
fn test_identities_on_empty_mask() {
    let v = I64X4.iota();
    let none = I64X4.mask_all(false);
    assert_eq!(v.reduce_lanes_masked(AssociativeOp::Mul, &none), Ok(1));
    assert_eq!(v.reduce_lanes_masked(AssociativeOp::And, &none), Ok(-1));
    assert_eq!(v.reduce_lanes_masked(AssociativeOp::Min, &none), Ok(i64::MAX));
    assert_eq!(v.reduce_lanes_masked(AssociativeOp::Max, &none), Ok(i64::MIN));

    let f = F64X4.iota();
    let none = F64X4.mask_all(false);
    assert_eq!(
        f.reduce_lanes_masked(AssociativeOp::Min, &none),
        Ok(f64::INFINITY)
    );
    assert_eq!(
        f.reduce_lanes_masked(AssociativeOp::Max, &none),
        Ok(f64::NEG_INFINITY)
    );
}

#[test]
fn test_floating_sum_folds_from_lane_zero() {
    let v = Vector::<f32, 4>::from_lanes([1.0e8, 1.0, -1.0e8, 1.0]);
    let expected = ((0.0f32 + 1.0e8) + 1.0 - 1.0e8) + 1.0;
    assert_eq!(v.reduce_lanes(AssociativeOp::Add), Ok(expected));
}

#[test]
fn test_bitwise_reduction_rejects_floating_lanes() {
    let f = F64X4.iota();
    assert_eq!(
        f.reduce_lanes(AssociativeOp::Xor),
        Err(VectorError::UnsupportedOperation {
            operation: "XOR",
            element: "f64",
        })
    );
    assert!(f
        .reduce_lanes_masked(AssociativeOp::Or, &F64X4.mask_all(true))
        .is_err());
}
