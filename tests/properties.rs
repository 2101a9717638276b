//! Algebraic laws of shuffles, masks and vectors, checked with proptest.

use proptest::prelude::*;

use simdly_vector::simd::index::{partially_wrap_index, wrap_index, LaneSource};
use simdly_vector::simd::{Mask, Shuffle, Species, Vector};

const I32X8: Species<i32, 8> = Species::new();

fn lanes() -> impl Strategy<Value = [i32; 8]> {
    prop::array::uniform8(any::<i32>())
}

fn bits() -> impl Strategy<Value = [bool; 8]> {
    prop::array::uniform8(any::<bool>())
}

fn requests() -> impl Strategy<Value = [i32; 8]> {
    prop::array::uniform8(-64i32..64)
}

fn in_range() -> impl Strategy<Value = [i32; 8]> {
    prop::array::uniform8(0i32..8)
}

proptest! {
    #[test]
    fn partial_wrap_code_decodes(index in -1_000i64..1_000, log_n in 0u32..7) {
        let n = 1usize << log_n;
        let code = partially_wrap_index(index, n);
        prop_assert!(-(n as i64) <= code && code < n as i64);
        if (0..n as i64).contains(&index) {
            prop_assert_eq!(code, index);
        } else {
            prop_assert!(code < 0);
            prop_assert_eq!(code + n as i64, wrap_index(index, n) as i64);
        }

        let source = LaneSource::encode(index, n);
        prop_assert_eq!(source.code(n) as i64, code);
        prop_assert_eq!(LaneSource::from_code(code as i32, n), source);
    }

    #[test]
    fn wrap_indexes_is_valid_and_idempotent(indexes in requests()) {
        let shuffle = Shuffle::<i32, 8>::from_lanes(indexes);
        let wrapped = shuffle.wrap_indexes();
        prop_assert!(wrapped.lane_is_valid().all_true());
        prop_assert_eq!(wrapped.wrap_indexes().to_array(), wrapped.to_array());
        for (i, &index) in indexes.iter().enumerate() {
            prop_assert_eq!(wrapped.to_array()[i], index.rem_euclid(8));
        }
    }

    #[test]
    fn validity_matches_request_range(indexes in requests()) {
        let shuffle = Shuffle::<i32, 8>::from_lanes(indexes);
        let valid = shuffle.lane_is_valid().to_array();
        for (i, &index) in indexes.iter().enumerate() {
            prop_assert_eq!(valid[i], (0..8).contains(&index));
        }
        prop_assert_eq!(shuffle.check_indexes().is_ok(), valid.iter().all(|&b| b));
    }

    #[test]
    fn rearrange_by_iota_is_identity(a in lanes(), start in -20i32..20) {
        let v = Vector::from_lanes(a);
        prop_assert_eq!(v.rearrange(&I32X8.iota_shuffle(0, 1, false)), Ok(v));

        let rotated = v.rearrange(&I32X8.iota_shuffle(start, 1, true)).unwrap();
        let back = rotated.rearrange(&I32X8.iota_shuffle(-start, 1, true)).unwrap();
        prop_assert_eq!(back, v);
    }

    #[test]
    fn rearrange_with_on_valid_shuffle_ignores_second_operand(
        a in lanes(),
        b in lanes(),
        indexes in in_range(),
    ) {
        let shuffle = Shuffle::from_lanes(indexes);
        let (a, b) = (Vector::from_lanes(a), Vector::from_lanes(b));
        prop_assert_eq!(Ok(a.rearrange_with(&shuffle, &b)), a.rearrange(&shuffle));
        prop_assert_eq!(
            Ok(a.rearrange_masked(&shuffle, &I32X8.mask_all(true))),
            a.rearrange(&shuffle)
        );
    }

    #[test]
    fn rearrange_with_same_operand_is_wrapped_rearrange(a in lanes(), indexes in requests()) {
        let shuffle = Shuffle::from_lanes(indexes);
        let a = Vector::from_lanes(a);
        prop_assert_eq!(
            Ok(a.rearrange_with(&shuffle, &a)),
            a.rearrange(&shuffle.wrap_indexes())
        );
    }

    #[test]
    fn expand_of_compress_is_masked_blend(a in lanes(), m in bits()) {
        let v = Vector::from_lanes(a);
        let mask = Mask::from_lanes(m);
        let packed = v.compress(&mask);

        let count = mask.true_count();
        prop_assert!(packed.to_array()[count..].iter().all(|&x| x == 0));
        prop_assert_eq!(packed.expand(&mask), I32X8.zero().blend(&v, &mask));
    }

    #[test]
    fn blend_follows_mask(a in lanes(), b in lanes(), m in bits()) {
        let (va, vb) = (Vector::from_lanes(a), Vector::from_lanes(b));
        let blended = va.blend(&vb, &Mask::from_lanes(m)).to_array();
        for i in 0..8 {
            prop_assert_eq!(blended[i], if m[i] { b[i] } else { a[i] });
        }
        prop_assert_eq!(va.blend(&vb, &I32X8.mask_all(false)), va);
        prop_assert_eq!(va.blend(&vb, &I32X8.mask_all(true)), vb);
    }

    #[test]
    fn mask_long_round_trip(m in bits()) {
        let mask = Mask::<i32, 8>::from_lanes(m);
        let long = mask.to_long().unwrap();
        prop_assert_eq!(long.count_ones() as usize, mask.true_count());
        prop_assert_eq!(Mask::from_long(I32X8, long), mask);
        prop_assert_eq!(mask.first_true(), m.iter().position(|&b| b));
        prop_assert_eq!(mask.last_true(), m.iter().rposition(|&b| b));
    }

    #[test]
    fn slice_then_unslice_restores_both(a in lanes(), b in lanes(), origin in 0usize..=8) {
        let (va, vb) = (Vector::from_lanes(a), Vector::from_lanes(b));
        let window = va.slice(origin, &vb).unwrap();
        prop_assert_eq!(window.unslice(origin, &va, 0), Ok(va));
        prop_assert_eq!(window.unslice(origin, &vb, 1), Ok(vb));
    }
}
