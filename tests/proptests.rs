use lanesort::lanes::{I64x8, Lanes};
use lanesort::prelude::*;
use proptest::prelude::*;

fn sorted(mut data: Vec<i64>) -> Vec<i64> {
    data.sort_unstable();
    data
}

proptest! {
    // Partition routes every element to the correct side and keeps the multiset.
    #[test]
    fn prop_partition_is_a_permutation(
        data in prop::collection::vec(-50i64..50, 0..600),
        pivot in -60i64..60,
    ) {
        let mut single = data.clone();
        let a = partition::<Lanes<i64, 4>>(&mut single, 0, data.len(), pivot);
        let mut unrolled = data.clone();
        let b = partition_unrolled::<Lanes<i64, 4>, 5>(&mut unrolled, 0, data.len(), pivot);

        let below = data.iter().filter(|&&x| x < pivot).count();
        prop_assert_eq!(a.index, below);
        prop_assert_eq!(b.index, below);
        prop_assert!(single[..a.index].iter().all(|&x| x < pivot));
        prop_assert!(single[a.index..].iter().all(|&x| x >= pivot));
        prop_assert!(unrolled[..b.index].iter().all(|&x| x < pivot));
        prop_assert!(unrolled[b.index..].iter().all(|&x| x >= pivot));
        prop_assert_eq!(sorted(single.clone()), sorted(data.clone()));
        prop_assert_eq!(sorted(unrolled.clone()), sorted(data.clone()));

        if let (Some(&min), Some(&max)) = (data.iter().min(), data.iter().max()) {
            prop_assert_eq!((a.min, a.max), (min, max));
            prop_assert_eq!((b.min, b.max), (min, max));
        }
    }

    #[test]
    fn prop_partition_sub_segment(
        data in prop::collection::vec(any::<i64>(), 0..400),
        bounds in (0usize..400, 0usize..400),
        pivot in any::<i64>(),
    ) {
        let len = data.len();
        let (x, y) = (bounds.0.min(len), bounds.1.min(len));
        let (left, right) = (x.min(y), x.max(y));

        let mut out = data.clone();
        let split = partition_unrolled::<I64x8, 2>(&mut out, left, right, pivot);

        prop_assert!(split.index >= left && split.index <= right);
        prop_assert_eq!(&out[..left], &data[..left]);
        prop_assert_eq!(&out[right..], &data[right..]);
        prop_assert!(out[left..split.index].iter().all(|&v| v < pivot));
        prop_assert!(out[split.index..right].iter().all(|&v| v >= pivot));
    }

    #[test]
    fn prop_qsort_matches_std(data in prop::collection::vec(any::<i64>(), 0..2000)) {
        let mut actual = data.clone();
        qsort(&mut actual);
        prop_assert_eq!(actual, sorted(data));
    }

    #[test]
    fn prop_partial_sort_prefix(
        data in prop::collection::vec(-1000i64..1000, 0..1500),
        k in 0usize..1600,
    ) {
        let mut actual = data.clone();
        partial_sort(&mut actual, k);
        let expected = sorted(data);
        let k = k.min(expected.len());
        prop_assert_eq!(&actual[..k], &expected[..k]);
    }
}
