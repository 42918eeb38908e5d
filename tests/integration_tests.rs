use lanesort::lanes::{I32x16, Lanes};
use lanesort::prelude::*;
use lanesort::{PartitionError, try_partial_sort, try_qselect};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn test_qsort_random_i32() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let len = rng.random_range(0..5000);
        let mut input: Vec<i32> = (0..len).map(|_| rng.random()).collect();
        let mut expected = input.clone();
        expected.sort_unstable();

        qsort(&mut input);
        assert_eq!(input, expected);
    }
}

#[test]
fn test_qsort_every_integer_width() {
    let mut rng = StdRng::seed_from_u64(1);

    let mut a: Vec<i8> = (0..3000).map(|_| rng.random()).collect();
    let mut b: Vec<u8> = (0..3000).map(|_| rng.random()).collect();
    let mut c: Vec<i16> = (0..3000).map(|_| rng.random()).collect();
    let mut d: Vec<u16> = (0..3000).map(|_| rng.random()).collect();
    let mut e: Vec<u32> = (0..3000).map(|_| rng.random()).collect();
    let mut f: Vec<i64> = (0..3000).map(|_| rng.random()).collect();
    let mut g: Vec<u64> = (0..3000).map(|_| rng.random()).collect();

    qsort(&mut a);
    qsort(&mut b);
    qsort(&mut c);
    qsort(&mut d);
    qsort(&mut e);
    qsort(&mut f);
    qsort(&mut g);

    assert!(is_sorted(&a));
    assert!(is_sorted(&b));
    assert!(is_sorted(&c));
    assert!(is_sorted(&d));
    assert!(is_sorted(&e));
    assert!(is_sorted(&f));
    assert!(is_sorted(&g));
}

#[test]
fn test_qsort_patterns() {
    let len = 10_000;
    let ascending: Vec<i64> = (0..len).collect();
    let descending: Vec<i64> = (0..len).rev().collect();
    let all_equal: Vec<i64> = vec![7; len as usize];
    let saw: Vec<i64> = (0..len).map(|i| i % 100).collect();
    let organ_pipe: Vec<i64> = (0..len).map(|i| if i < len / 2 { i } else { len - i }).collect();
    let two_values: Vec<i64> = (0..len).map(|i| i % 2).collect();

    for input in [ascending, descending, all_equal, saw, organ_pipe, two_values] {
        let mut actual = input.clone();
        let mut expected = input;
        expected.sort_unstable();
        qsort(&mut actual);
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_qsort_floats_with_nan() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut input: Vec<f32> = (0..2000).map(|_| rng.random_range(-100.0..100.0)).collect();
    for i in (0..2000).step_by(97) {
        input[i] = f32::NAN;
    }
    let nan_count = input.iter().filter(|x| x.is_nan()).count();

    qsort(&mut input);

    let finite = input.len() - nan_count;
    assert!(is_sorted(&input[..finite]));
    assert!(input[finite..].iter().all(|x| x.is_nan()));
}

#[test]
fn test_qsort_f64() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut input: Vec<f64> = (0..4096).map(|_| rng.random::<f64>() - 0.5).collect();
    let mut expected = input.clone();
    expected.sort_by(|a, b| a.total_cmp(b));
    qsort(&mut input);
    assert_eq!(input, expected);
}

#[test]
fn test_qselect() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..50 {
        let len = rng.random_range(1..3000);
        let input: Vec<u32> = (0..len).map(|_| rng.random_range(0..500)).collect();
        let k = rng.random_range(0..len);

        let mut expected = input.clone();
        expected.sort_unstable();

        let mut data = input.clone();
        qselect(&mut data, k);
        assert_eq!(data[k], expected[k]);
        assert!(data[..k].iter().all(|&x| x <= data[k]));
        assert!(data[k + 1..].iter().all(|&x| x >= data[k]));
    }
}

#[test]
fn test_qselect_out_of_range_is_noop() {
    let mut data = vec![3, 1, 2];
    qselect(&mut data, 3);
    assert_eq!(data, vec![3, 1, 2]);
    assert_eq!(
        try_qselect(&mut data, 5),
        Err(PartitionError::RankOutOfRange { k: 5, len: 3 })
    );
    assert_eq!(try_qselect(&mut data, 0), Ok(()));
    assert_eq!(data[0], 1);
}

#[test]
fn test_partial_sort() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..50 {
        let len = rng.random_range(0..3000);
        let input: Vec<i64> = (0..len).map(|_| rng.random_range(-1000..1000)).collect();
        let k = rng.random_range(0..=len);

        let mut expected = input.clone();
        expected.sort_unstable();

        let mut data = input.clone();
        partial_sort(&mut data, k);
        assert_eq!(&data[..k], &expected[..k]);

        data.sort_unstable();
        assert_eq!(data, expected);
    }
}

#[test]
fn test_partial_sort_edges() {
    let mut data = vec![5u16, 4, 3, 2, 1];
    partial_sort(&mut data, 0);
    assert_eq!(data, vec![5, 4, 3, 2, 1]);

    partial_sort(&mut data, 1);
    assert_eq!(data[0], 1);

    partial_sort(&mut data, 99);
    assert_eq!(data, vec![1, 2, 3, 4, 5]);

    assert_eq!(
        try_partial_sort(&mut data, 6),
        Err(PartitionError::RankOutOfRange { k: 6, len: 5 })
    );
    assert_eq!(try_partial_sort(&mut data, 5), Ok(()));
}

#[test]
fn test_explicit_policy_drivers() {
    let mut rng = StdRng::seed_from_u64(10);
    let input: Vec<i32> = (0..10_000).map(|_| rng.random()).collect();
    let mut expected = input.clone();
    expected.sort_unstable();

    let mut data = input.clone();
    lanesort::algo::qsort_with::<Lanes<i32, 4>, 8>(&mut data);
    assert_eq!(data, expected);

    let mut data = input.clone();
    lanesort::algo::qsort_with::<I32x16, 1>(&mut data);
    assert_eq!(data, expected);

    let mut data = input;
    lanesort::algo::qselect_with::<I32x16, 2>(&mut data, 5000);
    assert_eq!(data[5000], expected[5000]);
}

#[test]
fn test_empty_and_single() {
    let mut empty: Vec<i32> = vec![];
    qsort(&mut empty);
    qselect(&mut empty, 0);
    partial_sort(&mut empty, 3);
    assert!(empty.is_empty());

    let mut single = vec![9u64];
    qsort(&mut single);
    qselect(&mut single, 0);
    partial_sort(&mut single, 1);
    assert_eq!(single, vec![9]);
}
