//! Quicksort, quickselect and partial sort built on the vectorized partition.
//!
//! - **Quicksort** ([`qsort`]): median-of-sample pivot, [`partition_unrolled`] to split,
//!   recursion skipped on a side whose bound equals the pivot.
//! - **Quickselect** ([`qselect`]): the same machinery, recursing only into the side that
//!   holds the requested rank.
//! - **Partial sort** ([`partial_sort`]): quickselect followed by quicksort of the prefix.
//!
//! Each driver carries an iteration budget of `2 * log2(n)`. When it runs out, the
//! remaining segment is handed to the standard library. Small segments are finished by
//! the standard library's unstable sort as well.
//!
//! The element type picks its lane policy and unroll factor statically through
//! [`Sortable`]; [`qsort_with`] and [`qselect_with`] take both explicitly.

use crate::core::{Element, LaneOps};
use crate::error::PartitionError;
use crate::lanes::{F32x16, F64x8, I8x64, I16x32, U8x64, U16x32, U32x16, U64x8};
use crate::partition::partition_unrolled;
use cuneiform::cuneiform;
use log::{debug, trace};

/// Segments at or below this length are sorted without further partitioning.
pub const SMALL_SORT_THRESHOLD: usize = 128;

/// Number of evenly spaced elements the pivot is the median of.
pub const PIVOT_SAMPLES: usize = 9;

// Pivot sample indices, one cache line.
#[cuneiform]
struct PivotSample {
    data: [usize; PIVOT_SAMPLES],
}

/// Element types with a statically selected lane policy.
pub trait Sortable: Element {
    /// Sorts `arr` in ascending order.
    fn qsort(arr: &mut [Self]);

    /// Moves the element of rank `k` to index `k`, smaller elements before it and the
    /// rest after it. Does nothing if `k >= arr.len()`.
    fn qselect(arr: &mut [Self], k: usize);
}

macro_rules! impl_sortable {
    ($($t:ty => $v:ty, $unroll:literal;)*) => {
        $(
            impl Sortable for $t {
                #[inline]
                fn qsort(arr: &mut [Self]) {
                    qsort_with::<$v, $unroll>(arr);
                }

                #[inline]
                fn qselect(arr: &mut [Self], k: usize) {
                    qselect_with::<$v, $unroll>(arr, k);
                }
            }
        )*
    };
}

// NaN compares neither less nor greater than anything, so it is moved out of the way
// first and the remaining prefix is totally ordered.
macro_rules! impl_sortable_float {
    ($($t:ty => $v:ty, $unroll:literal;)*) => {
        $(
            impl Sortable for $t {
                #[inline]
                fn qsort(arr: &mut [Self]) {
                    let len = move_nans_to_end(arr, <$t>::is_nan);
                    qsort_with::<$v, $unroll>(&mut arr[..len]);
                }

                #[inline]
                fn qselect(arr: &mut [Self], k: usize) {
                    let len = move_nans_to_end(arr, <$t>::is_nan);
                    qselect_with::<$v, $unroll>(&mut arr[..len], k);
                }
            }
        )*
    };
}

impl_sortable! {
    i8 => I8x64, 1;
    u8 => U8x64, 1;
    i16 => I16x32, 1;
    u16 => U16x32, 1;
    u32 => U32x16, 2;
    u64 => U64x8, 8;
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
impl_sortable! {
    i32 => crate::avx512::ZmmI32, 2;
    i64 => crate::avx512::ZmmI64, 8;
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx512f")))]
impl_sortable! {
    i32 => crate::lanes::I32x16, 2;
    i64 => crate::lanes::I64x8, 8;
}

impl_sortable_float! {
    f32 => F32x16, 2;
    f64 => F64x8, 8;
}

/// Sorts `arr` in ascending order.
///
/// # Examples
///
/// ```
/// use lanesort::qsort;
///
/// let mut data = vec![3.5f64, -1.0, f64::NAN, 2.0];
/// qsort(&mut data);
///
/// assert_eq!(&data[..3], &[-1.0, 2.0, 3.5]);
/// assert!(data[3].is_nan());
/// ```
pub fn qsort<T: Sortable>(arr: &mut [T]) {
    T::qsort(arr);
}

/// Places the element of rank `k` at index `k`, with no larger element before it and no
/// smaller element after it. Does nothing if `k >= arr.len()`.
pub fn qselect<T: Sortable>(arr: &mut [T], k: usize) {
    T::qselect(arr, k);
}

/// Like [`qselect`], but reports a rank outside the slice.
pub fn try_qselect<T: Sortable>(arr: &mut [T], k: usize) -> Result<(), PartitionError> {
    if k >= arr.len() {
        return Err(PartitionError::RankOutOfRange { k, len: arr.len() });
    }
    T::qselect(arr, k);
    Ok(())
}

/// Sorts the `k` smallest elements into `arr[..k]`; the rest end up in `arr[k..]` in no
/// particular order. `k` is clamped to `arr.len()`.
///
/// # Examples
///
/// ```
/// use lanesort::partial_sort;
///
/// let mut data = vec![9, 4, 7, 1, 8, 2, 6, 3, 5, 0];
/// partial_sort(&mut data, 4);
///
/// assert_eq!(&data[..4], &[0, 1, 2, 3]);
/// ```
pub fn partial_sort<T: Sortable>(arr: &mut [T], k: usize) {
    let k = k.min(arr.len());
    if k == 0 {
        return;
    }
    T::qselect(arr, k - 1);
    T::qsort(&mut arr[..k - 1]);
}

/// Like [`partial_sort`], but reports `k > arr.len()` instead of clamping.
pub fn try_partial_sort<T: Sortable>(arr: &mut [T], k: usize) -> Result<(), PartitionError> {
    if k > arr.len() {
        return Err(PartitionError::RankOutOfRange { k, len: arr.len() });
    }
    partial_sort(arr, k);
    Ok(())
}

/// Sorts `arr` with an explicit lane policy `V` and unroll factor `U`.
pub fn qsort_with<V: LaneOps, const U: usize>(arr: &mut [V::Elem]) {
    let len = arr.len();
    if len > 1 {
        qsort_::<V, U>(arr, 0, len, iteration_budget(len));
    }
}

/// Selects rank `k` with an explicit lane policy `V` and unroll factor `U`.
pub fn qselect_with<V: LaneOps, const U: usize>(arr: &mut [V::Elem], k: usize) {
    let len = arr.len();
    if len > 1 && k < len {
        qselect_::<V, U>(arr, k, 0, len, iteration_budget(len));
    }
}

fn iteration_budget(len: usize) -> usize {
    2 * len.ilog2() as usize
}

fn qsort_<V: LaneOps, const U: usize>(
    arr: &mut [V::Elem],
    left: usize,
    right: usize,
    max_iters: usize,
) {
    if max_iters == 0 {
        debug!(
            "qsort: iteration budget exhausted on {} elements, falling back to sort_unstable",
            right - left
        );
        arr[left..right].sort_unstable_by(|a, b| a.order(b));
        return;
    }

    if right - left <= SMALL_SORT_THRESHOLD {
        arr[left..right].sort_unstable_by(|a, b| a.order(b));
        return;
    }

    let pivot = get_pivot(arr, left, right);
    let split = partition_unrolled::<V, U>(arr, left, right, pivot);

    // A side whose bound equals the pivot holds only pivot-equal values (or nothing).
    if pivot != split.min {
        qsort_::<V, U>(arr, left, split.index, max_iters - 1);
    }
    if pivot != split.max {
        qsort_::<V, U>(arr, split.index, right, max_iters - 1);
    }
}

fn qselect_<V: LaneOps, const U: usize>(
    arr: &mut [V::Elem],
    pos: usize,
    left: usize,
    right: usize,
    max_iters: usize,
) {
    if max_iters == 0 {
        debug!(
            "qselect: iteration budget exhausted on {} elements, falling back to select_nth_unstable",
            right - left
        );
        arr[left..right].select_nth_unstable_by(pos - left, |a, b| a.order(b));
        return;
    }

    if right - left <= SMALL_SORT_THRESHOLD {
        arr[left..right].sort_unstable_by(|a, b| a.order(b));
        return;
    }

    let pivot = get_pivot(arr, left, right);
    let split = partition_unrolled::<V, U>(arr, left, right, pivot);

    if pivot != split.min && pos < split.index {
        qselect_::<V, U>(arr, pos, left, split.index, max_iters - 1);
    } else if pivot != split.max && pos >= split.index {
        qselect_::<V, U>(arr, pos, split.index, right, max_iters - 1);
    }
}

/// Median of `PIVOT_SAMPLES` evenly spaced elements of `arr[left..right]`.
///
/// Requires `right - left >= PIVOT_SAMPLES`.
fn get_pivot<T: Element>(arr: &[T], left: usize, right: usize) -> T {
    let stride = (right - left) / PIVOT_SAMPLES;
    let mut sample = PivotSample {
        data: [0; PIVOT_SAMPLES],
    };
    sample
        .data
        .iter_mut()
        .enumerate()
        .for_each(|(i, index)| *index = left + i * stride + stride / 2);
    sample
        .data
        .sort_unstable_by(|&a, &b| arr[a].order(&arr[b]));
    arr[sample.data[PIVOT_SAMPLES / 2]]
}

/// Moves every element for which `is_nan` holds to the tail of `arr` and returns the
/// length of the NaN-free prefix.
fn move_nans_to_end<T: Element>(arr: &mut [T], is_nan: impl Fn(T) -> bool) -> usize {
    let mut end = arr.len();
    let mut i = 0;
    while i < end {
        if is_nan(arr[i]) {
            end -= 1;
            arr.swap(i, end);
        } else {
            i += 1;
        }
    }
    if end < arr.len() {
        trace!("moved {} NaN values to the tail", arr.len() - end);
    }
    end
}
