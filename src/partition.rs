//! Double-ended, vector-batched in-place partitioning.
//!
//! This module implements the partition step of a vectorized quicksort:
//! - [`partition_batch`]: Partitions one loaded batch into the two write fronts.
//! - [`partition`]: Full partition of a segment, one batch per step.
//! - [`partition_unrolled`]: Same, `U` batches per step, for large segments.
//!
//! The algorithm keeps two write fronts, `l_store` growing from the left and `r_end`
//! (exclusive) shrinking from the right. The first and last batch (or batch group) are
//! loaded into registers before anything is written, which frees exactly enough room for
//! the compress-stores of the next batch. Each further batch is read from whichever end
//! has less free space left, so the span `[l_store, r_end)` handed to [`partition_batch`]
//! never gets narrower than one batch and no store ever lands on data that has not been
//! read yet.
//!
//! Elements comparing less than the pivot go left, everything else (ties included) goes
//! right. The partition is not stable.

use crate::core::{Element, LaneOps, Split};
use crate::error::PartitionError;
use std::array;

/// Largest supported unroll factor.
pub const MAX_UNROLL: usize = 8;

/// Partitions one batch and returns how many of its lanes compared greater or equal to
/// the pivot.
///
/// The less-than lanes are compress-stored starting at `left`, the greater-or-equal lanes
/// are compress-stored ending at `right`. The batch is folded into `min_vec` and `max_vec`.
///
/// The caller advances `left` by `LANES - count` and retracts `right` by `count`.
///
/// # Panics
///
/// If `right - left < V::LANES` or `right > arr.len()`.
#[inline(always)]
pub fn partition_batch<V: LaneOps>(
    arr: &mut [V::Elem],
    left: usize,
    right: usize,
    curr_vec: V,
    pivot_vec: V,
    min_vec: &mut V,
    max_vec: &mut V,
) -> usize {
    debug_assert!(right - left >= V::LANES);
    let ge_mask = V::ge(curr_vec, pivot_vec);
    let amount_ge_pivot = V::popcount(ge_mask);
    V::compress_store(
        &mut arr[left..left + (V::LANES - amount_ge_pivot)],
        V::not_mask(ge_mask),
        curr_vec,
    );
    V::compress_store(
        &mut arr[right - amount_ge_pivot..right],
        ge_mask,
        curr_vec,
    );
    *min_vec = V::min(curr_vec, *min_vec);
    *max_vec = V::max(curr_vec, *max_vec);
    amount_ge_pivot
}

/// Scalar pass that shrinks `[left, right)` until its length is a multiple of `block`.
///
/// Every visited element is folded into `smallest`/`biggest` and moved to its final side.
#[inline(always)]
fn trim_to_multiple<T: Element>(
    arr: &mut [T],
    left: &mut usize,
    right: &mut usize,
    block: usize,
    pivot: T,
    smallest: &mut T,
    biggest: &mut T,
) {
    for _ in 0..(*right - *left) % block {
        let value = arr[*left];
        if value < *smallest {
            *smallest = value;
        }
        if *biggest < value {
            *biggest = value;
        }
        if value < pivot {
            *left += 1;
        } else {
            *right -= 1;
            arr.swap(*left, *right);
        }
    }
}

/// Partitions `arr[left..right]` around `pivot`, one vector batch per step.
///
/// Returns the split index together with the minimum and maximum of the segment.
///
/// # Panics
///
/// If `left > right` or `right > arr.len()`.
///
/// # Examples
///
/// ```
/// use lanesort::lanes::Lanes;
/// use lanesort::partition::partition;
///
/// let mut data = [5, 3, 8, 1, 9, 2, 7, 4, 6, 0];
/// let split = partition::<Lanes<i32, 4>>(&mut data, 0, 10, 5);
///
/// assert_eq!(split.index, 5);
/// assert_eq!((split.min, split.max), (0, 9));
/// assert!(data[..5].iter().all(|&x| x < 5));
/// assert!(data[5..].iter().all(|&x| x >= 5));
/// ```
pub fn partition<V: LaneOps>(
    arr: &mut [V::Elem],
    mut left: usize,
    mut right: usize,
    pivot: V::Elem,
) -> Split<V::Elem> {
    assert!(left <= right && right <= arr.len());
    let lanes = V::LANES;
    let mut smallest = <V::Elem as Element>::MAX_VALUE;
    let mut biggest = <V::Elem as Element>::MIN_VALUE;

    trim_to_multiple(
        arr,
        &mut left,
        &mut right,
        lanes,
        pivot,
        &mut smallest,
        &mut biggest,
    );

    if left == right {
        return Split {
            index: left,
            min: smallest,
            max: biggest,
        };
    }

    let pivot_vec = V::broadcast(pivot);
    let mut min_vec = V::broadcast(smallest);
    let mut max_vec = V::broadcast(biggest);

    if right - left == lanes {
        let vec = V::load(&arr[left..right]);
        let amount_ge_pivot = partition_batch(
            arr,
            left,
            right,
            vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
        );
        return Split {
            index: left + (lanes - amount_ge_pivot),
            min: V::reduce_min(min_vec),
            max: V::reduce_max(max_vec),
        };
    }

    // The first and last batch are partitioned at the end.
    let vec_left = V::load(&arr[left..left + lanes]);
    let vec_right = V::load(&arr[right - lanes..right]);
    let mut r_end = right;
    let mut l_store = left;
    left += lanes;
    right -= lanes;

    while right != left {
        // Read from the side with less room left to write into.
        let curr_vec = if r_end - right < left - l_store {
            right -= lanes;
            V::load(&arr[right..right + lanes])
        } else {
            let vec = V::load(&arr[left..left + lanes]);
            left += lanes;
            vec
        };
        let amount_ge_pivot = partition_batch(
            arr,
            l_store,
            r_end,
            curr_vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
        );
        r_end -= amount_ge_pivot;
        l_store += lanes - amount_ge_pivot;
    }

    for vec in [vec_left, vec_right] {
        let amount_ge_pivot = partition_batch(
            arr,
            l_store,
            r_end,
            vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
        );
        r_end -= amount_ge_pivot;
        l_store += lanes - amount_ge_pivot;
    }

    Split {
        index: l_store,
        min: V::reduce_min(min_vec),
        max: V::reduce_max(max_vec),
    }
}

/// Partitions `arr[left..right]` around `pivot`, `U` vector batches per step.
///
/// Segments of at most `2 * U * LANES` elements are handed to [`partition`]. The result
/// is the same split index as [`partition`] would produce; only the order within each
/// side may differ.
///
/// `U` must be in `1..=MAX_UNROLL`; anything else fails to compile.
///
/// # Panics
///
/// If `left > right` or `right > arr.len()`.
pub fn partition_unrolled<V: LaneOps, const U: usize>(
    arr: &mut [V::Elem],
    mut left: usize,
    mut right: usize,
    pivot: V::Elem,
) -> Split<V::Elem> {
    const { assert!(U >= 1 && U <= MAX_UNROLL, "unroll factor must be in 1..=8") };
    assert!(left <= right && right <= arr.len());
    let lanes = V::LANES;
    let block = U * lanes;

    if right - left <= 2 * block {
        return partition::<V>(arr, left, right, pivot);
    }

    let mut smallest = <V::Elem as Element>::MAX_VALUE;
    let mut biggest = <V::Elem as Element>::MIN_VALUE;

    trim_to_multiple(
        arr,
        &mut left,
        &mut right,
        block,
        pivot,
        &mut smallest,
        &mut biggest,
    );

    let pivot_vec = V::broadcast(pivot);
    let mut min_vec = V::broadcast(smallest);
    let mut max_vec = V::broadcast(biggest);

    // At least 2 * U batches remain; the outer U on each side are partitioned at the end.
    let vec_left: [V; U] = array::from_fn(|ii| {
        let start = left + ii * lanes;
        V::load(&arr[start..start + lanes])
    });
    let vec_right: [V; U] = array::from_fn(|ii| {
        let start = right - lanes * (U - ii);
        V::load(&arr[start..start + lanes])
    });
    let mut r_end = right;
    let mut l_store = left;
    left += block;
    right -= block;

    while right != left {
        let curr_vec: [V; U] = if r_end - right < left - l_store {
            right -= block;
            let base = right;
            array::from_fn(|ii| {
                let start = base + ii * lanes;
                V::load(&arr[start..start + lanes])
            })
        } else {
            let base = left;
            left += block;
            array::from_fn(|ii| {
                let start = base + ii * lanes;
                V::load(&arr[start..start + lanes])
            })
        };
        for vec in curr_vec {
            let amount_ge_pivot = partition_batch(
                arr,
                l_store,
                r_end,
                vec,
                pivot_vec,
                &mut min_vec,
                &mut max_vec,
            );
            l_store += lanes - amount_ge_pivot;
            r_end -= amount_ge_pivot;
        }
    }

    for vec in vec_left.into_iter().chain(vec_right) {
        let amount_ge_pivot = partition_batch(
            arr,
            l_store,
            r_end,
            vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
        );
        l_store += lanes - amount_ge_pivot;
        r_end -= amount_ge_pivot;
    }

    Split {
        index: l_store,
        min: V::reduce_min(min_vec),
        max: V::reduce_max(max_vec),
    }
}

fn check_segment(len: usize, left: usize, right: usize) -> Result<(), PartitionError> {
    if left <= right && right <= len {
        Ok(())
    } else {
        Err(PartitionError::InvalidSegment { left, right, len })
    }
}

/// Like [`partition`], but rejects an invalid segment instead of panicking.
pub fn try_partition<V: LaneOps>(
    arr: &mut [V::Elem],
    left: usize,
    right: usize,
    pivot: V::Elem,
) -> Result<Split<V::Elem>, PartitionError> {
    check_segment(arr.len(), left, right)?;
    Ok(partition::<V>(arr, left, right, pivot))
}

/// Like [`partition_unrolled`], but rejects an invalid segment instead of panicking.
pub fn try_partition_unrolled<V: LaneOps, const U: usize>(
    arr: &mut [V::Elem],
    left: usize,
    right: usize,
    pivot: V::Elem,
) -> Result<Split<V::Elem>, PartitionError> {
    check_segment(arr.len(), left, right)?;
    Ok(partition_unrolled::<V, U>(arr, left, right, pivot))
}
