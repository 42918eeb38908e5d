//! Core traits and types for lanesort.
//!
//! This module defines:
//! - [`Element`]: The scalar types that can be partitioned and sorted.
//! - [`LaneOps`]: The lane operation policy every vector batch type implements.
//! - [`Split`]: The result of a partition call.
//! - [`compare_exchange`] and [`cmp_merge`]: Two-register building blocks for merging networks.

use std::cmp::Ordering;
use std::fmt::Debug;

/// A scalar type that can be stored in a vector lane.
///
/// `MIN_VALUE` and `MAX_VALUE` are the identity values of the running
/// maximum and minimum accumulators respectively.
pub trait Element: Copy + PartialOrd + Debug {
    const MIN_VALUE: Self;
    const MAX_VALUE: Self;

    /// Total order used by the scalar fallbacks.
    ///
    /// Values that are neither less nor greater than each other compare equal, which
    /// matches how the vector compare routes them (both to the greater-or-equal side).
    #[inline(always)]
    fn order(&self, other: &Self) -> Ordering {
        if self < other {
            Ordering::Less
        } else if other < self {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

macro_rules! impl_element {
    ($($t:ty => $min:expr, $max:expr;)*) => {
        $(
            impl Element for $t {
                const MIN_VALUE: Self = $min;
                const MAX_VALUE: Self = $max;
            }
        )*
    };
}

impl_element! {
    i8 => i8::MIN, i8::MAX;
    u8 => u8::MIN, u8::MAX;
    i16 => i16::MIN, i16::MAX;
    u16 => u16::MIN, u16::MAX;
    i32 => i32::MIN, i32::MAX;
    u32 => u32::MIN, u32::MAX;
    i64 => i64::MIN, i64::MAX;
    u64 => u64::MIN, u64::MAX;
    f32 => f32::NEG_INFINITY, f32::INFINITY;
    f64 => f64::NEG_INFINITY, f64::INFINITY;
}

/// Lane operation policy for one element type at one register width.
///
/// A type implementing `LaneOps` is a batch of [`LaneOps::LANES`] elements held in a
/// (possibly emulated) vector register. The partition routines never look at lane
/// values directly, they only go through these operations.
///
/// Loads and compress-stores take slices instead of raw pointers. Callers hand in a
/// sub-slice of exactly the width being read or written, so a cursor mistake turns
/// into a panic instead of an out-of-bounds write.
///
/// # Examples
///
/// ```
/// use lanesort::core::LaneOps;
/// use lanesort::lanes::Lanes;
///
/// type V = Lanes<i32, 4>;
///
/// let batch = V::load(&[5, 1, 7, 3]);
/// let mask = V::ge(batch, V::broadcast(4));
/// assert_eq!(V::popcount(mask), 2);
///
/// let mut out = [0; 2];
/// V::compress_store(&mut out, mask, batch);
/// assert_eq!(out, [5, 7]);
/// ```
pub trait LaneOps: Copy + Debug {
    type Elem: Element;
    type Mask: Copy + Debug;

    /// Number of elements in one batch.
    const LANES: usize;

    /// Replicates one scalar across all lanes.
    fn broadcast(value: Self::Elem) -> Self;

    /// Unaligned full-width load from the first `LANES` elements of `src`.
    fn load(src: &[Self::Elem]) -> Self;

    /// Full-width store into the first `LANES` elements of `dst`.
    fn store(batch: Self, dst: &mut [Self::Elem]);

    /// Per-lane `!(a < b)`: the exact complement of the scalar strict-less relation.
    fn ge(a: Self, b: Self) -> Self::Mask;

    fn min(a: Self, b: Self) -> Self;
    fn max(a: Self, b: Self) -> Self;

    /// Per lane: `b` where `mask` is set, else `a`.
    fn mask_mov(a: Self, mask: Self::Mask, b: Self) -> Self;

    /// Builds a mask from the low `LANES` bits of `bits` (bit `i` selects lane `i`).
    fn mask_from_bits(bits: u64) -> Self::Mask;

    fn not_mask(mask: Self::Mask) -> Self::Mask;
    fn popcount(mask: Self::Mask) -> usize;

    /// Writes the lanes selected by `mask`, packed contiguously from `dst[0]`, in lane order.
    ///
    /// `dst` must hold at least `popcount(mask)` elements.
    fn compress_store(dst: &mut [Self::Elem], mask: Self::Mask, batch: Self);

    fn reduce_min(batch: Self) -> Self::Elem;
    fn reduce_max(batch: Self) -> Self::Elem;
}

/// Result of partitioning a segment around a pivot.
///
/// Every element before `index` compares less than the pivot, every element from
/// `index` onward does not. `min` and `max` are the smallest and largest values seen
/// in the segment; for an empty segment they are `Element::MAX_VALUE` and
/// `Element::MIN_VALUE`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split<T> {
    pub index: usize,
    pub min: T,
    pub max: T,
}

/// Compare and exchange two registers: `a` receives the lane-wise minimum and `b` the
/// lane-wise maximum.
#[inline(always)]
pub fn compare_exchange<V: LaneOps>(a: &mut V, b: &mut V) {
    let temp = *a;
    *a = V::min(*a, *b);
    *b = V::max(temp, *b);
}

/// Merges two registers lane by lane: the maximum where `mask` is set, the minimum
/// elsewhere.
#[inline(always)]
pub fn cmp_merge<V: LaneOps>(in1: V, in2: V, mask: V::Mask) -> V {
    let min = V::min(in2, in1);
    let max = V::max(in2, in1);
    V::mask_mov(min, mask, max)
}
