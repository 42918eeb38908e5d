//! Portable lane policy.
//!
//! [`Lanes<T, N>`] emulates an `N`-lane vector register with a plain array and a `u64`
//! bit mask. It is the policy used on targets without a native implementation and the
//! reference the native policies are tested against.

use crate::core::{Element, LaneOps};
use std::array;

/// An `N`-lane batch of `T`, `1 <= N <= 64`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

pub type I8x64 = Lanes<i8, 64>;
pub type U8x64 = Lanes<u8, 64>;
pub type I16x32 = Lanes<i16, 32>;
pub type U16x32 = Lanes<u16, 32>;
pub type I32x16 = Lanes<i32, 16>;
pub type U32x16 = Lanes<u32, 16>;
pub type F32x16 = Lanes<f32, 16>;
pub type I64x8 = Lanes<i64, 8>;
pub type U64x8 = Lanes<u64, 8>;
pub type F64x8 = Lanes<f64, 8>;

impl<T, const N: usize> Lanes<T, N> {
    const FULL_MASK: u64 = if N == 64 { u64::MAX } else { (1u64 << N) - 1 };
}

impl<T: Element, const N: usize> LaneOps for Lanes<T, N> {
    type Elem = T;
    type Mask = u64;

    const LANES: usize = {
        assert!(N >= 1 && N <= 64, "a lane mask holds at most 64 lanes");
        N
    };

    #[inline(always)]
    fn broadcast(value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn load(src: &[T]) -> Self {
        let src = &src[..Self::LANES];
        Self(array::from_fn(|i| src[i]))
    }

    #[inline(always)]
    fn store(batch: Self, dst: &mut [T]) {
        dst[..Self::LANES].copy_from_slice(&batch.0);
    }

    #[inline(always)]
    fn ge(a: Self, b: Self) -> u64 {
        a.0.iter()
            .zip(b.0.iter())
            .enumerate()
            .fold(0, |mask, (i, (x, y))| if x < y { mask } else { mask | (1u64 << i) })
    }

    // Unordered lanes take `b`, like `vminps`/`vmaxps`.
    #[inline(always)]
    fn min(a: Self, b: Self) -> Self {
        Self(array::from_fn(|i| if a.0[i] < b.0[i] { a.0[i] } else { b.0[i] }))
    }

    #[inline(always)]
    fn max(a: Self, b: Self) -> Self {
        Self(array::from_fn(|i| if b.0[i] < a.0[i] { a.0[i] } else { b.0[i] }))
    }

    #[inline(always)]
    fn mask_mov(a: Self, mask: u64, b: Self) -> Self {
        Self(array::from_fn(|i| if (mask >> i) & 1 == 1 { b.0[i] } else { a.0[i] }))
    }

    #[inline(always)]
    fn mask_from_bits(bits: u64) -> u64 {
        bits & Self::FULL_MASK
    }

    #[inline(always)]
    fn not_mask(mask: u64) -> u64 {
        !mask & Self::FULL_MASK
    }

    #[inline(always)]
    fn popcount(mask: u64) -> usize {
        mask.count_ones() as usize
    }

    #[inline(always)]
    fn compress_store(dst: &mut [T], mask: u64, batch: Self) {
        let mut out = 0;
        for (i, &value) in batch.0.iter().enumerate() {
            if (mask >> i) & 1 == 1 {
                dst[out] = value;
                out += 1;
            }
        }
    }

    #[inline(always)]
    fn reduce_min(batch: Self) -> T {
        batch.0[1..]
            .iter()
            .fold(batch.0[0], |acc, &x| if x < acc { x } else { acc })
    }

    #[inline(always)]
    fn reduce_max(batch: Self) -> T {
        batch.0[1..]
            .iter()
            .fold(batch.0[0], |acc, &x| if acc < x { x } else { acc })
    }
}
