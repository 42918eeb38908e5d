//! Native AVX-512 lane policies.
//!
//! Only compiled when `avx512f` is enabled for the whole build
//! (e.g. `RUSTFLAGS="-C target-cpu=native"` on a Skylake-X or newer machine).

use crate::core::LaneOps;
use std::arch::x86_64::{
    __m512i, __mmask8, __mmask16, _mm512_cmpge_epi32_mask, _mm512_cmpge_epi64_mask,
    _mm512_loadu_epi32, _mm512_loadu_epi64, _mm512_mask_compressstoreu_epi32,
    _mm512_mask_compressstoreu_epi64, _mm512_mask_mov_epi32, _mm512_mask_mov_epi64,
    _mm512_max_epi32, _mm512_max_epi64, _mm512_min_epi32, _mm512_min_epi64,
    _mm512_reduce_max_epi32, _mm512_reduce_max_epi64, _mm512_reduce_min_epi32,
    _mm512_reduce_min_epi64, _mm512_set1_epi32, _mm512_set1_epi64, _mm512_storeu_epi32,
    _mm512_storeu_epi64,
};

/// Sixteen `i32` lanes in one `zmm` register.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct ZmmI32(__m512i);

/// Eight `i64` lanes in one `zmm` register.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct ZmmI64(__m512i);

impl LaneOps for ZmmI32 {
    type Elem = i32;
    type Mask = __mmask16;

    const LANES: usize = 16;

    #[inline(always)]
    fn broadcast(value: i32) -> Self {
        unsafe { Self(_mm512_set1_epi32(value)) }
    }

    #[inline(always)]
    fn load(src: &[i32]) -> Self {
        let src = &src[..Self::LANES];
        // Safety: `src` holds exactly 16 readable elements.
        unsafe { Self(_mm512_loadu_epi32(src.as_ptr())) }
    }

    #[inline(always)]
    fn store(batch: Self, dst: &mut [i32]) {
        let dst = &mut dst[..Self::LANES];
        // Safety: `dst` holds exactly 16 writable elements.
        unsafe { _mm512_storeu_epi32(dst.as_mut_ptr(), batch.0) }
    }

    #[inline(always)]
    fn ge(a: Self, b: Self) -> __mmask16 {
        unsafe { _mm512_cmpge_epi32_mask(a.0, b.0) }
    }

    #[inline(always)]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_min_epi32(a.0, b.0)) }
    }

    #[inline(always)]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_max_epi32(a.0, b.0)) }
    }

    #[inline(always)]
    fn mask_mov(a: Self, mask: __mmask16, b: Self) -> Self {
        unsafe { Self(_mm512_mask_mov_epi32(a.0, mask, b.0)) }
    }

    #[inline(always)]
    fn mask_from_bits(bits: u64) -> __mmask16 {
        bits as __mmask16
    }

    #[inline(always)]
    fn not_mask(mask: __mmask16) -> __mmask16 {
        !mask
    }

    #[inline(always)]
    fn popcount(mask: __mmask16) -> usize {
        mask.count_ones() as usize
    }

    #[inline(always)]
    fn compress_store(dst: &mut [i32], mask: __mmask16, batch: Self) {
        let dst = &mut dst[..Self::popcount(mask)];
        // Safety: the instruction writes exactly `popcount(mask)` elements.
        unsafe { _mm512_mask_compressstoreu_epi32(dst.as_mut_ptr().cast(), mask, batch.0) }
    }

    #[inline(always)]
    fn reduce_min(batch: Self) -> i32 {
        unsafe { _mm512_reduce_min_epi32(batch.0) }
    }

    #[inline(always)]
    fn reduce_max(batch: Self) -> i32 {
        unsafe { _mm512_reduce_max_epi32(batch.0) }
    }
}

impl LaneOps for ZmmI64 {
    type Elem = i64;
    type Mask = __mmask8;

    const LANES: usize = 8;

    #[inline(always)]
    fn broadcast(value: i64) -> Self {
        unsafe { Self(_mm512_set1_epi64(value)) }
    }

    #[inline(always)]
    fn load(src: &[i64]) -> Self {
        let src = &src[..Self::LANES];
        // Safety: `src` holds exactly 8 readable elements.
        unsafe { Self(_mm512_loadu_epi64(src.as_ptr())) }
    }

    #[inline(always)]
    fn store(batch: Self, dst: &mut [i64]) {
        let dst = &mut dst[..Self::LANES];
        // Safety: `dst` holds exactly 8 writable elements.
        unsafe { _mm512_storeu_epi64(dst.as_mut_ptr(), batch.0) }
    }

    #[inline(always)]
    fn ge(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmpge_epi64_mask(a.0, b.0) }
    }

    #[inline(always)]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_min_epi64(a.0, b.0)) }
    }

    #[inline(always)]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_max_epi64(a.0, b.0)) }
    }

    #[inline(always)]
    fn mask_mov(a: Self, mask: __mmask8, b: Self) -> Self {
        unsafe { Self(_mm512_mask_mov_epi64(a.0, mask, b.0)) }
    }

    #[inline(always)]
    fn mask_from_bits(bits: u64) -> __mmask8 {
        bits as __mmask8
    }

    #[inline(always)]
    fn not_mask(mask: __mmask8) -> __mmask8 {
        !mask
    }

    #[inline(always)]
    fn popcount(mask: __mmask8) -> usize {
        mask.count_ones() as usize
    }

    #[inline(always)]
    fn compress_store(dst: &mut [i64], mask: __mmask8, batch: Self) {
        let dst = &mut dst[..Self::popcount(mask)];
        // Safety: the instruction writes exactly `popcount(mask)` elements.
        unsafe { _mm512_mask_compressstoreu_epi64(dst.as_mut_ptr().cast(), mask, batch.0) }
    }

    #[inline(always)]
    fn reduce_min(batch: Self) -> i64 {
        unsafe { _mm512_reduce_min_epi64(batch.0) }
    }

    #[inline(always)]
    fn reduce_max(batch: Self) -> i64 {
        unsafe { _mm512_reduce_max_epi64(batch.0) }
    }
}
