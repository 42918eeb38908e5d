//! # Lanesort
//!
//! `lanesort` is an in-place quicksort/quickselect toolkit whose partition step works on
//! whole vector registers instead of single elements.
//!
//! The partition follows the AVX-512 scheme of [Bramas (2017)](https://arxiv.org/abs/1704.08579)
//! and [Blacher et al. (2021)](https://drops.dagstuhl.de/opus/volltexte/2021/13775/):
//! a batch is compared against the pivot, the less-than lanes are compress-stored at a
//! left write cursor and the greater-or-equal lanes at a right write cursor, and batches
//! are always read from the end with less free space so the two write fronts never
//! overtake unread data.
//!
//! ## Key Features
//!
//! - **Lane policies**: The [`LaneOps`] trait abstracts compare, min/max, load, compress-store
//!   and reductions for one element type at one register width. [`lanes::Lanes`] is a
//!   portable implementation; with `avx512f` enabled, `i32` and `i64` use native `zmm` registers.
//! - **Unrolling**: [`partition::partition_unrolled`] processes `U` batches per step
//!   (`1 <= U <= 8`, checked at compile time).
//! - **Min/max tracking**: Every partition reports the segment's extremes, which the drivers
//!   use to stop recursing into runs of equal values.
//! - **Bounds-checked cursors**: All reads and writes go through sub-slices, so a broken
//!   invariant panics instead of corrupting memory.
//!
//! ## Usage
//!
//! ```rust
//! use lanesort::prelude::*;
//!
//! let mut data: Vec<u32> = (0..1000).rev().collect();
//! qsort(&mut data);
//! assert!(data.windows(2).all(|w| w[0] <= w[1]));
//!
//! let mut data: Vec<i64> = (0..1000).rev().collect();
//! partial_sort(&mut data, 10);
//! assert_eq!(&data[..10], &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! ```
//!
//! ### Partitioning directly
//!
//! ```rust
//! use lanesort::lanes::I32x16;
//! use lanesort::partition::partition_unrolled;
//!
//! let mut data: Vec<i32> = (0..500).map(|i| (i * 7919) % 500).collect();
//! let split = partition_unrolled::<I32x16, 2>(&mut data, 0, 500, 250);
//!
//! assert_eq!(split.index, 250);
//! assert_eq!((split.min, split.max), (0, 499));
//! ```

pub mod algo;
#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
pub mod avx512;
pub mod core;
pub mod error;
pub mod lanes;
pub mod partition;

pub use crate::algo::{Sortable, partial_sort, qselect, qsort, try_partial_sort, try_qselect};
pub use crate::core::{Element, LaneOps, Split};
pub use crate::error::PartitionError;

pub mod prelude {
    pub use crate::algo::{Sortable, partial_sort, qselect, qsort};
    pub use crate::core::{Element, LaneOps, Split};
    pub use crate::partition::{partition, partition_unrolled};
}
