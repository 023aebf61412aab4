// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Null and stride helpers*
//!
//! Small helpers shared by the marshaling layer and the solve dispatcher.

use minarrow::Bitmask;

/// Determines whether nulls are present given an optional null count and mask reference.
/// Avoids computing mask cardinality.
#[inline(always)]
pub fn has_nulls(null_count: Option<usize>, mask: Option<&Bitmask>) -> bool {
    match null_count {
        Some(n) => n > 0,
        None => mask.is_some(),
    }
}

/// Copies the top-left `rows x cols` block of a column-major buffer with leading
/// dimension `src_ld` into `dst` with leading dimension `dst_ld`.
///
/// Rows of `dst` beyond `rows` are left untouched. Used to pad right-hand sides up
/// to the row count a factorisation expects, and to crop its solution back out.
///
/// # Panics
/// When `rows` exceeds either leading dimension or a buffer is too short.
#[inline]
pub fn change_stride<T: Copy>(
    src: &[T],
    src_ld: usize,
    dst: &mut [T],
    dst_ld: usize,
    rows: usize,
    cols: usize,
) {
    assert!(rows <= src_ld && rows <= dst_ld, "change_stride: rows exceed leading dimension");
    for j in 0..cols {
        let s = j * src_ld;
        let d = j * dst_ld;
        dst[d..d + rows].copy_from_slice(&src[s..s + rows]);
    }
}
