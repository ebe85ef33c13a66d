// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer helpers for grid sizing.

/// Smallest `r` with `r * r >= n`.
#[inline]
pub(crate) const fn ceil_sqrt(n: usize) -> usize {
    let r = n.isqrt();
    if r * r < n { r + 1 } else { r }
}
