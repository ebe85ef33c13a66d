// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use core::fmt;

/// A grid configuration value was rejected.
///
/// Setters that return this error leave the previous configuration untouched
/// and do not notify listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridConfigError {
    /// A stride of zero leaves the number of layers per cell undefined.
    ZeroStride,
    /// A raw grid extent was neither the auto sentinel (`-1`) nor a positive
    /// count.
    InvalidExtent(i64),
    /// A cell extent or spacing was negative or not finite.
    InvalidFrame,
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStride => write!(f, "grid stride must be non-zero"),
            Self::InvalidExtent(raw) => {
                write!(f, "grid extent {raw} is neither -1 (auto) nor positive")
            }
            Self::InvalidFrame => {
                write!(f, "cell extent and spacing must be finite and non-negative")
            }
        }
    }
}

impl core::error::Error for GridConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_extent() {
        let msg = GridConfigError::InvalidExtent(-3).to_string();
        assert!(msg.contains("-3"), "got: {msg}");
    }

    #[test]
    fn display_zero_stride() {
        assert_eq!(
            GridConfigError::ZeroStride.to_string(),
            "grid stride must be non-zero"
        );
    }
}
