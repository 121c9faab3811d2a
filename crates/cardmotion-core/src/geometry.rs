#![forbid(unsafe_code)]

//! Axis selection and layout extents.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The single dimension along which the card translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Translate along x; the extent is the layout width.
    #[default]
    Horizontal,
    /// Translate along y; the extent is the layout height.
    Vertical,
}

impl Axis {
    /// Pick the component of an (x, y) pair that lies on this axis.
    #[inline]
    #[must_use]
    pub fn select(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }
}

/// Measured size of the card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    /// Width in layout pixels.
    pub width: f64,
    /// Height in layout pixels.
    pub height: f64,
}

impl Layout {
    /// Unmeasured layout.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a layout. Negative or non-finite sizes are stored as 0.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Length along `axis`, never negative.
    #[inline]
    #[must_use]
    pub fn extent(&self, axis: Axis) -> f64 {
        sanitize(axis.select(self.width, self.height))
    }

    /// Whether both dimensions are non-zero.
    #[inline]
    #[must_use]
    pub fn is_measured(&self) -> bool {
        sanitize(self.width) > 0.0 && sanitize(self.height) > 0.0
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
