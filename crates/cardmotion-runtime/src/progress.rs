#![forbid(unsafe_code)]

//! Progress projection: card position to the normalized value styling reads.
//!
//! Position 0 (fully open) projects to 1, position = extent (fully closed)
//! projects to 0. Until the layout is measured in both dimensions the
//! projector bypasses interpolation and reports the visibility itself.

use cardmotion_core::{Axis, Layout, Visibility};

/// Normalized progress for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// `clamp(1 - position / extent, 0, 1)`.
    Interpolated(f64),
    /// Layout unmeasured: the raw visibility.
    Fallback(Visibility),
}

impl Progress {
    /// Numeric value in [0, 1]. A fallback reports 1 for open, 0 for closed.
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Interpolated(p) => p,
            Self::Fallback(visibility) => visibility.as_progress(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Project `position` onto [0, 1] for the given layout and axis.
#[must_use]
pub fn project_progress(
    position: f64,
    layout: &Layout,
    axis: Axis,
    visibility: Visibility,
) -> Progress {
    let extent = layout.extent(axis);
    if !layout.is_measured() || extent <= 0.0 || !position.is_finite() {
        return Progress::Fallback(visibility);
    }
    Progress::Interpolated((1.0 - position / extent).clamp(0.0, 1.0))
}
