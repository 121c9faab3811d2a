#![forbid(unsafe_code)]

//! Binary open/closed state of a card.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The authoritative logical state of a card.
///
/// Distinct from the card's position: visibility is the settled or requested
/// state, position is the continuous value converging toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Visibility {
    /// Fully shown; resting position 0.
    Open,
    /// Fully hidden; resting position equals the axis extent.
    Closed,
}

impl Visibility {
    /// `true` maps to [`Open`](Self::Open).
    #[inline]
    #[must_use]
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Where a settled card with this visibility sits for the given extent.
    #[inline]
    #[must_use]
    pub fn resting_position(self, extent: f64) -> f64 {
        match self {
            Self::Open => 0.0,
            Self::Closed => extent.max(0.0),
        }
    }

    /// Progress value of a settled card: 1 when open, 0 when closed.
    #[inline]
    #[must_use]
    pub fn as_progress(self) -> f64 {
        match self {
            Self::Open => 1.0,
            Self::Closed => 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}
