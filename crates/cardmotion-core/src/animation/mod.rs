#![forbid(unsafe_code)]

//! Transition physics: springs, timed easing, and the run that drives them.
//!
//! Every animation here moves a raw `f64` position (layout pixels) toward a
//! target and reports when it has settled. The caller owns the clock: it
//! passes the frame delta to [`Animation::tick`] once per frame.
//!
//! # Invariants
//!
//! 1. A completed animation never moves again until restarted.
//! 2. Easing curves map 0 to 0 and 1 to 1 exactly, and clamp input to [0, 1].
//! 3. `tick(Duration::ZERO)` never changes the position.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod spring;
pub mod timing;
pub mod transition;

pub use spring::{Spring, SpringConfig};
pub use timing::{Timing, TimingConfig};
pub use transition::{TransitionRun, TransitionSpec};

/// A position animation advanced by explicit frame deltas.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end condition.
    fn is_complete(&self) -> bool;

    /// Current position.
    fn position(&self) -> f64;

    /// Current velocity in units per second.
    fn velocity(&self) -> f64;
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Easing function signature: maps normalized time to normalized progress.
pub type EasingFn = fn(f64) -> f64;

#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

#[must_use]
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

#[must_use]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[must_use]
pub fn ease_in_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Strong deceleration: `1 - (1 - t)^5`.
#[must_use]
pub fn out_poly5(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(5)
}

/// Serializable easing curve selection for timing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EasingCurve {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    OutPoly5,
    /// CSS-style cubic Bézier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl EasingCurve {
    /// Evaluate the curve at normalized time `t`.
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        match *self {
            Self::Linear => linear(t),
            Self::EaseIn => ease_in(t),
            Self::EaseOut => ease_out(t),
            Self::EaseInOut => ease_in_out(t),
            Self::EaseInCubic => ease_in_cubic(t),
            Self::EaseOutCubic => ease_out_cubic(t),
            Self::OutPoly5 => out_poly5(t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Validation errors for this curve, prefixed with `field`.
    #[must_use]
    pub fn validate(&self, field: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if let Self::CubicBezier { x1, y1, x2, y2 } = *self {
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                errors.push(format!("{field}: cubic_bezier control points must be finite"));
            }
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                errors.push(format!(
                    "{field}: cubic_bezier x1/x2 must be in [0, 1], got {x1}/{x2}"
                ));
            }
        }
        errors
    }
}

const BEZIER_NEWTON_ITERATIONS: usize = 8;
const BEZIER_BISECTION_ITERATIONS: usize = 32;
const BEZIER_EPSILON: f64 = 1e-7;

fn bezier_component(a1: f64, a2: f64, s: f64) -> f64 {
    // B(s) = 3(1-s)^2 s a1 + 3(1-s) s^2 a2 + s^3
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_slope(a1: f64, a2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Evaluate a unit cubic Bézier easing at time `t`.
///
/// Solves `x(s) = t` with Newton iterations, falling back to bisection when
/// the slope is too flat, then returns `y(s)`.
#[must_use]
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }

    let mut s = t;
    let mut solved = false;
    for _ in 0..BEZIER_NEWTON_ITERATIONS {
        let err = bezier_component(x1, x2, s) - t;
        if err.abs() < BEZIER_EPSILON {
            solved = true;
            break;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    if !solved || !(0.0..=1.0).contains(&s) {
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = t;
        for _ in 0..BEZIER_BISECTION_ITERATIONS {
            let x = bezier_component(x1, x2, s);
            if (x - t).abs() < BEZIER_EPSILON {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
    }

    bezier_component(y1, y2, s)
}
