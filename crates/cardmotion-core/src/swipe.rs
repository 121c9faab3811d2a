#![forbid(unsafe_code)]

//! Swipe classification: decides where a released drag settles.
//!
//! Positive distance and velocity point toward CLOSED (away from the open
//! position at 0). Rules are applied in order and the first match wins:
//!
//! 1. **Flick**: `|distance| > noise_floor` and `|velocity| > velocity`.
//!    Velocity sign decides: negative opens, anything else closes.
//! 2. **Drag**: `|distance| > distance`. With velocity exactly zero the
//!    distance sign decides; otherwise the velocity sign decides, even when
//!    the velocity is tiny.
//! 3. **Snap back**: keep the current visibility.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::visibility::Visibility;

/// Default flick velocity threshold (layout px/s).
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 500.0;
/// Default decisive drag distance (layout px).
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 60.0;
/// Default minimum distance for a flick to count.
pub const DEFAULT_NOISE_FLOOR: f64 = 5.0;

/// Thresholds for [`classify_swipe`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SwipeThresholds {
    pub velocity: f64,
    pub distance: f64,
    pub noise_floor: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY_THRESHOLD,
            distance: DEFAULT_DISTANCE_THRESHOLD,
            noise_floor: DEFAULT_NOISE_FLOOR,
        }
    }
}

impl SwipeThresholds {
    /// Validation errors, each prefixed with `field`.
    #[must_use]
    pub fn validate(&self, field: &str) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("velocity", self.velocity),
            ("distance", self.distance),
            ("noise_floor", self.noise_floor),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "{field}.{name} must be finite and >= 0, got {value}"
                ));
            }
        }
        errors
    }
}

/// Outcome of a release, tagged with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Flick(Visibility),
    Drag(Visibility),
    SnapBack(Visibility),
}

impl SwipeDecision {
    /// The visibility the card should settle to.
    #[inline]
    #[must_use]
    pub fn target(self) -> Visibility {
        match self {
            Self::Flick(v) | Self::Drag(v) | Self::SnapBack(v) => v,
        }
    }

    #[must_use]
    pub fn is_decisive(self) -> bool {
        !matches!(self, Self::SnapBack(_))
    }
}

fn by_sign(value: f64) -> Visibility {
    if value < 0.0 {
        Visibility::Open
    } else {
        Visibility::Closed
    }
}

/// Classify a drag release.
#[must_use]
pub fn classify_swipe(
    distance: f64,
    velocity: f64,
    current: Visibility,
    thresholds: &SwipeThresholds,
) -> SwipeDecision {
    if distance.abs() > thresholds.noise_floor && velocity.abs() > thresholds.velocity {
        return SwipeDecision::Flick(by_sign(velocity));
    }
    if distance.abs() > thresholds.distance {
        let decided = if velocity == 0.0 {
            by_sign(distance)
        } else {
            by_sign(velocity)
        };
        return SwipeDecision::Drag(decided);
    }
    SwipeDecision::SnapBack(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(distance: f64, velocity: f64, current: Visibility) -> SwipeDecision {
        classify_swipe(distance, velocity, current, &SwipeThresholds::default())
    }

    #[test]
    fn long_drag_without_velocity_follows_distance() {
        assert_eq!(
            classify(100.0, 0.0, Visibility::Open),
            SwipeDecision::Drag(Visibility::Closed)
        );
        assert_eq!(
            classify(-100.0, 0.0, Visibility::Closed),
            SwipeDecision::Drag(Visibility::Open)
        );
    }

    #[test]
    fn flick_wins_before_distance_threshold() {
        assert_eq!(
            classify(10.0, 600.0, Visibility::Open),
            SwipeDecision::Flick(Visibility::Closed)
        );
        assert_eq!(
            classify(10.0, -600.0, Visibility::Closed),
            SwipeDecision::Flick(Visibility::Open)
        );
    }

    #[test]
    fn flick_direction_ignores_distance_sign() {
        assert_eq!(
            classify(80.0, -900.0, Visibility::Closed),
            SwipeDecision::Flick(Visibility::Open)
        );
    }

    #[test]
    fn fast_motion_inside_noise_floor_is_not_a_flick() {
        assert_eq!(
            classify(4.0, 2000.0, Visibility::Open),
            SwipeDecision::SnapBack(Visibility::Open)
        );
    }

    #[test]
    fn small_velocity_below_threshold_decides_by_sign() {
        // Drag of 100 toward closed, but the finger was drifting back.
        assert_eq!(
            classify(100.0, -0.5, Visibility::Open),
            SwipeDecision::Drag(Visibility::Open)
        );
        assert_eq!(
            classify(-100.0, 0.5, Visibility::Closed),
            SwipeDecision::Drag(Visibility::Closed)
        );
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        for current in [Visibility::Open, Visibility::Closed] {
            let decision = classify(40.0, 100.0, current);
            assert_eq!(decision, SwipeDecision::SnapBack(current));
            assert!(!decision.is_decisive());
        }
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(
            classify(60.0, 0.0, Visibility::Open),
            SwipeDecision::SnapBack(Visibility::Open)
        );
        assert_eq!(
            classify(30.0, 500.0, Visibility::Open),
            SwipeDecision::SnapBack(Visibility::Open)
        );
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = SwipeThresholds {
            velocity: 100.0,
            distance: 20.0,
            noise_floor: 1.0,
        };
        assert_eq!(
            classify_swipe(25.0, 0.0, Visibility::Open, &thresholds).target(),
            Visibility::Closed
        );
        assert_eq!(
            classify_swipe(2.0, -150.0, Visibility::Closed, &thresholds),
            SwipeDecision::Flick(Visibility::Open)
        );
    }

    #[test]
    fn validation_reports_each_bad_field() {
        let thresholds = SwipeThresholds {
            velocity: -1.0,
            distance: f64::NAN,
            noise_floor: 5.0,
        };
        let errors = thresholds.validate("swipe");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("swipe.velocity"));
        assert!(errors[1].starts_with("swipe.distance"));
        assert!(SwipeThresholds::default().validate("swipe").is_empty());
    }
}
