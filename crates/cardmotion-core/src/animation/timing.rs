#![forbid(unsafe_code)]

//! Timed transition: eased interpolation over a fixed duration.
//!
//! # Invariants
//!
//! 1. `position()` equals `from` before the first non-zero tick and exactly
//!    `to` once complete.
//! 2. Completion is `elapsed >= duration`; a zero duration completes on the
//!    first tick.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Animation, EasingCurve};

/// Tunables for a timing transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Total duration. Serialized as whole milliseconds (`duration_ms`).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "duration_ms", with = "duration_ms")
    )]
    pub duration: Duration,
    /// Easing curve applied to normalized time.
    pub easing: EasingCurve,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(250),
            easing: EasingCurve::EaseInOut,
        }
    }
}

impl TimingConfig {
    /// Validation errors for this config, each prefixed with `field`.
    #[must_use]
    pub fn validate(&self, field: &str) -> Vec<String> {
        self.easing.validate(&format!("{field}.easing"))
    }
}

/// Eased interpolation from `from` to `to` over a duration.
#[derive(Debug, Clone)]
pub struct Timing {
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingCurve,
    elapsed: Duration,
    position: f64,
    velocity: f64,
}

impl Timing {
    #[must_use]
    pub fn new(from: f64, to: f64, config: &TimingConfig) -> Self {
        Self {
            from,
            to,
            duration: config.duration,
            easing: config.easing,
            elapsed: Duration::ZERO,
            position: from,
            velocity: 0.0,
        }
    }

    /// Time advanced so far (not capped at the duration).
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Normalized time in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.elapsed.is_zero() { 0.0 } else { 1.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Animation for Timing {
    fn tick(&mut self, dt: Duration) {
        if self.is_complete() || dt.is_zero() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);

        let previous = self.position;
        self.position = if self.is_complete() {
            self.to
        } else {
            self.from + (self.to - self.from) * self.easing.apply(self.progress())
        };
        self.velocity = (self.position - previous) / dt.as_secs_f64();
    }

    fn is_complete(&self) -> bool {
        if self.duration.is_zero() {
            !self.elapsed.is_zero()
        } else {
            self.elapsed >= self.duration
        }
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Common timing configurations.
pub mod presets {
    use std::time::Duration;

    use super::TimingConfig;
    use crate::animation::EasingCurve;

    /// Short fade with strong deceleration.
    #[must_use]
    pub fn fade_android() -> TimingConfig {
        TimingConfig {
            duration: Duration::from_millis(350),
            easing: EasingCurve::OutPoly5,
        }
    }

    /// Material-style reveal curve.
    #[must_use]
    pub fn reveal_android() -> TimingConfig {
        TimingConfig {
            duration: Duration::from_millis(425),
            easing: EasingCurve::CubicBezier {
                x1: 0.35,
                y1: 0.45,
                x2: 0.0,
                y2: 1.0,
            },
        }
    }
}
