#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation with mass and overshoot
//! clamping.
//!
//! Based on the classical damped spring equation:
//!
//!   m·a = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag. Critical damping is `c = 2√(k·m)`.
//! - **mass** (m): Inertia. Higher = slower, heavier motion.
//! - **overshoot_clamping**: When set, the spring snaps to the target the
//!   moment it would cross it instead of oscillating around it.
//! - **rest_speed_threshold** / **rest_displacement_threshold**: The spring
//!   is at rest once both |velocity| and |position - target| fall below these.
//!
//! # Integration
//!
//! Uses semi-implicit Euler integration. One frame tick is one physics step;
//! internally the frame delta is subdivided into slices of at most 4ms so
//! stiff springs stay stable.
//!
//! # Invariants
//!
//! 1. A spring at rest (`is_complete() == true`) never moves again; a new
//!    run builds a new spring.
//! 2. With overshoot clamping, the position never ends up on the far side of
//!    the target from where the run started. A run that starts on its target
//!    settles on the first slice that leaves it.
//! 3. Stiffness and mass are always positive, damping never negative
//!    (clamped by the builders).
//!
//! # Failure Modes
//!
//! - Zero damping without overshoot clamping oscillates forever; the run
//!   never completes.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Animation;

/// Maximum dt per integration slice (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Minimum mass to keep the acceleration finite.
const MIN_MASS: f64 = 0.001;

/// Tunables for a spring transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    /// Restoring force strength. Default: 100.
    pub stiffness: f64,
    /// Velocity drag. Default: 10.
    pub damping: f64,
    /// Inertia. Default: 1.
    pub mass: f64,
    /// Snap to the target instead of crossing it. Default: false.
    pub overshoot_clamping: bool,
    /// Speed (units/s) under which the spring may rest. Default: 0.001.
    pub rest_speed_threshold: f64,
    /// Distance from target under which the spring may rest. Default: 0.001.
    pub rest_displacement_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            overshoot_clamping: false,
            rest_speed_threshold: 0.001,
            rest_displacement_threshold: 0.001,
        }
    }
}

impl SpringConfig {
    /// Validation errors for this config, each prefixed with `field`.
    #[must_use]
    pub fn validate(&self, field: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            errors.push(format!(
                "{field}.stiffness must be > 0, got {}",
                self.stiffness
            ));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            errors.push(format!("{field}.damping must be >= 0, got {}", self.damping));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            errors.push(format!("{field}.mass must be > 0, got {}", self.mass));
        }
        if !(self.rest_speed_threshold.is_finite() && self.rest_speed_threshold >= 0.0) {
            errors.push(format!(
                "{field}.rest_speed_threshold must be >= 0, got {}",
                self.rest_speed_threshold
            ));
        }
        if !(self.rest_displacement_threshold.is_finite()
            && self.rest_displacement_threshold >= 0.0)
        {
            errors.push(format!(
                "{field}.rest_displacement_threshold must be >= 0, got {}",
                self.rest_displacement_threshold
            ));
        }
        errors
    }

    /// Damping coefficient at which this spring is critically damped.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }
}

/// A damped harmonic oscillator moving a position toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    start: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
    overshoot_clamping: bool,
    rest_speed_threshold: f64,
    rest_displacement_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target` with the
    /// default [`SpringConfig`].
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self::from_config(initial, target, &SpringConfig::default())
    }

    /// Create a spring from a config.
    #[must_use]
    pub fn from_config(initial: f64, target: f64, config: &SpringConfig) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            start: initial,
            stiffness: 0.0,
            damping: 0.0,
            mass: 1.0,
            overshoot_clamping: config.overshoot_clamping,
            rest_speed_threshold: 0.0,
            rest_displacement_threshold: 0.0,
            at_rest: false,
        }
        .with_stiffness(config.stiffness)
        .with_damping(config.damping)
        .with_mass(config.mass)
        .with_rest_speed_threshold(config.rest_speed_threshold)
        .with_rest_displacement_threshold(config.rest_displacement_threshold)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = if k.is_finite() { k.max(MIN_STIFFNESS) } else { MIN_STIFFNESS };
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = if c.is_finite() { c.max(0.0) } else { 0.0 };
        self
    }

    /// Set mass (builder pattern). Clamped to a small positive minimum.
    #[must_use]
    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = if m.is_finite() { m.max(MIN_MASS) } else { 1.0 };
        self
    }

    /// Enable or disable overshoot clamping (builder pattern).
    #[must_use]
    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Set the rest speed threshold (builder pattern).
    #[must_use]
    pub fn with_rest_speed_threshold(mut self, threshold: f64) -> Self {
        self.rest_speed_threshold = threshold.abs();
        self
    }

    /// Set the rest displacement threshold (builder pattern).
    #[must_use]
    pub fn with_rest_displacement_threshold(mut self, threshold: f64) -> Self {
        self.rest_displacement_threshold = threshold.abs();
        self
    }

    /// Start with an initial velocity (builder pattern).
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        if velocity.is_finite() {
            self.velocity = velocity;
        }
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    #[inline]
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Compute the critical damping coefficient for the current stiffness
    /// and mass.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Perform a single integration slice of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let spring_force = -self.stiffness * displacement;
        let damping_force = -self.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / self.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Whether the position now sits on the far side of the target relative
    /// to where the run started. Any departure counts when the run started
    /// on the target.
    fn is_overshooting(&self) -> bool {
        if !self.overshoot_clamping {
            return false;
        }
        let origin = self.start - self.target;
        let offset = self.position - self.target;
        if origin == 0.0 {
            offset != 0.0
        } else {
            origin * offset < 0.0
        }
    }

    fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
            if self.is_overshooting() {
                self.settle();
                return;
            }
        }

        let pos_delta = (self.position - self.target).abs();
        let vel_abs = self.velocity.abs();
        if pos_delta < self.rest_displacement_threshold && vel_abs < self.rest_speed_threshold {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Common spring configurations for card transitions.
pub mod presets {
    use super::SpringConfig;

    /// Heavy, overdamped push/pop motion with overshoot clamping.
    #[must_use]
    pub fn ios() -> SpringConfig {
        SpringConfig {
            stiffness: 1000.0,
            damping: 500.0,
            mass: 3.0,
            overshoot_clamping: true,
            rest_speed_threshold: 10.0,
            rest_displacement_threshold: 10.0,
        }
    }

    /// Critically damped spring: fastest convergence without overshoot.
    #[must_use]
    pub fn critical() -> SpringConfig {
        let k: f64 = 170.0;
        SpringConfig {
            stiffness: k,
            damping: 2.0 * k.sqrt(),
            mass: 1.0,
            overshoot_clamping: false,
            rest_speed_threshold: 0.01,
            rest_displacement_threshold: 0.01,
        }
    }

    /// Gentle spring: low stiffness, high damping. Smooth and slow.
    #[must_use]
    pub fn gentle() -> SpringConfig {
        SpringConfig {
            stiffness: 120.0,
            damping: 20.0,
            mass: 1.0,
            overshoot_clamping: false,
            rest_speed_threshold: 0.01,
            rest_displacement_threshold: 0.01,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
