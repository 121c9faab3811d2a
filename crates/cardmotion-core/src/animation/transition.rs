#![forbid(unsafe_code)]

//! Transition runs: one live spring or timing animation toward a visibility.
//!
//! A [`TransitionRun`] exists only while its clock is running. Callers model
//! "clock stopped" as not holding a run (`Option<TransitionRun>::None`), so a
//! stopped clock can never be ticked by mistake.
//!
//! # Lifecycle
//!
//! 1. [`TransitionRun::start`] resets elapsed time, clears `finished`, and
//!    records the visibility the run is heading to.
//! 2. The frame that starts a run does not advance it; the first
//!    [`tick`](TransitionRun::tick) after start is consumed as a zero-length
//!    frame so the reported position does not jump on restart.
//! 3. Each later tick applies exactly one physics step. Frame deltas above
//!    [`MAX_FRAME_DT`] are clamped first.
//! 4. Once [`is_finished`](TransitionRun::is_finished) is true the run is done;
//!    further ticks are no-ops.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::spring::{self, Spring, SpringConfig};
use super::timing::{Timing, TimingConfig};
use super::Animation;
use crate::logging::trace_event;
use crate::visibility::Visibility;

/// Largest frame delta fed to the physics. Longer stalls are treated as one
/// 64ms frame.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(64);

/// Which dynamics a transition uses.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TransitionSpec {
    Spring(SpringConfig),
    Timing(TimingConfig),
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::Spring(spring::presets::ios())
    }
}

impl TransitionSpec {
    /// Validation errors for this spec, each prefixed with `field`.
    #[must_use]
    pub fn validate(&self, field: &str) -> Vec<String> {
        match self {
            Self::Spring(config) => config.validate(field),
            Self::Timing(config) => config.validate(field),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spring(_) => "spring",
            Self::Timing(_) => "timing",
        }
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Spring(Spring),
    Timing(Timing),
}

impl Motion {
    fn as_animation(&self) -> &dyn Animation {
        match self {
            Self::Spring(s) => s as &dyn Animation,
            Self::Timing(t) => t as &dyn Animation,
        }
    }

    fn as_animation_mut(&mut self) -> &mut dyn Animation {
        match self {
            Self::Spring(s) => s as &mut dyn Animation,
            Self::Timing(t) => t as &mut dyn Animation,
        }
    }
}

/// A live animation moving the card position toward a visibility's resting
/// position.
#[derive(Debug, Clone)]
pub struct TransitionRun {
    motion: Motion,
    visibility: Visibility,
    target: f64,
    elapsed: Duration,
    frames: u64,
    finished: bool,
    fresh: bool,
}

impl TransitionRun {
    /// Start the clock: a new run from `from` to `to`, heading to
    /// `visibility`.
    ///
    /// `initial_velocity` seeds spring runs (drag release or the velocity of
    /// an interrupted run); timing runs ignore it.
    #[must_use]
    pub fn start(
        spec: &TransitionSpec,
        from: f64,
        to: f64,
        initial_velocity: f64,
        visibility: Visibility,
    ) -> Self {
        let motion = match spec {
            TransitionSpec::Spring(config) => {
                Motion::Spring(Spring::from_config(from, to, config).with_velocity(initial_velocity))
            }
            TransitionSpec::Timing(config) => Motion::Timing(Timing::new(from, to, config)),
        };
        trace_event!(
            kind = spec.kind(),
            from,
            to,
            initial_velocity,
            %visibility,
            "transition run started"
        );
        Self {
            motion,
            visibility,
            target: to,
            elapsed: Duration::ZERO,
            frames: 0,
            finished: false,
            fresh: true,
        }
    }

    /// Advance one frame. Returns the new position.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        if self.finished {
            return self.position();
        }
        if self.fresh {
            self.fresh = false;
            return self.position();
        }

        let dt = dt.min(MAX_FRAME_DT);
        self.motion.as_animation_mut().tick(dt);
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frames += 1;

        if self.motion.as_animation().is_complete() {
            self.finished = true;
            trace_event!(
                frames = self.frames,
                elapsed_ms = self.elapsed.as_millis() as u64,
                visibility = %self.visibility,
                "transition run finished"
            );
        }
        self.position()
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.motion.as_animation().position()
    }

    /// Current velocity, carried into the next run when this one is
    /// interrupted.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.motion.as_animation().velocity()
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The visibility captured when the run started.
    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks that advanced the physics.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
