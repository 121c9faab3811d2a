#![forbid(unsafe_code)]

//! Gesture tracking: turns recognizer events into drag sessions.
//!
//! [`GestureTracker`] is a stateful processor fed one [`GestureEvent`] at a
//! time. The platform recognizer has already classified raw touches into a
//! state sequence; the tracker only decides when a drag session begins, where
//! the card sits while it lasts, and when control passes to the swipe
//! classifier.
//!
//! # State Machine
//!
//! - **Idle**: no session. The first `Active` event opens a session whose
//!   offset is the card position at that moment.
//! - **Dragging**: every `Active` event moves the card to
//!   `max(offset + translation, 0)`.
//! - **Suppressed**: a session was aborted or cancelled, or a gesture was
//!   already under way while gestures were disabled. Further `Active` events
//!   are ignored until the recognizer leaves `Active`, so a gesture is never
//!   picked up halfway through.
//!
//! # Invariants
//!
//! 1. A reported drag position is never negative.
//! 2. Exactly one [`DragUpdate::Released`] is produced per session.
//! 3. Events with non-finite translation or velocity are ignored.
//!
//! # Failure Modes
//!
//! - If the recognizer skips `Active` entirely (`Began` → `End`), no session
//!   opens and nothing is released: a tap does not move the card.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Axis;
use crate::logging::trace_event;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// State reported by the platform gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GestureState {
    Undetermined,
    Possible,
    Began,
    Active,
    End,
    Cancelled,
    Failed,
}

impl GestureState {
    #[inline]
    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// One recognizer update along the card's axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureEvent {
    pub state: GestureState,
    /// Translation since the gesture began, in layout pixels.
    pub translation: f64,
    /// Velocity in layout pixels per second.
    pub velocity: f64,
}

impl GestureEvent {
    #[must_use]
    pub const fn new(state: GestureState, translation: f64, velocity: f64) -> Self {
        Self {
            state,
            translation,
            velocity,
        }
    }

    /// Build an event from two-dimensional recognizer values, keeping the
    /// component on `axis`.
    #[must_use]
    pub fn along(
        axis: Axis,
        state: GestureState,
        translation: (f64, f64),
        velocity: (f64, f64),
    ) -> Self {
        Self::new(
            state,
            axis.select(translation.0, translation.1),
            axis.select(velocity.0, velocity.1),
        )
    }

    #[must_use]
    pub const fn active(translation: f64, velocity: f64) -> Self {
        Self::new(GestureState::Active, translation, velocity)
    }

    #[must_use]
    pub const fn end(translation: f64, velocity: f64) -> Self {
        Self::new(GestureState::End, translation, velocity)
    }

    fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.velocity.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// How a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// The finger lifted normally.
    Ended,
    /// The recognizer cancelled the gesture, or gestures were disabled.
    Cancelled,
    /// The recognizer failed the gesture.
    Failed,
}

/// Final drag values handed to the swipe classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Translation at release.
    pub distance: f64,
    /// Velocity at release.
    pub velocity: f64,
    pub kind: ReleaseKind,
}

/// Result of feeding one event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Nothing changed for the card.
    Ignored,
    /// A session opened; the caller must stop any running transition.
    Started { offset: f64, position: f64 },
    /// The card should sit at `position`.
    Moved { position: f64 },
    /// The session closed; classify and settle.
    Released(DragRelease),
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Captured position at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub offset: f64,
}

/// Stateful drag tracker.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    sample: Option<GestureEvent>,
    session: Option<DragSession>,
    suppressed: bool,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one recognizer event. `position` is the card's current position,
    /// captured as the session offset if this event opens a session.
    pub fn process(&mut self, event: &GestureEvent, position: f64) -> DragUpdate {
        if !event.is_finite() {
            trace_event!(?event, "non-finite gesture event ignored");
            return DragUpdate::Ignored;
        }
        self.sample = Some(*event);

        if event.state.is_active() {
            if self.suppressed {
                return DragUpdate::Ignored;
            }
            return match self.session {
                Some(session) => DragUpdate::Moved {
                    position: drag_position(session.offset, event.translation),
                },
                None => {
                    let offset = position.max(0.0);
                    self.session = Some(DragSession { offset });
                    trace_event!(offset, "drag session started");
                    DragUpdate::Started {
                        offset,
                        position: drag_position(offset, event.translation),
                    }
                }
            };
        }

        self.suppressed = false;
        if self.session.take().is_none() {
            return DragUpdate::Ignored;
        }
        let kind = match event.state {
            GestureState::Cancelled => ReleaseKind::Cancelled,
            GestureState::Failed => ReleaseKind::Failed,
            _ => ReleaseKind::Ended,
        };
        trace_event!(?kind, distance = event.translation, velocity = event.velocity, "drag released");
        DragUpdate::Released(DragRelease {
            distance: event.translation,
            velocity: event.velocity,
            kind,
        })
    }

    /// End the current session as cancelled, using the last reported
    /// translation and velocity. The rest of the gesture is suppressed.
    /// Returns `None` when not dragging.
    pub fn cancel(&mut self) -> Option<DragRelease> {
        self.session.take()?;
        self.suppressed = true;
        let (distance, velocity) = self
            .sample
            .map_or((0.0, 0.0), |s| (s.translation, s.velocity));
        Some(DragRelease {
            distance,
            velocity,
            kind: ReleaseKind::Cancelled,
        })
    }

    /// Drop the current session without a release. `Active` events are
    /// ignored until the recognizer reports a non-active state.
    ///
    /// Returns `true` if a session was aborted.
    pub fn abort(&mut self) -> bool {
        let aborted = self.session.take().is_some();
        if aborted {
            self.suppressed = true;
        }
        aborted
    }

    /// Track an event that arrived while gestures are disabled. Never opens
    /// a session; an `Active` event suppresses the rest of its gesture and
    /// any other state lifts the suppression.
    pub fn observe(&mut self, event: &GestureEvent) {
        if !event.is_finite() {
            return;
        }
        self.suppressed = event.state.is_active();
    }

    /// Forget the last sample (zeroes the reported translation/velocity).
    pub fn clear_sample(&mut self) {
        self.sample = None;
    }

    /// Whether a drag session is open.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Latest accepted recognizer event.
    #[inline]
    #[must_use]
    pub fn last_sample(&self) -> Option<GestureEvent> {
        self.sample
    }

    /// Reset to idle.
    pub fn reset(&mut self) {
        self.sample = None;
        self.session = None;
        self.suppressed = false;
    }
}

fn drag_position(offset: f64, translation: f64) -> f64 {
    (offset + translation).max(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
