#![forbid(unsafe_code)]

//! Visibility state machine: the per-frame step of one card.
//!
//! [`step`] reconciles everything that can move a card (a drag, a running
//! transition, and programmatic open/close requests) into one position per
//! frame. It is a plain function over explicit state: inputs collected since
//! the previous frame go in, the new position, progress, and a list of
//! effects come out.
//!
//! # States
//!
//! ```text
//!            gesture active                 override
//!   Open ─────────────────────► Dragging ◄────────────── (any)
//!    ▲  ▲                          │                       │
//!    │  │ finished                 │ release               ▼
//!    │  └─────────────────── Transitioning ◄───────────────┘
//!    │        finished             │
//!   Closed ◄───────────────────────┘
//! ```
//!
//! # Step order
//!
//! 1. Apply queued configuration and layout. A settled card snaps to the
//!    resting position of the new extent.
//! 2. If gestures are no longer enabled, release an open drag as cancelled.
//! 3. Apply a pending visibility override: stop the run, abort the drag,
//!    restart toward the requested visibility from the current position.
//! 4. Feed gesture events to the tracker (only while gestures are enabled).
//! 5. Advance the running transition by one frame.
//! 6. On completion: clear the run, settle, consult the dispatcher.
//! 7. Project progress.
//!
//! # Invariants
//!
//! 1. At most one of {drag session, transition run} writes the position in a
//!    step. Starting either one stops the other first.
//! 2. The position is never negative.
//! 3. A consumed override is gone before the next external write.
//! 4. Each completed run calls the dispatcher exactly once.

use std::time::Duration;

use cardmotion_core::{
    DragRelease, DragUpdate, GestureEvent, GestureTracker, Layout, ReleaseKind, TransitionRun,
    ValueCell, Visibility, classify_swipe,
};
use tracing::debug;

use crate::card_config::CardConfig;
use crate::dispatch::{CallbackDispatcher, Effect};
use crate::progress::{Progress, project_progress};

/// Logical phase of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardPhase {
    Open,
    Closed,
    Dragging,
    Transitioning,
}

impl CardPhase {
    /// The resting phase for `visibility`.
    #[must_use]
    pub fn settled(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Open => Self::Open,
            Visibility::Closed => Self::Closed,
        }
    }

    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Open | Self::Closed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Dragging => "dragging",
            Self::Transitioning => "transitioning",
        }
    }
}

/// Inputs collected between two frames.
#[derive(Debug, Clone, Default)]
pub struct FrameInputs {
    /// Recognizer events in arrival order.
    pub gestures: Vec<GestureEvent>,
    /// Latest layout, if it changed.
    pub layout: Option<Layout>,
    /// Latest configuration, if it changed. Must already be validated.
    pub config: Option<CardConfig>,
    /// Programmatic open/close request.
    pub override_visibility: Option<Visibility>,
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frame counter after this step (first step is 1).
    pub frame: u64,
    pub position: f64,
    pub progress: Progress,
    pub phase: CardPhase,
    pub visibility: Visibility,
    /// Whether the drag gesture should currently be enabled.
    pub gesture_enabled: bool,
    /// Effects for the host to run after the step, in order.
    pub effects: Vec<Effect>,
}

/// All state of one card between frames.
#[derive(Debug, Clone)]
pub struct CardState {
    position: ValueCell<f64>,
    visibility: ValueCell<Visibility>,
    layout: Layout,
    config: CardConfig,
    phase: CardPhase,
    tracker: GestureTracker,
    run: Option<TransitionRun>,
    dispatcher: CallbackDispatcher,
    frame: u64,
}

impl CardState {
    /// A card already resting at `initial`.
    ///
    /// The initial visibility counts as notified: no callback fires until the
    /// card settles somewhere else.
    #[must_use]
    pub fn new(config: CardConfig, layout: Layout, initial: Visibility) -> Self {
        let position = initial.resting_position(layout.extent(config.axis));
        Self {
            position: ValueCell::new(position),
            visibility: ValueCell::new(initial),
            layout,
            config,
            phase: CardPhase::settled(initial),
            tracker: GestureTracker::new(),
            run: None,
            dispatcher: CallbackDispatcher::new(Some(initial)),
            frame: 0,
        }
    }

    /// A card animating in: it starts at the opposite resting position with a
    /// run toward `initial`, and nothing has been notified yet.
    #[must_use]
    pub fn entering(config: CardConfig, layout: Layout, initial: Visibility) -> Self {
        let extent = layout.extent(config.axis);
        let from = initial.opposite().resting_position(extent);
        let to = initial.resting_position(extent);
        let spec = config.transition.for_visibility(initial);
        Self {
            position: ValueCell::new(from),
            visibility: ValueCell::new(initial),
            layout,
            config,
            phase: CardPhase::Transitioning,
            tracker: GestureTracker::new(),
            run: Some(TransitionRun::start(spec, from, to, 0.0, initial)),
            dispatcher: CallbackDispatcher::new(None),
            frame: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position.get()
    }

    /// Number of position changes so far.
    #[inline]
    #[must_use]
    pub fn position_version(&self) -> u64 {
        self.position.version()
    }

    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Layout length along the configured axis.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.layout.extent(self.config.axis)
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Whether a transition clock is running.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    #[inline]
    #[must_use]
    pub fn run(&self) -> Option<&TransitionRun> {
        self.run.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn last_notified(&self) -> Option<Visibility> {
        self.dispatcher.last_notified()
    }

    /// Steps taken so far.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// `layout measured AND gestures enabled AND not first in stack`.
    #[must_use]
    pub fn gesture_enabled(&self) -> bool {
        self.layout.is_measured() && self.config.gestures_enabled && !self.config.first_in_stack
    }

    /// Current progress projection.
    #[must_use]
    pub fn progress(&self) -> Progress {
        project_progress(
            self.position.get(),
            &self.layout,
            self.config.axis,
            self.visibility.get(),
        )
    }

    fn set_phase(&mut self, phase: CardPhase) {
        if self.phase != phase {
            debug!(
                target: "cardmotion.machine",
                from = self.phase.as_str(),
                to = phase.as_str(),
                "card phase changed"
            );
            self.phase = phase;
        }
    }

    fn set_position(&mut self, position: f64) {
        if position.is_finite() {
            self.position.set(position.max(0.0));
        }
    }

    /// Stop any run and start a new one from the current position toward
    /// `target`.
    fn begin_run(&mut self, target: Visibility, velocity: f64, effects: &mut Vec<Effect>) {
        self.visibility.set(target);
        let from = self.position.get();
        let to = target.resting_position(self.extent());
        let spec = self.config.transition.for_visibility(target);
        self.run = Some(TransitionRun::start(spec, from, to, velocity, target));
        self.set_phase(CardPhase::Transitioning);
        effects.push(Effect::TransitionStart {
            closing: target == Visibility::Closed,
        });
    }

    fn release(&mut self, release: DragRelease, effects: &mut Vec<Effect>) {
        effects.push(match release.kind {
            ReleaseKind::Ended => Effect::GestureEnd,
            ReleaseKind::Cancelled | ReleaseKind::Failed => Effect::GestureCanceled,
        });
        let decision = classify_swipe(
            release.distance,
            release.velocity,
            self.visibility.get(),
            &self.config.swipe,
        );
        debug!(
            target: "cardmotion.machine",
            distance = release.distance,
            velocity = release.velocity,
            kind = ?release.kind,
            decision = ?decision,
            "drag released"
        );
        self.begin_run(decision.target(), release.velocity, effects);
    }

    fn apply_gesture(&mut self, event: &GestureEvent, effects: &mut Vec<Effect>) {
        match self.tracker.process(event, self.position.get()) {
            DragUpdate::Ignored => {}
            DragUpdate::Started { offset, position } => {
                if let Some(run) = self.run.take() {
                    debug!(
                        target: "cardmotion.machine",
                        offset,
                        interrupted = %run.visibility(),
                        "drag interrupted running transition"
                    );
                }
                self.set_phase(CardPhase::Dragging);
                self.set_position(position);
                effects.push(Effect::GestureBegin);
            }
            DragUpdate::Moved { position } => self.set_position(position),
            DragUpdate::Released(release) => self.release(release, effects),
        }
    }

    fn advance_run(&mut self, dt: Duration, effects: &mut Vec<Effect>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let position = run.tick(dt);
        let finished = run.is_finished().then(|| run.visibility());
        self.set_position(position);

        if let Some(settled) = finished {
            self.run = None;
            self.tracker.clear_sample();
            // Extent may have changed while the run was in flight.
            self.set_position(settled.resting_position(self.extent()));
            self.set_phase(CardPhase::settled(settled));
            if let Some(effect) = self.dispatcher.settle(settled) {
                debug!(
                    target: "cardmotion.machine",
                    visibility = %settled,
                    "card settled with visibility change"
                );
                effects.push(effect);
            }
        }
    }
}

/// Advance `state` by one frame of length `dt`.
pub fn step(state: &mut CardState, inputs: FrameInputs, dt: Duration) -> FrameOutput {
    state.frame += 1;
    let _span = tracing::debug_span!(
        "card.step",
        frame = state.frame,
        phase = state.phase.as_str(),
    )
    .entered();

    let mut effects = Vec::new();

    // 1. Configuration and layout.
    let previous_extent = state.extent();
    if let Some(config) = inputs.config {
        state.config = config;
    }
    if let Some(layout) = inputs.layout {
        state.layout = layout;
    }
    let extent = state.extent();
    if extent != previous_extent && state.phase.is_settled() {
        let resting = state.visibility.get().resting_position(extent);
        state.set_position(resting);
    }

    // 2. Gestures switched off mid-drag.
    let gesture_enabled = state.gesture_enabled();
    if !gesture_enabled {
        if let Some(release) = state.tracker.cancel() {
            state.release(release, &mut effects);
        }
    }

    // 3. Programmatic override wins over drag and run.
    if let Some(target) = inputs.override_visibility {
        let carried = state.run.take().map_or(0.0, |run| run.velocity());
        if state.tracker.abort() {
            effects.push(Effect::GestureCanceled);
        }
        debug!(
            target: "cardmotion.machine",
            %target,
            from = state.position.get(),
            carried,
            "visibility override applied"
        );
        state.begin_run(target, carried, &mut effects);
    }

    // 4. Gesture events. While disabled they only track suppression.
    for event in &inputs.gestures {
        if gesture_enabled {
            state.apply_gesture(event, &mut effects);
        } else {
            state.tracker.observe(event);
        }
    }

    // 5-6. Physics and settle.
    state.advance_run(dt, &mut effects);

    FrameOutput {
        frame: state.frame,
        position: state.position.get(),
        progress: state.progress(),
        phase: state.phase,
        visibility: state.visibility.get(),
        gesture_enabled: state.gesture_enabled(),
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardmotion_core::{GestureState, SpringConfig, TimingConfig, TransitionSpec};

    const MS_16: Duration = Duration::from_millis(16);

    fn layout() -> Layout {
        Layout::new(200.0, 400.0)
    }

    fn timing_config(ms: u64) -> CardConfig {
        let mut config = CardConfig::default();
        let spec = TransitionSpec::Timing(TimingConfig {
            duration: Duration::from_millis(ms),
            easing: cardmotion_core::EasingCurve::Linear,
        });
        config.transition = crate::card_config::TransitionSpecs::both(spec);
        config
    }

    fn gestures(events: &[GestureEvent]) -> FrameInputs {
        FrameInputs {
            gestures: events.to_vec(),
            ..FrameInputs::default()
        }
    }

    fn override_to(target: Visibility) -> FrameInputs {
        FrameInputs {
            override_visibility: Some(target),
            ..FrameInputs::default()
        }
    }

    /// Step with no input until settled; collect every effect.
    fn simulate(state: &mut CardState, max_frames: usize) -> Vec<Effect> {
        let mut effects = Vec::new();
        for _ in 0..max_frames {
            let out = step(state, FrameInputs::default(), MS_16);
            effects.extend(out.effects);
            if out.phase.is_settled() {
                break;
            }
        }
        effects
    }

    #[test]
    fn new_card_rests_at_initial_visibility() {
        let open = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        let closed = CardState::new(CardConfig::default(), layout(), Visibility::Closed);
        assert_eq!(open.position(), 0.0);
        assert_eq!(open.phase(), CardPhase::Open);
        assert_eq!(closed.position(), 200.0);
        assert_eq!(closed.phase(), CardPhase::Closed);
        assert_eq!(closed.last_notified(), Some(Visibility::Closed));
    }

    #[test]
    fn idle_step_emits_nothing() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        let out = step(&mut state, FrameInputs::default(), MS_16);
        assert!(out.effects.is_empty());
        assert_eq!(out.progress, Progress::Interpolated(1.0));
        assert_eq!(out.frame, 1);
    }

    #[test]
    fn drag_past_threshold_closes_and_notifies_once() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);

        let out = step(
            &mut state,
            gestures(&[
                GestureEvent::new(GestureState::Began, 0.0, 0.0),
                GestureEvent::active(40.0, 0.0),
                GestureEvent::active(80.0, 0.0),
            ]),
            MS_16,
        );
        assert_eq!(out.phase, CardPhase::Dragging);
        assert_eq!(out.position, 80.0);
        assert_eq!(out.effects, vec![Effect::GestureBegin]);

        let out = step(&mut state, gestures(&[GestureEvent::end(80.0, 0.0)]), MS_16);
        assert_eq!(out.phase, CardPhase::Transitioning);
        assert_eq!(out.visibility, Visibility::Closed);
        assert_eq!(out.position, 80.0, "release frame must not move");
        assert_eq!(
            out.effects,
            vec![Effect::GestureEnd, Effect::TransitionStart { closing: true }]
        );

        let effects = simulate(&mut state, 2000);
        assert_eq!(state.phase(), CardPhase::Closed);
        assert_eq!(state.position(), 200.0);
        assert_eq!(state.progress().value(), 0.0);
        assert_eq!(
            effects.iter().filter(|e| **e == Effect::Closed).count(),
            1,
            "{effects:?}"
        );
    }

    #[test]
    fn short_drag_snaps_back_without_callback() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        step(&mut state, gestures(&[GestureEvent::active(30.0, 0.0)]), MS_16);
        let out = step(&mut state, gestures(&[GestureEvent::end(30.0, 0.0)]), MS_16);
        assert_eq!(out.visibility, Visibility::Open);
        let effects = simulate(&mut state, 2000);
        assert_eq!(state.position(), 0.0);
        assert!(!effects.contains(&Effect::Opened));
        assert!(!effects.contains(&Effect::Closed));
    }

    #[test]
    fn drag_position_clamps_at_zero() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        let out = step(
            &mut state,
            gestures(&[GestureEvent::active(-50.0, -100.0)]),
            MS_16,
        );
        assert_eq!(out.position, 0.0);
    }

    #[test]
    fn flick_open_from_rest_stays_clamped() {
        let mut config = CardConfig::default();
        config.transition = crate::card_config::TransitionSpecs::both(TransitionSpec::Spring(
            SpringConfig {
                stiffness: 300.0,
                damping: 2.0,
                overshoot_clamping: true,
                ..SpringConfig::default()
            },
        ));
        let mut state = CardState::new(config, layout(), Visibility::Open);
        step(
            &mut state,
            gestures(&[GestureEvent::active(-50.0, -900.0)]),
            MS_16,
        );
        let out = step(
            &mut state,
            gestures(&[GestureEvent::end(-50.0, -900.0)]),
            MS_16,
        );
        assert_eq!(out.visibility, Visibility::Open);
        assert_eq!(out.phase, CardPhase::Transitioning);

        let mut frames = 0;
        let mut max_pos = 0.0_f64;
        while state.phase() != CardPhase::Open && frames < 600 {
            let out = step(&mut state, FrameInputs::default(), MS_16);
            max_pos = max_pos.max(out.position);
            assert!(!out.effects.contains(&Effect::Opened), "already open");
            frames += 1;
        }
        assert_eq!(state.phase(), CardPhase::Open);
        assert_eq!(max_pos, 0.0, "card bounced toward closed");
        assert_eq!(frames, 1, "clamped run should settle on its first tick");
    }

    #[test]
    fn drag_interrupts_run_and_captures_position() {
        let mut state = CardState::new(timing_config(1000), layout(), Visibility::Open);
        step(&mut state, override_to(Visibility::Closed), MS_16);
        for _ in 0..10 {
            step(&mut state, FrameInputs::default(), MS_16);
        }
        let here = state.position();
        assert!(here > 0.0);

        let out = step(&mut state, gestures(&[GestureEvent::active(0.0, 0.0)]), MS_16);
        assert_eq!(out.phase, CardPhase::Dragging);
        assert!(!state.is_running());
        assert_eq!(out.position, here);
    }

    #[test]
    fn override_restarts_from_current_position() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Closed);
        step(&mut state, override_to(Visibility::Open), MS_16);
        let mut last = state.position();
        while state.position() > 40.0 {
            let out = step(&mut state, FrameInputs::default(), MS_16);
            assert!(out.phase == CardPhase::Transitioning, "settled too early");
            last = out.position;
        }

        let out = step(&mut state, override_to(Visibility::Closed), MS_16);
        assert_eq!(out.position, last, "override must not jump");
        assert_eq!(out.visibility, Visibility::Closed);
        assert_eq!(
            state.run().map(TransitionRun::target),
            Some(200.0),
            "run must head to the closed extent"
        );

        let next = step(&mut state, FrameInputs::default(), MS_16);
        assert!(
            (next.position - last).abs() < 20.0,
            "first frame after restart moved too far: {last} -> {}",
            next.position
        );
    }

    #[test]
    fn override_aborts_drag_and_suppresses_it() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        step(&mut state, gestures(&[GestureEvent::active(50.0, 0.0)]), MS_16);

        let out = step(&mut state, override_to(Visibility::Closed), MS_16);
        assert_eq!(
            out.effects,
            vec![
                Effect::GestureCanceled,
                Effect::TransitionStart { closing: true }
            ]
        );
        assert!(!state.is_dragging());

        let out = step(&mut state, gestures(&[GestureEvent::active(10.0, 0.0)]), MS_16);
        assert_eq!(out.phase, CardPhase::Transitioning, "drag must stay suppressed");
        assert!(out.effects.is_empty());
    }

    #[test]
    fn repeated_close_requests_notify_once() {
        let mut state = CardState::new(timing_config(100), layout(), Visibility::Open);
        let mut effects = step(&mut state, override_to(Visibility::Closed), MS_16).effects;
        effects.extend(step(&mut state, override_to(Visibility::Closed), MS_16).effects);
        effects.extend(simulate(&mut state, 100));
        effects.extend(step(&mut state, override_to(Visibility::Closed), MS_16).effects);
        effects.extend(simulate(&mut state, 100));

        assert_eq!(state.phase(), CardPhase::Closed);
        assert_eq!(effects.iter().filter(|e| **e == Effect::Closed).count(), 1);
        assert!(!effects.contains(&Effect::Opened));
    }

    #[test]
    fn entering_card_notifies_on_arrival() {
        let mut state = CardState::entering(timing_config(100), layout(), Visibility::Open);
        assert_eq!(state.position(), 200.0);
        assert_eq!(state.last_notified(), None);
        let effects = simulate(&mut state, 100);
        assert_eq!(effects, vec![Effect::Opened]);
        assert_eq!(state.position(), 0.0);
    }

    #[test]
    fn unmeasured_layout_falls_back_and_disables_gestures() {
        let mut state = CardState::new(CardConfig::default(), Layout::ZERO, Visibility::Closed);
        let out = step(
            &mut state,
            gestures(&[GestureEvent::active(50.0, 0.0)]),
            MS_16,
        );
        assert!(!out.gesture_enabled);
        assert_eq!(out.phase, CardPhase::Closed);
        assert_eq!(out.progress, Progress::Fallback(Visibility::Closed));
        assert_eq!(out.progress.value(), 0.0);
    }

    #[test]
    fn layout_change_while_settled_snaps() {
        let mut state = CardState::new(CardConfig::default(), Layout::ZERO, Visibility::Closed);
        assert_eq!(state.position(), 0.0);
        let out = step(
            &mut state,
            FrameInputs {
                layout: Some(layout()),
                ..FrameInputs::default()
            },
            MS_16,
        );
        assert_eq!(out.position, 200.0);
        assert_eq!(out.progress, Progress::Interpolated(0.0));
        assert!(out.gesture_enabled);
        assert!(out.effects.is_empty());
    }

    #[test]
    fn layout_change_during_run_applies_on_settle() {
        let mut state = CardState::new(timing_config(100), layout(), Visibility::Open);
        step(&mut state, override_to(Visibility::Closed), MS_16);
        step(
            &mut state,
            FrameInputs {
                layout: Some(Layout::new(300.0, 400.0)),
                ..FrameInputs::default()
            },
            MS_16,
        );
        assert_eq!(state.run().map(TransitionRun::target), Some(200.0));
        simulate(&mut state, 100);
        assert_eq!(state.position(), 300.0);
    }

    #[test]
    fn disabling_gestures_mid_drag_releases_as_cancelled() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        step(&mut state, gestures(&[GestureEvent::active(90.0, 0.0)]), MS_16);
        let mut config = *state.config();
        config.gestures_enabled = false;
        let out = step(
            &mut state,
            FrameInputs {
                config: Some(config),
                ..FrameInputs::default()
            },
            MS_16,
        );
        assert_eq!(out.effects[0], Effect::GestureCanceled);
        assert_eq!(out.visibility, Visibility::Closed, "90 > 60 still classifies");
        assert!(!out.gesture_enabled);
    }

    #[test]
    fn reenabling_mid_gesture_does_not_jump() {
        let mut state = CardState::new(CardConfig::default(), layout(), Visibility::Open);
        let mut disabled = *state.config();
        disabled.gestures_enabled = false;
        let enabled = *state.config();

        step(&mut state, gestures(&[GestureEvent::active(20.0, 0.0)]), MS_16);
        step(
            &mut state,
            FrameInputs {
                config: Some(disabled),
                gestures: vec![GestureEvent::active(30.0, 0.0)],
                ..FrameInputs::default()
            },
            MS_16,
        );
        simulate(&mut state, 2000);
        assert_eq!(state.position(), 0.0);

        let out = step(
            &mut state,
            FrameInputs {
                config: Some(enabled),
                gestures: vec![GestureEvent::active(150.0, 0.0)],
                ..FrameInputs::default()
            },
            MS_16,
        );
        assert_eq!(out.position, 0.0, "half a gesture must not move the card");
        assert_ne!(out.phase, CardPhase::Dragging);
        assert!(!out.effects.contains(&Effect::GestureBegin));

        step(&mut state, gestures(&[GestureEvent::end(150.0, 0.0)]), MS_16);
        let out = step(&mut state, gestures(&[GestureEvent::active(10.0, 0.0)]), MS_16);
        assert_eq!(out.phase, CardPhase::Dragging, "next gesture drags again");
        assert_eq!(out.position, 10.0);
    }

    #[test]
    fn first_in_stack_ignores_gestures() {
        let config = CardConfig {
            first_in_stack: true,
            ..CardConfig::default()
        };
        let mut state = CardState::new(config, layout(), Visibility::Open);
        let out = step(&mut state, gestures(&[GestureEvent::active(120.0, 0.0)]), MS_16);
        assert_eq!(out.position, 0.0);
        assert!(out.effects.is_empty());
    }

    #[test]
    fn flick_release_carries_velocity_into_spring() {
        let config = CardConfig {
            transition: crate::card_config::TransitionSpecs::both(TransitionSpec::Spring(
                SpringConfig::default(),
            )),
            ..CardConfig::default()
        };
        let mut state = CardState::new(config, layout(), Visibility::Open);
        step(&mut state, gestures(&[GestureEvent::active(20.0, 900.0)]), MS_16);
        step(&mut state, gestures(&[GestureEvent::end(20.0, 900.0)]), MS_16);
        assert_eq!(state.visibility(), Visibility::Closed);
        assert_eq!(state.run().map(TransitionRun::velocity), Some(900.0));
    }

    #[test]
    fn vertical_axis_uses_height() {
        let config = CardConfig {
            axis: cardmotion_core::Axis::Vertical,
            ..CardConfig::default()
        };
        let state = CardState::new(config, layout(), Visibility::Closed);
        assert_eq!(state.position(), 400.0);
        assert_eq!(state.extent(), 400.0);
    }
}
