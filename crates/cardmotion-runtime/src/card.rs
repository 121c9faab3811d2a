#![forbid(unsafe_code)]

//! Card facade: queues external input between frames and steps the machine.
//!
//! Hosts talk to a [`Card`]. Every setter only records input; nothing moves
//! until [`Card::step`] runs, so the order of calls between two frames never
//! matters except for gesture events, which are replayed in arrival order.
//!
//! ```rust,ignore
//! let mut card = Card::new(CardConfig::default(), Visibility::Open)?;
//! card.set_layout(Layout::new(390.0, 844.0));
//! card.push_gesture(GestureEvent::active(120.0, 0.0));
//! let out = card.step(frame_dt);
//! dispatch_effects(&out.effects, &mut handler);
//! ```

use std::time::Duration;

use cardmotion_core::{GestureEvent, Layout, PendingCell, Visibility};

use crate::card_config::{CardConfig, CardConfigError};
use crate::machine::{CardState, FrameInputs, FrameOutput, step};

/// One card with queued inputs.
#[derive(Debug, Clone)]
pub struct Card {
    state: CardState,
    /// Latest accepted configuration, including queued changes.
    config: CardConfig,
    pending_config: PendingCell<CardConfig>,
    pending_layout: PendingCell<Layout>,
    pending_visibility: PendingCell<Visibility>,
    gestures: Vec<GestureEvent>,
}

impl Card {
    /// A card resting at `initial`, layout not yet measured.
    pub fn new(config: CardConfig, initial: Visibility) -> Result<Self, CardConfigError> {
        let config = checked(config)?;
        Ok(Self::from_state(
            CardState::new(config, Layout::ZERO, initial),
            config,
        ))
    }

    /// A card animating in toward `initial` over an already measured layout.
    /// Fires the matching notification when it arrives.
    pub fn entering(
        config: CardConfig,
        layout: Layout,
        initial: Visibility,
    ) -> Result<Self, CardConfigError> {
        let config = checked(config)?;
        Ok(Self::from_state(
            CardState::entering(config, layout, initial),
            config,
        ))
    }

    fn from_state(state: CardState, config: CardConfig) -> Self {
        Self {
            state,
            config,
            pending_config: PendingCell::new(),
            pending_layout: PendingCell::new(),
            pending_visibility: PendingCell::new(),
            gestures: Vec::new(),
        }
    }

    /// Queue a recognizer event.
    pub fn push_gesture(&mut self, event: GestureEvent) {
        self.gestures.push(event);
    }

    /// Queue a layout update. Only the latest one before a step is applied.
    pub fn set_layout(&mut self, layout: Layout) {
        self.pending_layout.put(layout);
    }

    /// Validate and queue a new configuration.
    ///
    /// An invalid configuration is rejected and the previous one stays in
    /// effect.
    pub fn set_config(&mut self, config: CardConfig) -> Result<(), CardConfigError> {
        let config = checked(config)?;
        self.queue_config(config);
        Ok(())
    }

    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        let mut config = self.config;
        config.gestures_enabled = enabled;
        self.queue_config(config);
    }

    pub fn set_first_in_stack(&mut self, first: bool) {
        let mut config = self.config;
        config.first_in_stack = first;
        self.queue_config(config);
    }

    fn queue_config(&mut self, config: CardConfig) {
        if config != self.config {
            self.config = config;
            self.pending_config.put(config);
        }
    }

    /// Queue an open request. The latest request before a step wins.
    pub fn request_open(&mut self) {
        self.pending_visibility.put(Visibility::Open);
    }

    /// Queue a close request. The latest request before a step wins.
    pub fn request_close(&mut self) {
        self.pending_visibility.put(Visibility::Closed);
    }

    /// Handle a platform back request.
    ///
    /// Returns `true` (and queues a close) iff the card is open, counting a
    /// queued request, and is not first in its stack.
    pub fn handle_back_request(&mut self) -> bool {
        let effective = self
            .pending_visibility
            .peek()
            .copied()
            .unwrap_or_else(|| self.state.visibility());
        let consumed = effective.is_open() && !self.config.first_in_stack;
        if consumed {
            self.request_close();
        }
        tracing::debug!(
            target: "cardmotion.machine",
            consumed,
            visibility = %effective,
            "back request"
        );
        consumed
    }

    /// Whether the drag gesture should be enabled, counting queued changes.
    #[must_use]
    pub fn gesture_enabled(&self) -> bool {
        let layout = self
            .pending_layout
            .peek()
            .copied()
            .unwrap_or_else(|| self.state.layout());
        layout.is_measured() && self.config.gestures_enabled && !self.config.first_in_stack
    }

    /// Apply every queued input and advance one frame.
    pub fn step(&mut self, dt: Duration) -> FrameOutput {
        let inputs = FrameInputs {
            gestures: std::mem::take(&mut self.gestures),
            layout: self.pending_layout.take(),
            config: self.pending_config.take(),
            override_visibility: self.pending_visibility.take(),
        };
        step(&mut self.state, inputs, dt)
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &CardState {
        &self.state
    }

    /// Latest accepted configuration, including queued changes.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }
}

fn checked(config: CardConfig) -> Result<CardConfig, CardConfigError> {
    config.validated().inspect_err(|err| {
        tracing::warn!(
            target: "cardmotion.machine",
            error = %err,
            "card configuration rejected"
        );
    })
}
