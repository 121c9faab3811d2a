#![forbid(unsafe_code)]

//! Callback dispatch: effects produced by a step and their delivery.
//!
//! The step function never calls out. It returns a list of [`Effect`]s and
//! the host passes that list to [`dispatch_effects`] once the step is over,
//! so a handler may queue new input on the card without re-entering a step.
//!
//! # Deduplication
//!
//! [`CallbackDispatcher::settle`] is called once per completed run. It emits
//! `Opened`/`Closed` only when the settled visibility differs from the last
//! notified one, and records the settled visibility either way.

use cardmotion_core::Visibility;

/// A side effect requested by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The card settled open.
    Opened,
    /// The card settled closed.
    Closed,
    /// A run started.
    TransitionStart { closing: bool },
    /// A drag session opened.
    GestureBegin,
    /// A drag session ended normally.
    GestureEnd,
    /// A drag session was cancelled, failed, or aborted.
    GestureCanceled,
}

impl Effect {
    /// Stable name used in logs and trace output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::TransitionStart { .. } => "transition_start",
            Self::GestureBegin => "gesture_begin",
            Self::GestureEnd => "gesture_end",
            Self::GestureCanceled => "gesture_canceled",
        }
    }

    /// The settle notification for `visibility`.
    #[must_use]
    pub fn settled(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Open => Self::Opened,
            Visibility::Closed => Self::Closed,
        }
    }
}

/// Tracks the last notified visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallbackDispatcher {
    last_notified: Option<Visibility>,
}

impl CallbackDispatcher {
    /// `last_notified` of `None` means the next settle always notifies.
    #[must_use]
    pub const fn new(last_notified: Option<Visibility>) -> Self {
        Self { last_notified }
    }

    /// Record a completed run. Returns the notification to fire, if any.
    pub fn settle(&mut self, settled: Visibility) -> Option<Effect> {
        let changed = self.last_notified != Some(settled);
        self.last_notified = Some(settled);
        changed.then(|| Effect::settled(settled))
    }

    #[inline]
    #[must_use]
    pub fn last_notified(&self) -> Option<Visibility> {
        self.last_notified
    }
}

/// Receiver for step effects. Every method defaults to a no-op.
pub trait EffectHandler {
    fn on_open(&mut self) {}

    fn on_close(&mut self) {}

    fn on_transition_start(&mut self, _closing: bool) {}

    fn on_gesture_begin(&mut self) {}

    fn on_gesture_end(&mut self) {}

    fn on_gesture_canceled(&mut self) {}
}

/// Deliver `effects` to `handler` in order.
pub fn dispatch_effects<H: EffectHandler + ?Sized>(effects: &[Effect], handler: &mut H) {
    for effect in effects {
        tracing::debug!(
            target: "cardmotion.effect",
            effect = effect.as_str(),
            "dispatching card effect"
        );
        match *effect {
            Effect::Opened => handler.on_open(),
            Effect::Closed => handler.on_close(),
            Effect::TransitionStart { closing } => handler.on_transition_start(closing),
            Effect::GestureBegin => handler.on_gesture_begin(),
            Effect::GestureEnd => handler.on_gesture_end(),
            Effect::GestureCanceled => handler.on_gesture_canceled(),
        }
    }
}
