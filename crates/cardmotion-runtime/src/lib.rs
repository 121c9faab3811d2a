#![forbid(unsafe_code)]

//! cardmotion runtime
//!
//! This crate ties the leaf components of `cardmotion-core` into the
//! frame-stepped controller of one card.
//!
//! # Key Components
//!
//! - [`Card`] - Queued-input facade hosts call into
//! - [`step`] - Pure per-frame state machine over [`CardState`]
//! - [`Progress`] - Normalized [0, 1] signal for styling
//! - [`Effect`] / [`EffectHandler`] - Notifications run after the step
//! - [`CardConfig`] - Every tunable, optionally loaded from TOML/JSON
//!
//! # Role in cardmotion
//! `cardmotion-runtime` is the orchestrator. Gesture events, layout, config
//! and open/close requests arrive at any time; the runtime applies them at
//! the next frame, advances the physics, and reports position, progress and
//! effects.

pub mod card;
pub mod card_config;
pub mod dispatch;
pub mod machine;
pub mod progress;

pub use card::Card;
pub use card_config::{CardConfig, CardConfigError, TransitionSpecs};
pub use dispatch::{CallbackDispatcher, Effect, EffectHandler, dispatch_effects};
pub use machine::{CardPhase, CardState, FrameInputs, FrameOutput, step};
pub use progress::{Progress, project_progress};
