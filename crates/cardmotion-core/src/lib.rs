// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: value cells, transition physics, gesture tracking, swipe classification.
//!
//! # Role in cardmotion
//! `cardmotion-core` holds the leaf components of the card transition
//! controller. Nothing here knows about frames or callbacks; every type is a
//! plain value advanced explicitly by the caller.
//!
//! # Primary responsibilities
//! - **ValueCell / PendingCell**: versioned state slots and queued external writes.
//! - **Animation**: spring and timing runs that move a position toward a target.
//! - **GestureTracker**: recognizer events to drag sessions and releases.
//! - **Swipe classification**: release distance/velocity to a target visibility.
//!
//! # How it fits in the system
//! The runtime (`cardmotion-runtime`) owns one of each component per card and
//! reconciles them inside its per-frame step function.

pub mod animation;
pub mod cell;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod swipe;
pub mod visibility;

pub use animation::{
    Animation, EasingCurve, Spring, SpringConfig, Timing, TimingConfig, TransitionRun,
    TransitionSpec,
};
pub use cell::{PendingCell, ValueCell};
pub use geometry::{Axis, Layout};
pub use gesture::{DragRelease, DragUpdate, GestureEvent, GestureState, GestureTracker, ReleaseKind};
pub use swipe::{SwipeDecision, SwipeThresholds, classify_swipe};
pub use visibility::Visibility;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
