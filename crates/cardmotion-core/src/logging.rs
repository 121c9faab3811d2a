//! Logging shim.
//!
//! With the `tracing` feature the tracing macros are re-exported here. Core
//! modules log through [`trace_event!`] and [`debug_event!`], which expand to
//! nothing when the feature is off so call sites need no `cfg` noise.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_event;
pub(crate) use trace_event;
