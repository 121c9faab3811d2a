#![forbid(unsafe_code)]

//! Card configuration: every tunable of a card in one value.
//!
//! [`CardConfig`] can be built in code or, with the `card-config` feature,
//! loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # card.toml
//! axis = "vertical"
//! first_in_stack = false
//!
//! [transition.open]
//! kind = "spring"
//! stiffness = 1000.0
//! damping = 500.0
//! mass = 3.0
//! overshoot_clamping = true
//!
//! [transition.close]
//! kind = "timing"
//! duration_ms = 350
//! easing = "out_poly5"
//!
//! [swipe]
//! velocity = 500.0
//! distance = 60.0
//! ```
//!
//! ```rust,ignore
//! let config = CardConfig::from_toml_file("card.toml")?;
//! let config = CardConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Both directions use the iOS spring preset, the axis is horizontal, swipe
//! thresholds are 500/60/5, gestures are enabled and the card is not first in
//! its stack.

#[cfg(feature = "card-config")]
use std::path::Path;

#[cfg(feature = "card-config")]
use serde::{Deserialize, Serialize};

use cardmotion_core::{Axis, SwipeThresholds, TransitionSpec, Visibility};

// ---------------------------------------------------------------------------
// TransitionSpecs
// ---------------------------------------------------------------------------

/// Transition used for each direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "card-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "card-config", serde(default))]
pub struct TransitionSpecs {
    /// Used for runs heading to [`Visibility::Open`].
    pub open: TransitionSpec,
    /// Used for runs heading to [`Visibility::Closed`].
    pub close: TransitionSpec,
}

impl TransitionSpecs {
    /// Same spec in both directions.
    #[must_use]
    pub fn both(spec: TransitionSpec) -> Self {
        Self {
            open: spec,
            close: spec,
        }
    }

    /// Transition used by a run heading to `target`.
    #[inline]
    #[must_use]
    pub fn for_visibility(&self, target: Visibility) -> &TransitionSpec {
        match target {
            Visibility::Open => &self.open,
            Visibility::Closed => &self.close,
        }
    }
}

// ---------------------------------------------------------------------------
// CardConfig
// ---------------------------------------------------------------------------

/// Top-level configuration of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "card-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "card-config", serde(default))]
pub struct CardConfig {
    /// Open and close transitions.
    pub transition: TransitionSpecs,

    /// Axis the card translates along.
    pub axis: Axis,

    /// Release classification thresholds.
    pub swipe: SwipeThresholds,

    /// Whether drag gestures may move the card.
    pub gestures_enabled: bool,

    /// First card of a stack: cannot be dismissed by drag or back request.
    pub first_in_stack: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            transition: TransitionSpecs::default(),
            axis: Axis::default(),
            swipe: SwipeThresholds::default(),
            gestures_enabled: true,
            first_in_stack: false,
        }
    }
}

impl CardConfig {
    /// Load from a TOML string.
    #[cfg(feature = "card-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, CardConfigError> {
        toml::from_str(s).map_err(CardConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "card-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CardConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CardConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "card-config")]
    pub fn from_json_str(s: &str) -> Result<Self, CardConfigError> {
        serde_json::from_str(s).map_err(CardConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "card-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CardConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CardConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json` is JSON,
    /// anything else TOML), then validate.
    #[cfg(feature = "card-config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CardConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        config.validated()
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.transition.open.validate("transition.open");
        errors.extend(self.transition.close.validate("transition.close"));
        errors.extend(self.swipe.validate("swipe"));
        errors
    }

    /// `Ok(self)` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, CardConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(CardConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading or applying a card configuration.
#[derive(Debug)]
pub enum CardConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "card-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "card-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for CardConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "card-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "card-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for CardConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "card-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "card-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
