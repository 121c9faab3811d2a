//! Input scripts: JSONL records of timed card inputs.
//!
//! The first non-empty line may be a `header`; every other line is an input
//! stamped with `at_ms`, the time since replay start at which it is queued.
//! Stamps above [`MAX_AT_MS`] are rejected.
//!
//! ```text
//! {"event":"header","schema_version":"card-script-v1","initial":"open","layout":{"width":390.0,"height":844.0}}
//! {"event":"gesture","at_ms":100,"state":"active","translation":40.0,"velocity":0.0}
//! {"event":"gesture","at_ms":200,"state":"end","translation":80.0,"velocity":0.0}
//! {"event":"request_open","at_ms":900}
//! ```

use std::io::BufRead;

use cardmotion_core::{GestureEvent, GestureState, Layout, Visibility};
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Current schema version for input scripts.
pub const SCHEMA_VERSION: &str = "card-script-v1";

/// Latest accepted input stamp (five minutes). Replay steps every frame up to
/// the last input, so this bounds the output of any script.
pub const MAX_AT_MS: u64 = 300_000;

/// A single line of an input script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum ScriptRecord {
    /// Header record (first line).
    #[serde(rename = "header")]
    Header {
        schema_version: String,
        initial: Visibility,
        /// Start at the opposite resting position and animate in.
        #[serde(default)]
        entering: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layout: Option<Layout>,
    },

    #[serde(rename = "gesture")]
    Gesture {
        at_ms: u64,
        state: GestureState,
        translation: f64,
        velocity: f64,
    },

    #[serde(rename = "layout")]
    Layout { at_ms: u64, width: f64, height: f64 },

    #[serde(rename = "request_open")]
    RequestOpen { at_ms: u64 },

    #[serde(rename = "request_close")]
    RequestClose { at_ms: u64 },

    #[serde(rename = "back")]
    Back { at_ms: u64 },

    #[serde(rename = "gestures_enabled")]
    GesturesEnabled { at_ms: u64, enabled: bool },

    #[serde(rename = "first_in_stack")]
    FirstInStack { at_ms: u64, first: bool },
}

/// How the card starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptHeader {
    pub initial: Visibility,
    pub entering: bool,
    pub layout: Option<Layout>,
}

impl Default for ScriptHeader {
    fn default() -> Self {
        Self {
            initial: Visibility::Open,
            entering: false,
            layout: None,
        }
    }
}

/// One input to queue on the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptInput {
    Gesture(GestureEvent),
    Layout(Layout),
    RequestOpen,
    RequestClose,
    Back,
    GesturesEnabled(bool),
    FirstInStack(bool),
}

/// An input with its queue time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedInput {
    pub at_ms: u64,
    pub input: ScriptInput,
}

/// A parsed script, inputs sorted by time (stable for equal stamps).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub header: ScriptHeader,
    pub inputs: Vec<TimedInput>,
}

impl Script {
    /// Time of the last input, or 0 for an empty script.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.inputs.last().map_or(0, |input| input.at_ms)
    }
}

impl ScriptRecord {
    fn into_input(self) -> Option<TimedInput> {
        let (at_ms, input) = match self {
            Self::Header { .. } => return None,
            Self::Gesture {
                at_ms,
                state,
                translation,
                velocity,
            } => (
                at_ms,
                ScriptInput::Gesture(GestureEvent::new(state, translation, velocity)),
            ),
            Self::Layout {
                at_ms,
                width,
                height,
            } => (at_ms, ScriptInput::Layout(Layout::new(width, height))),
            Self::RequestOpen { at_ms } => (at_ms, ScriptInput::RequestOpen),
            Self::RequestClose { at_ms } => (at_ms, ScriptInput::RequestClose),
            Self::Back { at_ms } => (at_ms, ScriptInput::Back),
            Self::GesturesEnabled { at_ms, enabled } => {
                (at_ms, ScriptInput::GesturesEnabled(enabled))
            }
            Self::FirstInStack { at_ms, first } => (at_ms, ScriptInput::FirstInStack(first)),
        };
        Some(TimedInput { at_ms, input })
    }
}

/// Parse a JSONL script. Blank lines are skipped.
pub fn parse_script(reader: impl BufRead) -> Result<Script> {
    let mut script = Script::default();
    let mut seen_record = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ScriptRecord = serde_json::from_str(&line).map_err(|source| {
            HarnessError::TraceLine {
                line: index + 1,
                source,
            }
        })?;

        if let ScriptRecord::Header {
            schema_version,
            initial,
            entering,
            layout,
        } = record
        {
            if seen_record {
                return Err(HarnessError::invalid_trace(format!(
                    "line {}: header must be the first record",
                    index + 1
                )));
            }
            if schema_version != SCHEMA_VERSION {
                return Err(HarnessError::invalid_trace(format!(
                    "unsupported schema_version {schema_version:?}, expected {SCHEMA_VERSION:?}"
                )));
            }
            script.header = ScriptHeader {
                initial,
                entering,
                layout,
            };
        } else if let Some(input) = record.into_input() {
            if input.at_ms > MAX_AT_MS {
                return Err(HarnessError::invalid_trace(format!(
                    "line {}: at_ms {} exceeds the maximum of {MAX_AT_MS}",
                    index + 1,
                    input.at_ms
                )));
            }
            script.inputs.push(input);
        }
        seen_record = true;
    }

    script.inputs.sort_by_key(|input| input.at_ms);
    Ok(script)
}
