//! Deterministic replay of an input script through a card.
//!
//! Frames are spaced exactly `1 / fps` apart. Before frame `n` (time
//! `n * dt`) every input stamped at or before that time is queued on the
//! card, then the card steps once. After the last input the replay keeps
//! stepping until the card settles or `settle_frames` more frames pass.

use std::io::Write;
use std::time::Duration;

use cardmotion_core::Visibility;
use cardmotion_runtime::{Card, CardConfig, CardPhase, Effect, EffectHandler, FrameOutput, dispatch_effects};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::trace::{MAX_AT_MS, Script, ScriptInput};

/// Replay settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    pub fps: u32,
    /// Frames allowed after the last input for the card to settle.
    pub settle_frames: u32,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            settle_frames: 600,
        }
    }
}

/// One JSONL output line per frame.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrameRecord {
    pub event: &'static str,
    pub frame: u64,
    pub t_ms: f64,
    pub position: f64,
    pub progress: f64,
    pub progress_fallback: bool,
    pub phase: &'static str,
    pub visibility: Visibility,
    pub gesture_enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<&'static str>,
}

impl FrameRecord {
    fn from_output(out: &FrameOutput, t_ms: f64) -> Self {
        Self {
            event: "frame",
            frame: out.frame,
            t_ms,
            position: out.position,
            progress: out.progress.value(),
            progress_fallback: out.progress.is_fallback(),
            phase: out.phase.as_str(),
            visibility: out.visibility,
            gesture_enabled: out.gesture_enabled,
            effects: out.effects.iter().map(Effect::as_str).collect(),
        }
    }
}

/// Final JSONL line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplaySummary {
    pub event: &'static str,
    pub frames: u64,
    pub opened: u32,
    pub closed: u32,
    pub back_consumed: u32,
    pub final_visibility: Visibility,
    pub final_position: f64,
    pub settled: bool,
}

#[derive(Default)]
struct Counter {
    opened: u32,
    closed: u32,
}

impl EffectHandler for Counter {
    fn on_open(&mut self) {
        self.opened += 1;
    }

    fn on_close(&mut self) {
        self.closed += 1;
    }
}

fn build_card(script: &Script, config: CardConfig) -> Result<Card> {
    let header = script.header;
    let card = match (header.entering, header.layout) {
        (true, Some(layout)) => Card::entering(config, layout, header.initial)?,
        (true, None) => {
            return Err(HarnessError::invalid_trace(
                "an entering card needs a header layout",
            ));
        }
        (false, layout) => {
            let mut card = Card::new(config, header.initial)?;
            if let Some(layout) = layout {
                card.set_layout(layout);
            }
            card
        }
    };
    Ok(card)
}

/// Replay `script`, writing frame records and the summary to `out`.
pub fn replay(
    script: &Script,
    config: CardConfig,
    options: ReplayOptions,
    out: &mut impl Write,
) -> Result<ReplaySummary> {
    if options.fps == 0 {
        return Err(HarnessError::invalid("fps must be > 0"));
    }
    if script.duration_ms() > MAX_AT_MS {
        return Err(HarnessError::invalid_trace(format!(
            "script runs to {} ms, past the maximum of {MAX_AT_MS} ms",
            script.duration_ms()
        )));
    }
    let mut card = build_card(script, config)?;
    let dt = Duration::from_secs_f64(1.0 / f64::from(options.fps));
    let frame_ms = 1000.0 / f64::from(options.fps);

    let mut counter = Counter::default();
    let mut back_consumed = 0u32;
    let mut next_input = 0usize;
    let mut frame = 0u64;
    let mut idle_frames = 0u32;
    let mut settled = false;

    tracing::info!(
        inputs = script.inputs.len(),
        fps = options.fps,
        initial = %script.header.initial,
        "replay started"
    );

    loop {
        frame += 1;
        let t_ms = frame as f64 * frame_ms;

        while let Some(timed) = script.inputs.get(next_input) {
            if timed.at_ms as f64 > t_ms {
                break;
            }
            if apply_input(&mut card, timed.input) {
                back_consumed += 1;
            }
            next_input += 1;
        }

        let output = card.step(dt);
        dispatch_effects(&output.effects, &mut counter);
        serde_json::to_writer(&mut *out, &FrameRecord::from_output(&output, t_ms))?;
        writeln!(out)?;

        if next_input < script.inputs.len() {
            continue;
        }
        if matches!(output.phase, CardPhase::Open | CardPhase::Closed) {
            settled = true;
            break;
        }
        idle_frames += 1;
        if idle_frames >= options.settle_frames {
            tracing::warn!(frames = frame, "card did not settle before the frame limit");
            break;
        }
    }

    let state = card.state();
    let summary = ReplaySummary {
        event: "summary",
        frames: frame,
        opened: counter.opened,
        closed: counter.closed,
        back_consumed,
        final_visibility: state.visibility(),
        final_position: state.position(),
        settled,
    };
    serde_json::to_writer(&mut *out, &summary)?;
    writeln!(out)?;
    out.flush()?;

    tracing::info!(frames = frame, settled, "replay finished");
    Ok(summary)
}

/// Queue one input. Returns `true` for a consumed back request.
fn apply_input(card: &mut Card, input: ScriptInput) -> bool {
    match input {
        ScriptInput::Gesture(event) => card.push_gesture(event),
        ScriptInput::Layout(layout) => card.set_layout(layout),
        ScriptInput::RequestOpen => card.request_open(),
        ScriptInput::RequestClose => card.request_close(),
        ScriptInput::Back => return card.handle_back_request(),
        ScriptInput::GesturesEnabled(enabled) => card.set_gestures_enabled(enabled),
        ScriptInput::FirstInStack(first) => card.set_first_in_stack(first),
    }
    false
}
