#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use cardmotion_core::{GestureEvent, GestureState, Layout, Visibility};
use cardmotion_runtime::{Card, CardConfig, CardPhase, Effect};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Gesture { state: u8, translation: i16, velocity: i16 },
    Layout { width: u16, height: u16 },
    RequestOpen,
    RequestClose,
    Back,
    GesturesEnabled(bool),
    FirstInStack(bool),
    Frame { ms: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    start_open: bool,
    ops: Vec<Op>,
}

fn gesture_state(tag: u8) -> GestureState {
    match tag % 6 {
        0 => GestureState::Possible,
        1 => GestureState::Began,
        2 | 3 => GestureState::Active,
        4 => GestureState::End,
        _ => GestureState::Cancelled,
    }
}

fuzz_target!(|input: Input| {
    // Cap length to keep fuzzing fast.
    if input.ops.len() > 512 {
        return;
    }
    let initial = Visibility::from_open(input.start_open);
    let Ok(mut card) = Card::new(CardConfig::default(), initial) else {
        return;
    };
    let mut last_notified = initial;

    for op in &input.ops {
        match *op {
            Op::Gesture {
                state,
                translation,
                velocity,
            } => card.push_gesture(GestureEvent::new(
                gesture_state(state),
                f64::from(translation),
                f64::from(velocity) * 4.0,
            )),
            Op::Layout { width, height } => {
                card.set_layout(Layout::new(f64::from(width % 2048), f64::from(height % 2048)));
            }
            Op::RequestOpen => card.request_open(),
            Op::RequestClose => card.request_close(),
            Op::Back => {
                card.handle_back_request();
            }
            Op::GesturesEnabled(enabled) => card.set_gestures_enabled(enabled),
            Op::FirstInStack(first) => card.set_first_in_stack(first),
            Op::Frame { ms } => {
                let out = card.step(Duration::from_millis(u64::from(ms)));

                // Post-conditions that must always hold:
                assert!(out.position >= 0.0, "negative position {}", out.position);
                let p = out.progress.value();
                assert!((0.0..=1.0).contains(&p), "progress out of range: {p}");
                if out.phase == CardPhase::Dragging {
                    assert!(card.state().is_dragging(), "dragging phase without a session");
                }
                for effect in &out.effects {
                    let settled = match effect {
                        Effect::Opened => Visibility::Open,
                        Effect::Closed => Visibility::Closed,
                        _ => continue,
                    };
                    assert_ne!(settled, last_notified, "duplicate settle notification");
                    last_notified = settled;
                }
            }
        }
    }
});
