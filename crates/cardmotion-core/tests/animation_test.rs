//! Integration tests for the animation module.

use cardmotion_core::animation::spring::presets as spring_presets;
use cardmotion_core::animation::timing::presets as timing_presets;
use cardmotion_core::animation::*;
use cardmotion_core::Visibility;
use std::time::Duration;

const MS_16: Duration = Duration::from_millis(16);

fn settle(run: &mut TransitionRun, max_frames: usize) -> Vec<f64> {
    let mut trace = Vec::new();
    for _ in 0..max_frames {
        trace.push(run.tick(MS_16));
        if run.is_finished() {
            break;
        }
    }
    trace
}

#[test]
fn easing_functions_are_monotonic() {
    for easing in [
        linear,
        ease_in,
        ease_out,
        ease_in_out,
        ease_in_cubic,
        ease_out_cubic,
        out_poly5,
    ] {
        let mut prev = 0.0f64;
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let v = easing(t);
            assert!(v >= prev - 1e-12, "easing not monotonic at t={t}: {v} < {prev}");
            prev = v;
        }
    }
}

#[test]
fn reveal_bezier_is_monotonic() {
    let curve = timing_presets::reveal_android().easing;
    let mut prev = 0.0f64;
    for i in 0..=200 {
        let v = curve.apply(f64::from(i) / 200.0);
        assert!(v >= prev - 1e-6, "bezier dipped at step {i}: {v} < {prev}");
        prev = v;
    }
}

#[test]
fn ios_spring_never_overshoots_closing() {
    let mut run = TransitionRun::start(
        &TransitionSpec::Spring(spring_presets::ios()),
        80.0,
        200.0,
        0.0,
        Visibility::Closed,
    );
    let trace = settle(&mut run, 2000);
    assert!(run.is_finished(), "ios spring should settle");
    for (frame, pos) in trace.iter().enumerate() {
        assert!(*pos <= 200.0, "overshoot at frame {frame}: {pos}");
    }
    assert_eq!(run.position(), 200.0);
}

#[test]
fn ios_spring_never_overshoots_opening() {
    let mut run = TransitionRun::start(
        &TransitionSpec::Spring(spring_presets::ios()),
        150.0,
        0.0,
        -1200.0,
        Visibility::Open,
    );
    let trace = settle(&mut run, 2000);
    assert!(run.is_finished());
    assert!(trace.iter().all(|p| *p >= 0.0), "went past 0: {trace:?}");
    assert_eq!(run.position(), 0.0);
}

#[test]
fn unclamped_gentle_spring_oscillates_then_settles() {
    let mut config = spring_presets::gentle();
    config.overshoot_clamping = false;
    let mut run = TransitionRun::start(
        &TransitionSpec::Spring(config),
        0.0,
        100.0,
        2000.0,
        Visibility::Closed,
    );
    let trace = settle(&mut run, 5000);
    assert!(run.is_finished(), "gentle spring should eventually rest");
    assert!(
        trace.iter().any(|p| *p > 100.0),
        "expected an overshoot with a strong initial velocity"
    );
    assert!((run.position() - 100.0).abs() < 1e-9);
}

#[test]
fn timing_run_reaches_target_exactly() {
    let mut run = TransitionRun::start(
        &TransitionSpec::Timing(timing_presets::fade_android()),
        0.0,
        320.0,
        0.0,
        Visibility::Closed,
    );
    settle(&mut run, 200);
    assert!(run.is_finished());
    assert_eq!(run.position(), 320.0);
    assert!(run.elapsed() >= Duration::from_millis(350));
}

#[test]
fn restart_keeps_position_continuous() {
    let spec = TransitionSpec::default();
    let mut toward_open = TransitionRun::start(&spec, 200.0, 0.0, 0.0, Visibility::Open);
    for _ in 0..5 {
        toward_open.tick(MS_16);
    }
    let here = toward_open.position();
    let mut toward_closed =
        TransitionRun::start(&spec, here, 200.0, toward_open.velocity(), Visibility::Closed);
    assert_eq!(toward_closed.tick(MS_16), here, "restart frame must not jump");
}
