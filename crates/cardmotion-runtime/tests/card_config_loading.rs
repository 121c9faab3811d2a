//! Configuration loading from TOML and JSON.
//!
//! Run:
//!   cargo test -p cardmotion-runtime --features card-config --test card_config_loading

use std::io::Write;
use std::time::Duration;

use cardmotion_core::animation::spring::presets;
use cardmotion_core::{Axis, EasingCurve, TransitionSpec};
use cardmotion_runtime::{CardConfig, CardConfigError};

const TOML: &str = r#"
axis = "vertical"
first_in_stack = true

[transition.open]
kind = "spring"
stiffness = 500.0
damping = 60.0

[transition.close]
kind = "timing"
duration_ms = 350
easing = "out_poly5"

[swipe]
distance = 80.0
"#;

#[test]
fn toml_overrides_and_defaults() {
    let config = CardConfig::from_toml_str(TOML).expect("valid toml");
    assert_eq!(config.axis, Axis::Vertical);
    assert!(config.first_in_stack);
    assert!(config.gestures_enabled, "unset fields keep defaults");

    match config.transition.open {
        TransitionSpec::Spring(spring) => {
            assert_eq!(spring.stiffness, 500.0);
            assert_eq!(spring.damping, 60.0);
            assert_eq!(spring.mass, 1.0, "missing spring fields use SpringConfig defaults");
        }
        other => panic!("expected spring, got {other:?}"),
    }
    match config.transition.close {
        TransitionSpec::Timing(timing) => {
            assert_eq!(timing.duration, Duration::from_millis(350));
            assert_eq!(timing.easing, EasingCurve::OutPoly5);
        }
        other => panic!("expected timing, got {other:?}"),
    }
    assert_eq!(config.swipe.distance, 80.0);
    assert_eq!(config.swipe.velocity, 500.0);
    assert!(config.validate().is_empty());
}

#[test]
fn empty_toml_is_default() {
    let config = CardConfig::from_toml_str("").expect("empty is valid");
    assert_eq!(config, CardConfig::default());
    assert_eq!(config.transition.close, TransitionSpec::Spring(presets::ios()));
}

#[test]
fn json_with_bezier_easing() {
    let json = r#"{
        "transition": {
            "close": {
                "kind": "timing",
                "duration_ms": 425,
                "easing": { "cubic_bezier": { "x1": 0.35, "y1": 0.45, "x2": 0.0, "y2": 1.0 } }
            }
        }
    }"#;
    let config = CardConfig::from_json_str(json).expect("valid json");
    match config.transition.close {
        TransitionSpec::Timing(timing) => assert_eq!(
            timing.easing,
            EasingCurve::CubicBezier {
                x1: 0.35,
                y1: 0.45,
                x2: 0.0,
                y2: 1.0
            }
        ),
        other => panic!("expected timing, got {other:?}"),
    }
}

#[test]
fn round_trips_through_json() {
    let mut config = CardConfig::default();
    config.axis = Axis::Vertical;
    let text = serde_json::to_string(&config).expect("serialize");
    assert_eq!(CardConfig::from_json_str(&text).expect("parse"), config);
}

#[test]
fn unknown_kind_is_a_parse_error() {
    let err = CardConfig::from_toml_str("[transition.open]\nkind = \"bounce\"\n").unwrap_err();
    assert!(matches!(err, CardConfigError::Toml(_)), "{err}");
}

#[test]
fn load_picks_format_and_validates() {
    let dir = tempfile::tempdir().expect("tempdir");

    let toml_path = dir.path().join("card.toml");
    std::fs::write(&toml_path, TOML).expect("write");
    assert_eq!(CardConfig::load(&toml_path).expect("load").axis, Axis::Vertical);

    let json_path = dir.path().join("card.json");
    let mut file = std::fs::File::create(&json_path).expect("create");
    file.write_all(br#"{ "swipe": { "velocity": -3.0 } }"#)
        .expect("write");
    drop(file);
    match CardConfig::load(&json_path) {
        Err(CardConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("swipe.velocity")));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    let missing = CardConfig::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, CardConfigError::Io(_)));
}
