#![no_main]

use cardmotion_harness::trace::parse_script;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap length to keep fuzzing fast.
    if data.len() > 4096 {
        return;
    }

    // Parsing must never panic; a parsed script is always time-ordered.
    if let Ok(script) = parse_script(data) {
        assert!(
            script.inputs.windows(2).all(|w| w[0].at_ms <= w[1].at_ms),
            "inputs out of order"
        );
        assert_eq!(
            script.duration_ms(),
            script.inputs.last().map_or(0, |input| input.at_ms)
        );
    }
});
