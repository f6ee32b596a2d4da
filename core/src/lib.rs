// Morse decoding from key press/release timing
// Turns timestamped touch or key events into letters and words

pub mod decoder;
pub mod error;
pub mod interpret;
pub mod patterns;
pub mod timing;
pub mod types;

// Re-export main public API
pub use decoder::{MorseDecoder, UNKNOWN};
pub use error::{Error, Result};
pub use interpret::{KeyState, MorseInterpreter, SOS_SEQUENCE};
pub use patterns::SymbolTable;
pub use timing::TimingIssue;
pub use types::*;

use std::sync::mpsc;

// Public API for direct Rust usage
pub fn encode_message(text: &str) -> String {
    MorseDecoder::default().encode_message(text)
}

pub fn decode_message(codes: &str) -> String {
    MorseDecoder::default().decode_message(codes)
}

/// Run a recorded event stream through a fresh interpreter and collect what
/// it decodes. Anything still buffered at the end is flushed.
pub fn interpret_events(events: &[MorseEvent], config: &TimingConfig) -> Vec<Decoded> {
    collect_decoded(config, |interpreter| {
        interpreter.replay(events);
        interpreter.finish();
    })
}

/// Key a press/gap sequence on a fresh interpreter starting at time zero and
/// collect what it decodes.
pub fn simulate_sequence(steps: &[PressGap], config: &TimingConfig) -> Vec<Decoded> {
    collect_decoded(config, |interpreter| {
        interpreter.simulate(0.0, steps);
    })
}

fn collect_decoded(
    config: &TimingConfig,
    drive: impl FnOnce(&mut MorseInterpreter),
) -> Vec<Decoded> {
    let (sender, receiver) = mpsc::channel();
    let mut interpreter =
        MorseInterpreter::new(MorseDecoder::default(), config.clone()).with_channel(sender);
    drive(&mut interpreter);
    drop(interpreter);
    receiver.into_iter().collect()
}

/// Words from a list of decoded output, in order.
pub fn words(decoded: &[Decoded]) -> Vec<&str> {
    decoded
        .iter()
        .filter_map(|d| match d {
            Decoded::Word(word) => Some(word.as_str()),
            Decoded::Letter(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_round_trip() {
        let encoded = encode_message("sos test");
        assert_eq!(encoded, "... --- ... - . ... -");
        // Word spacing is not representable at this level
        assert_eq!(decode_message(&encoded), "SOSTEST");
    }

    #[test]
    fn test_simulate_sos() {
        let decoded = simulate_sequence(SOS_SEQUENCE, &TimingConfig::default());
        assert_eq!(
            decoded,
            vec![
                Decoded::Letter('S'),
                Decoded::Letter('O'),
                Decoded::Letter('S'),
                Decoded::Word("SOS".to_string()),
            ]
        );
    }

    #[test]
    fn test_interpret_events_flushes_at_end() {
        let events = [
            MorseEvent::Press { at: 0.0 },
            MorseEvent::Release { at: 0.1 },
            MorseEvent::IdleTick { at: 1.0 },
            MorseEvent::IdleTick { at: 2.0 },
            MorseEvent::Press { at: 2.0 },
            MorseEvent::Release { at: 2.5 },
            // Stream ends before any gap is seen
        ];
        let decoded = interpret_events(&events, &TimingConfig::default());
        assert_eq!(words(&decoded), vec!["E", "T"]);
    }

    #[test]
    fn test_interpret_events_json() {
        let events: Vec<MorseEvent> = serde_json::from_str(
            r#"[
                {"type": "press", "at": 0.0}, {"type": "release", "at": 0.1},
                {"type": "idle", "at": 0.3},
                {"type": "press", "at": 0.3}, {"type": "release", "at": 0.9},
                {"type": "idle", "at": 3.0}
            ]"#,
        )
        .unwrap();
        let decoded = interpret_events(&events, &TimingConfig::default());
        assert_eq!(words(&decoded), vec!["A"]);
    }

    #[test]
    fn test_slow_config() {
        let config = TimingConfig {
            dot_max: 0.7,
            letter_gap: 1.5,
            word_gap: 3.0,
            ..Default::default()
        };
        // Every press is a dot and no gap reaches a letter boundary until the end
        let decoded = simulate_sequence(SOS_SEQUENCE, &config);
        assert_eq!(words(&decoded), vec!["?"]);
    }
}
