use serde::{Deserialize, Serialize};

/// One classified key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorseSymbol {
    Dot,
    Dash,
}

impl MorseSymbol {
    pub const DOT_CHAR: char = '.';
    pub const DASH_CHAR: char = '-';

    pub fn as_char(self) -> char {
        match self {
            MorseSymbol::Dot => Self::DOT_CHAR,
            MorseSymbol::Dash => Self::DASH_CHAR,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            Self::DOT_CHAR => Some(MorseSymbol::Dot),
            Self::DASH_CHAR => Some(MorseSymbol::Dash),
            _ => None,
        }
    }
}

/// Render a sequence of symbols as a symbol string such as `"-.-"`.
pub fn symbols_to_string(symbols: &[MorseSymbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

/// What an idle gap of a given length concludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    None,
    Letter,
    Word,
}

/// Thresholds (in seconds) used to interpret key timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingConfig {
    /// Presses up to and including this long are dots, longer ones dashes.
    pub dot_max: f64,
    /// Idle this long concludes the current letter.
    pub letter_gap: f64,
    /// Idle this long concludes the current word.
    pub word_gap: f64,
    /// How often the driving loop should call `idle_tick`. Advisory only.
    pub poll_interval: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dot_max: 0.3,
            letter_gap: 0.7,
            word_gap: 1.5,
            poll_interval: 0.01,
        }
    }
}

/// Input event for the interpreter, timestamped in seconds on a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MorseEvent {
    Press { at: f64 },
    Release { at: f64 },
    #[serde(rename = "idle")]
    IdleTick { at: f64 },
}

impl MorseEvent {
    pub fn timestamp(&self) -> f64 {
        match *self {
            MorseEvent::Press { at } | MorseEvent::Release { at } | MorseEvent::IdleTick { at } => {
                at
            }
        }
    }
}

/// One step of a simulated keying sequence: hold for `press` seconds, then
/// stay released for `gap` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressGap {
    pub press: f64,
    pub gap: f64,
}

impl PressGap {
    pub const fn new(press: f64, gap: f64) -> Self {
        Self { press, gap }
    }
}

/// Output produced by the interpreter, in completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Decoded {
    Letter(char),
    Word(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_chars() {
        assert_eq!(MorseSymbol::from_char('.'), Some(MorseSymbol::Dot));
        assert_eq!(MorseSymbol::from_char('-'), Some(MorseSymbol::Dash));
        assert_eq!(MorseSymbol::from_char('_'), None);
        assert_eq!(
            symbols_to_string(&[MorseSymbol::Dash, MorseSymbol::Dot, MorseSymbol::Dash]),
            "-.-"
        );
    }

    #[test]
    fn test_timing_config_json_deserialization() {
        // Empty object falls back to defaults
        let config: TimingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TimingConfig::default());

        // Partial JSON merges with defaults
        let config: TimingConfig =
            serde_json::from_str(r#"{"dotMax": 0.2, "wordGap": 2.0}"#).unwrap();
        assert_eq!(config.dot_max, 0.2);
        assert_eq!(config.letter_gap, 0.7);
        assert_eq!(config.word_gap, 2.0);
        assert_eq!(config.poll_interval, 0.01);
    }

    #[test]
    fn test_event_json() {
        let events: Vec<MorseEvent> = serde_json::from_str(
            r#"[{"type": "press", "at": 1.0}, {"type": "release", "at": 1.1}, {"type": "idle", "at": 3.0}]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                MorseEvent::Press { at: 1.0 },
                MorseEvent::Release { at: 1.1 },
                MorseEvent::IdleTick { at: 3.0 },
            ]
        );
        assert_eq!(events[2].timestamp(), 3.0);
    }

    #[test]
    fn test_decoded_json() {
        let json = serde_json::to_string(&Decoded::Word("SOS".to_string())).unwrap();
        assert_eq!(json, r#"{"type":"word","value":"SOS"}"#);
    }
}
