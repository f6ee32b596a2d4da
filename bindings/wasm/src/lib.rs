// WebAssembly bindings for the Morse touch decoder
use js_sys::Array;
use morse_touch_core::{Decoded, MorseDecoder, MorseEvent, MorseInterpreter, SymbolTable, TimingConfig};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

mod support;

#[wasm_bindgen]
pub fn encode_message(text: &str) -> String {
    morse_touch_core::encode_message(text)
}

#[wasm_bindgen]
pub fn decode_message(codes: &str) -> String {
    morse_touch_core::decode_message(codes)
}

// JavaScript-compatible result type
#[wasm_bindgen]
pub struct InterpretResultJs {
    letters: String,
    words: Vec<String>,
}

impl From<Vec<Decoded>> for InterpretResultJs {
    fn from(decoded: Vec<Decoded>) -> Self {
        let mut letters = String::new();
        let mut words = Vec::new();
        for item in decoded {
            match item {
                Decoded::Letter(letter) => letters.push(letter),
                Decoded::Word(word) => words.push(word),
            }
        }
        Self { letters, words }
    }
}

#[wasm_bindgen]
impl InterpretResultJs {
    /// Decoded words separated by single spaces
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Every decoded letter, in order, without word breaks
    #[wasm_bindgen(getter)]
    pub fn letters(&self) -> String {
        self.letters.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn words(&self) -> Array {
        self.words
            .iter()
            .map(|word| JsValue::from_str(word))
            .collect()
    }
}

#[wasm_bindgen]
pub fn interpret_morse_events(
    events_json: &str,
    config_json: &str,
) -> Result<InterpretResultJs, JsValue> {
    // Parse events from JSON
    let events: Vec<MorseEvent> = serde_json::from_str(events_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))?;

    // Parse config with defaults
    let params = support::parse_with_defaults::<TimingConfig>(config_json);

    Ok(morse_touch_core::interpret_events(&events, &params).into())
}

/// Stateful interpreter for live input. Every event method returns the
/// letters and words completed by that call as `{type, value}` objects.
#[wasm_bindgen]
pub struct MorseInterpreterJs {
    interpreter: MorseInterpreter,
    output: Receiver<Decoded>,
}

impl MorseInterpreterJs {
    fn build(decoder: MorseDecoder, params: TimingConfig) -> Self {
        let (sender, output) = mpsc::channel();
        let interpreter = MorseInterpreter::new(decoder, params).with_channel(sender);
        Self {
            interpreter,
            output,
        }
    }

    fn drain(&self) -> Result<JsValue, JsValue> {
        let decoded: Vec<Decoded> = self.output.try_iter().collect();
        Ok(serde_wasm_bindgen::to_value(&decoded)?)
    }
}

#[wasm_bindgen]
impl MorseInterpreterJs {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> MorseInterpreterJs {
        let params = support::parse_with_defaults::<TimingConfig>(config_json);
        Self::build(MorseDecoder::default(), params)
    }

    /// Interpreter using a custom symbol table given as `{"A": ".-", ...}`
    #[wasm_bindgen(js_name = withTable)]
    pub fn with_table(config_json: &str, table_json: &str) -> Result<MorseInterpreterJs, JsValue> {
        let params = support::parse_with_defaults::<TimingConfig>(config_json);
        let table = SymbolTable::from_json(table_json).map_err(support::to_js_error)?;
        Ok(Self::build(MorseDecoder::new(Arc::new(table)), params))
    }

    pub fn press(&mut self, timestamp: f64) -> Result<JsValue, JsValue> {
        self.interpreter.press(timestamp);
        self.drain()
    }

    pub fn release(&mut self, timestamp: f64) -> Result<JsValue, JsValue> {
        self.interpreter.release(timestamp);
        self.drain()
    }

    #[wasm_bindgen(js_name = idleTick)]
    pub fn idle_tick(&mut self, timestamp: f64) -> Result<JsValue, JsValue> {
        self.interpreter.idle_tick(timestamp);
        self.drain()
    }

    pub fn finish(&mut self) -> Result<JsValue, JsValue> {
        self.interpreter.finish();
        self.drain()
    }

    pub fn reset(&mut self) {
        self.interpreter.reset();
        // Drop anything not yet handed out
        self.output.try_iter().for_each(drop);
    }

    #[wasm_bindgen(getter, js_name = isPressed)]
    pub fn is_pressed(&self) -> bool {
        self.interpreter.is_pressed()
    }

    #[wasm_bindgen(getter, js_name = pendingSymbols)]
    pub fn pending_symbols(&self) -> String {
        self.interpreter.pending_symbols()
    }

    #[wasm_bindgen(getter, js_name = pendingWord)]
    pub fn pending_word(&self) -> String {
        self.interpreter.pending_word().to_string()
    }

    /// Suggested `idleTick` cadence in milliseconds
    #[wasm_bindgen(getter, js_name = pollIntervalMs)]
    pub fn poll_interval_ms(&self) -> f64 {
        self.interpreter.config().poll_interval * 1000.0
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_interpret_morse_events() {
        let events = r#"[
            {"type": "press", "at": 0.0}, {"type": "release", "at": 0.1},
            {"type": "idle", "at": 0.3},
            {"type": "press", "at": 0.3}, {"type": "release", "at": 0.4},
            {"type": "idle", "at": 2.5}
        ]"#;
        let result = interpret_morse_events(events, "{}").unwrap();
        assert_eq!(result.text(), "I");
        assert_eq!(result.words().length(), 1);
    }

    #[wasm_bindgen_test]
    fn test_invalid_events_json() {
        assert!(interpret_morse_events("not json", "").is_err());
    }

    #[wasm_bindgen_test]
    fn test_live_interpreter() {
        let mut interpreter = MorseInterpreterJs::new(r#"{"dotMax": 0.2}"#);
        interpreter.press(0.0).unwrap();
        interpreter.release(0.1).unwrap();
        let decoded: Vec<Decoded> =
            serde_wasm_bindgen::from_value(interpreter.idle_tick(2.0).unwrap()).unwrap();
        assert_eq!(
            decoded,
            vec![Decoded::Letter('E'), Decoded::Word("E".to_string())]
        );
    }

    #[wasm_bindgen_test]
    fn test_custom_table() {
        assert!(MorseInterpreterJs::with_table("{}", r#"{"A": ""}"#).is_err());
        let mut interpreter = MorseInterpreterJs::with_table("{}", r#"{"Z": "."}"#).unwrap();
        interpreter.press(0.0).unwrap();
        interpreter.release(0.1).unwrap();
        interpreter.finish().unwrap();
        assert_eq!(interpreter.pending_word(), "");
    }
}
