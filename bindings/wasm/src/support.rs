// Support utilities for WASM bindings
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

/// Parse JSON config with defaults
/// Returns the deserialized config or the default value if parsing fails or config is empty
pub fn parse_with_defaults<T: DeserializeOwned + Default>(config_json: &str) -> T {
    if config_json.trim().is_empty() || config_json == "{}" {
        return T::default();
    }

    match serde_json::from_str::<T>(config_json) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Invalid config JSON, using defaults: {}",
                e
            )));
            T::default()
        }
    }
}

/// Convert a core error into a JS exception value
pub fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morse_touch_core::TimingConfig;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_with_defaults::<TimingConfig>(""), TimingConfig::default());
        assert_eq!(parse_with_defaults::<TimingConfig>("  "), TimingConfig::default());
        assert_eq!(parse_with_defaults::<TimingConfig>("{}"), TimingConfig::default());
    }

    #[test]
    fn test_partial_config_merges_defaults() {
        let config = parse_with_defaults::<TimingConfig>(r#"{"dotMax": 0.25}"#);
        assert_eq!(config.dot_max, 0.25);
        assert_eq!(config.word_gap, 1.5);
    }
}
