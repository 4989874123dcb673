//! Flat settings records keyed by menu id.

use serde_json::Value;
use std::collections::HashMap;

/// The flat persisted key/value state for one widget instance.
///
/// Keys are menu ids from the instance's template. Extra keys are tolerated
/// (they are simply not rendered); missing keys are filled from declared
/// defaults by the resolver, never treated as errors.
pub type Settings = HashMap<String, Value>;

/// Read a string setting; non-string values read as absent.
pub fn str_value<'a>(settings: &'a Settings, key: &str) -> Option<&'a str> {
    settings.get(key).and_then(|value| value.as_str())
}

/// Read a boolean setting; anything but `true` reads as `false`.
pub fn bool_value(settings: &Settings, key: &str) -> bool {
    settings
        .get(key)
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Read a numeric setting.
pub fn f64_value(settings: &Settings, key: &str) -> Option<f64> {
    settings.get(key).and_then(|value| value.as_f64())
}

/// Read a non-negative integer setting, accepting float representations.
pub fn u64_value(settings: &Settings, key: &str) -> Option<u64> {
    settings.get(key).and_then(|value| {
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_reads_degrade_gracefully() {
        let mut settings = Settings::new();
        settings.insert("title".into(), json!("hello"));
        settings.insert("count".into(), json!(3.0));
        settings.insert("enabled".into(), json!("yes"));

        assert_eq!(str_value(&settings, "title"), Some("hello"));
        assert_eq!(u64_value(&settings, "count"), Some(3));
        // wrong-typed values read as absent/false instead of erroring
        assert!(!bool_value(&settings, "enabled"));
        assert_eq!(str_value(&settings, "count"), None);
        assert_eq!(f64_value(&settings, "missing"), None);
    }
}
