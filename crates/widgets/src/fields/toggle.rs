//! On/off switch input.

use embedkit_core::FieldRenderer;
use embedkit_types::{InputNode, Menu};
use serde_json::Value;

pub struct ToggleField;

impl FieldRenderer for ToggleField {
    fn field_type(&self) -> &str {
        "toggle"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        // a wrong-typed stored value falls back to the declared default
        let on = value
            .as_bool()
            .or_else(|| menu.default_value.as_bool())
            .unwrap_or(false);
        InputNode::new("toggle").with("on", on)
    }
}
