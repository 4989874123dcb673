//! Color and image inputs.

use embedkit_core::FieldRenderer;
use embedkit_types::{InputNode, Menu};
use serde_json::Value;

pub struct ColorField;

impl FieldRenderer for ColorField {
    fn field_type(&self) -> &str {
        "color"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        let color = value
            .as_str()
            .or_else(|| menu.default_value.as_str())
            .unwrap_or("#000000");
        InputNode::new("color").with("value", color)
    }
}

pub struct ImageField;

impl FieldRenderer for ImageField {
    fn field_type(&self) -> &str {
        "image"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        let url = value
            .as_str()
            .or_else(|| menu.default_value.as_str())
            .unwrap_or("");
        let mut input = InputNode::new("image").with("url", url);
        if let Some(alt) = menu.meta.get("alt") {
            input = input.with("alt", alt.clone());
        }
        input
    }
}
