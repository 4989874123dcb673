//! Fixed-choice dropdown input.

use embedkit_core::FieldRenderer;
use embedkit_types::{InputNode, Menu};
use serde_json::Value;

pub struct SelectField;

impl FieldRenderer for SelectField {
    fn field_type(&self) -> &str {
        "select"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        let mut input = InputNode::new("select").with("selected", value.clone());
        match menu.meta.get("choices") {
            Some(choices) => input = input.with("choices", choices.clone()),
            None => {
                log::debug!("select menu `{}` declares no choices", menu.id);
                input = input.with("choices", Value::Array(Vec::new()));
            }
        }
        input
    }
}
