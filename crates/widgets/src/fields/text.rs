//! Single-line and multi-line text inputs.

use embedkit_core::FieldRenderer;
use embedkit_types::{InputNode, Menu};
use serde_json::Value;

pub struct TextField;

impl FieldRenderer for TextField {
    fn field_type(&self) -> &str {
        "text"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        let mut input = InputNode::new("text").with("value", value.clone());
        if let Some(placeholder) = menu.meta.get("placeholder") {
            input = input.with("placeholder", placeholder.clone());
        }
        input
    }
}

pub struct TextAreaField;

impl FieldRenderer for TextAreaField {
    fn field_type(&self) -> &str {
        "textarea"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        let rows = menu.meta.get("rows").and_then(|v| v.as_u64()).unwrap_or(4);
        InputNode::new("textarea")
            .with("value", value.clone())
            .with("rows", rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_carries_value_and_placeholder() {
        let menu = Menu::text("title", "Title", "").with_meta("placeholder", "Your title");
        let input = TextField.render_input(&menu, &json!("hello"));
        assert_eq!(input.control, "text");
        assert_eq!(input.props.get("value"), Some(&json!("hello")));
        assert_eq!(input.props.get("placeholder"), Some(&json!("Your title")));
    }

    #[test]
    fn test_textarea_rows_default() {
        let menu = Menu::new("body", "Body", "textarea", json!(""));
        let input = TextAreaField.render_input(&menu, &json!("x"));
        assert_eq!(input.props.get("rows"), Some(&json!(4)));
    }
}
