//! Expandable group container.
//!
//! A group renders only its own header; the form projection nests the
//! child menus as child rows, each dispatched through its own kind.

use embedkit_core::FieldRenderer;
use embedkit_types::{InputNode, Menu};
use serde_json::Value;

pub struct GroupField;

impl FieldRenderer for GroupField {
    fn field_type(&self) -> &str {
        "group"
    }

    fn render_input(&self, menu: &Menu, _value: &Value) -> InputNode {
        let expanded = menu
            .meta
            .get("expanded")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        let mut input = InputNode::new("group").with("expanded", expanded);
        if let Some(summary) = menu.meta.get("summary") {
            input = input.with("summary", summary.clone());
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_expansion_default() {
        let menu = Menu::new("units", "Units", "group", Value::Null);
        let input = GroupField.render_input(&menu, &Value::Null);
        assert_eq!(input.props.get("expanded"), Some(&json!(true)));

        let collapsed = Menu::new("units", "Units", "group", Value::Null)
            .with_meta("expanded", false);
        let input = GroupField.render_input(&collapsed, &Value::Null);
        assert_eq!(input.props.get("expanded"), Some(&json!(false)));
    }
}
