//! Numeric inputs: free-form number entry and bounded slider.

use embedkit_core::FieldRenderer;
use embedkit_types::{InputNode, Menu};
use serde_json::Value;

fn numeric(menu: &Menu, value: &Value) -> f64 {
    value
        .as_f64()
        .or_else(|| menu.default_value.as_f64())
        .unwrap_or(0.0)
}

fn with_bounds(mut input: InputNode, menu: &Menu) -> InputNode {
    for key in ["min", "max", "step"] {
        if let Some(bound) = menu.meta.get(key) {
            input = input.with(key, bound.clone());
        }
    }
    input
}

pub struct NumberField;

impl FieldRenderer for NumberField {
    fn field_type(&self) -> &str {
        "number"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        with_bounds(
            InputNode::new("number").with("value", numeric(menu, value)),
            menu,
        )
    }
}

pub struct SliderField;

impl FieldRenderer for SliderField {
    fn field_type(&self) -> &str {
        "slider"
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        let step = menu.meta.get("step").and_then(|v| v.as_f64()).unwrap_or(1.0);
        with_bounds(
            InputNode::new("slider")
                .with("value", numeric(menu, value))
                .with("step", step),
            menu,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_bounds_come_from_meta() {
        let menu = Menu::number("limit", "Limit", 9)
            .with_meta("min", 1)
            .with_meta("max", 50);
        let input = NumberField.render_input(&menu, &json!(12));
        assert_eq!(input.props.get("value"), Some(&json!(12.0)));
        assert_eq!(input.props.get("min"), Some(&json!(1)));
        assert_eq!(input.props.get("max"), Some(&json!(50)));
    }

    #[test]
    fn test_wrong_typed_value_degrades_to_default() {
        let menu = Menu::number("limit", "Limit", 9);
        let input = NumberField.render_input(&menu, &json!("many"));
        assert_eq!(input.props.get("value"), Some(&json!(9.0)));
    }

    #[test]
    fn test_slider_has_a_step() {
        let menu = Menu::new("cols", "Columns", "slider", json!(3))
            .with_meta("min", 1)
            .with_meta("max", 6);
        let input = SliderField.render_input(&menu, &json!(4));
        assert_eq!(input.props.get("step"), Some(&json!(1.0)));
    }
}
