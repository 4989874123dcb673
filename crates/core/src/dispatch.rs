//! Field type dispatch: menu kind tag -> input renderer.

use crate::error::{SchemaError, SchemaResult};
use embedkit_types::{InputNode, Menu};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

/// Control name emitted for unknown field kinds.
pub const FALLBACK_CONTROL: &str = "unsupported";

/// Renders one field kind into an input description.
///
/// Implementations read the menu's declared metadata plus the current value
/// and produce an [`InputNode`]; they must degrade gracefully on
/// wrong-typed values rather than erroring.
pub trait FieldRenderer: Send + Sync {
    /// The kind tag this renderer handles
    fn field_type(&self) -> &str;

    /// Describe the input control for `menu` holding `value`
    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode;
}

/// Type-erased field renderer for dynamic dispatch
pub type BoxedFieldRenderer = Box<dyn FieldRenderer>;

struct FallbackRenderer;

impl FieldRenderer for FallbackRenderer {
    fn field_type(&self) -> &str {
        FALLBACK_CONTROL
    }

    fn render_input(&self, menu: &Menu, value: &Value) -> InputNode {
        InputNode::new(FALLBACK_CONTROL)
            .with("field_type", menu.field_type.clone())
            .with("value", value.clone())
    }
}

static FALLBACK: Lazy<FallbackRenderer> = Lazy::new(|| FallbackRenderer);

/// Registry of field renderers, split into basic (built-in distribution)
/// and complex (widget-specific extension) kind tags.
///
/// Lookup is total: an unknown tag resolves to the fallback renderer so one
/// bad menu declaration never blocks the rest of the editor.
pub struct FieldRegistry {
    basic: HashMap<String, BoxedFieldRenderer>,
    complex: HashMap<String, BoxedFieldRenderer>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            basic: HashMap::new(),
            complex: HashMap::new(),
        }
    }

    fn contains(&self, field_type: &str) -> bool {
        self.basic.contains_key(field_type) || self.complex.contains_key(field_type)
    }

    /// Register a basic (built-in) field kind. Built-ins never collide; a
    /// collision here is a wiring bug and is reported as such.
    pub fn register_basic(&mut self, renderer: BoxedFieldRenderer) -> SchemaResult<()> {
        let field_type = renderer.field_type().to_string();
        if self.contains(&field_type) {
            return Err(SchemaError::FieldTypeCollision(field_type));
        }
        self.basic.insert(field_type, renderer);
        Ok(())
    }

    /// Register a complex (extension) field kind.
    ///
    /// Registration is additive: replacing an existing tag requires the
    /// explicit `override_existing` flag, so widget-specific field sets
    /// cannot silently collide.
    pub fn register_complex(
        &mut self,
        renderer: BoxedFieldRenderer,
        override_existing: bool,
    ) -> SchemaResult<()> {
        let field_type = renderer.field_type().to_string();
        if self.contains(&field_type) && !override_existing {
            return Err(SchemaError::FieldTypeCollision(field_type));
        }
        self.complex.insert(field_type, renderer);
        Ok(())
    }

    /// Resolve a kind tag to its renderer; unknown tags get the fallback.
    /// Complex registrations shadow basic ones.
    pub fn renderer(&self, field_type: &str) -> &dyn FieldRenderer {
        if let Some(renderer) = self.complex.get(field_type) {
            return renderer.as_ref();
        }
        if let Some(renderer) = self.basic.get(field_type) {
            return renderer.as_ref();
        }
        log::debug!("no renderer for field type `{field_type}`; using fallback");
        &*FALLBACK
    }

    /// All registered kind tags, basic and complex.
    pub fn list_field_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .basic
            .keys()
            .chain(self.complex.keys())
            .cloned()
            .collect();
        types.sort();
        types.dedup();
        types
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StubRenderer {
        tag: &'static str,
        control: &'static str,
    }

    impl FieldRenderer for StubRenderer {
        fn field_type(&self) -> &str {
            self.tag
        }

        fn render_input(&self, _menu: &Menu, value: &Value) -> InputNode {
            InputNode::new(self.control).with("value", value.clone())
        }
    }

    fn stub(tag: &'static str, control: &'static str) -> BoxedFieldRenderer {
        Box::new(StubRenderer { tag, control })
    }

    #[test]
    fn test_unknown_tag_resolves_to_fallback() {
        let registry = FieldRegistry::new();
        let menu = Menu::new("x", "X", "holo-picker", json!(null));
        let input = registry.renderer("holo-picker").render_input(&menu, &json!(1));
        assert_eq!(input.control, FALLBACK_CONTROL);
        assert_eq!(input.props.get("field_type"), Some(&json!("holo-picker")));
    }

    #[test]
    fn test_complex_collision_requires_override() {
        let mut registry = FieldRegistry::new();
        registry.register_basic(stub("text", "text")).unwrap();

        assert!(matches!(
            registry.register_complex(stub("text", "rich-text"), false),
            Err(SchemaError::FieldTypeCollision(_))
        ));

        registry
            .register_complex(stub("text", "rich-text"), true)
            .unwrap();
        // the override shadows the basic renderer
        let menu = Menu::text("t", "T", "");
        let input = registry.renderer("text").render_input(&menu, &json!(""));
        assert_eq!(input.control, "rich-text");
    }

    #[test]
    fn test_basic_collision_is_an_error() {
        let mut registry = FieldRegistry::new();
        registry.register_basic(stub("toggle", "toggle")).unwrap();
        assert!(registry.register_basic(stub("toggle", "toggle")).is_err());
    }

    #[test]
    fn test_every_declared_tag_resolves() {
        let mut registry = FieldRegistry::new();
        registry.register_basic(stub("text", "text")).unwrap();
        registry.register_complex(stub("map", "map"), false).unwrap();

        for tag in ["text", "map", "never-registered"] {
            let menu = Menu::new("m", "M", tag, json!(null));
            // must not panic, must always yield a renderer
            let _ = registry.renderer(tag).render_input(&menu, &json!(null));
        }
        assert_eq!(registry.list_field_types(), vec!["map", "text"]);
    }
}
