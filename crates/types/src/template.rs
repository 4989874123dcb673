//! Widget template schema: templates, option groups, menus and dependencies.
//!
//! A template describes every user-editable field of one widget variant.
//! Settings records are stored flat (menu id -> value), so menu ids must be
//! unique across the whole flattened template; the registry enforces this at
//! registration time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named variant of a widget type with its own option/menu schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier within the owning widget type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description shown in the template picker
    #[serde(default)]
    pub description: String,
    /// Highlighted as a recommended starting point in the picker
    #[serde(default)]
    pub is_recommended: bool,
    /// Optional preview image reference
    #[serde(default)]
    pub preview_image: Option<String>,
    /// Ordered option groups; each group becomes an editor section
    #[serde(default)]
    pub options: Vec<OptionGroup>,
}

impl Template {
    /// Create an empty template
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_recommended: false,
            preview_image: None,
            options: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn recommended(mut self) -> Self {
        self.is_recommended = true;
        self
    }

    pub fn with_option(mut self, option: OptionGroup) -> Self {
        self.options.push(option);
        self
    }

    /// All menus in declaration order, recursing into sub-menus.
    ///
    /// Settings records are keyed by menu id with no nesting, so this
    /// flattened view is what resolution, validation and dependency
    /// evaluation operate on.
    pub fn menus(&self) -> Vec<&Menu> {
        let mut out = Vec::new();
        for option in &self.options {
            for menu in &option.menus {
                collect_menus(menu, &mut out);
            }
        }
        out
    }

    /// Look up a menu by id anywhere in the flattened template.
    pub fn menu(&self, id: &str) -> Option<&Menu> {
        self.menus().into_iter().find(|menu| menu.id == id)
    }
}

fn collect_menus<'a>(menu: &'a Menu, out: &mut Vec<&'a Menu>) {
    out.push(menu);
    for child in &menu.children {
        collect_menus(child, out);
    }
}

/// A named grouping of related menus; drives editor section headers.
///
/// Groups are purely organizational: they never affect how settings are
/// keyed or resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub menus: Vec<Menu>,
}

impl OptionGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, menus: Vec<Menu>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            menus,
        }
    }
}

/// One configurable field definition within a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    /// Settings key; unique across the whole flattened template
    pub id: String,
    /// Editor label
    pub label: String,
    /// Field kind tag, resolved through the field registry
    pub field_type: String,
    /// Value adopted when the settings record lacks this key
    #[serde(default)]
    pub default_value: Value,
    /// Kind-specific extras (choices, min/max, placeholder, ...)
    #[serde(default)]
    pub meta: Map<String, Value>,
    /// Condition on another menu's value controlling this menu's active state
    #[serde(default)]
    pub depends_on: Option<Dependency>,
    /// Nested sub-menus for expandable/grouped kinds
    #[serde(default)]
    pub children: Vec<Menu>,
}

impl Menu {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        field_type: impl Into<String>,
        default_value: impl Into<Value>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type: field_type.into(),
            default_value: default_value.into(),
            meta: Map::new(),
            depends_on: None,
            children: Vec::new(),
        }
    }

    /// A single-line text field.
    pub fn text(id: impl Into<String>, label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(id, label, "text", Value::String(default.into()))
    }

    /// An on/off switch.
    pub fn toggle(id: impl Into<String>, label: impl Into<String>, default: bool) -> Self {
        Self::new(id, label, "toggle", default)
    }

    /// A numeric field.
    pub fn number(id: impl Into<String>, label: impl Into<String>, default: impl Into<Value>) -> Self {
        Self::new(id, label, "number", default)
    }

    /// A fixed-choice dropdown; choices land in `meta.choices`.
    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        default: impl Into<String>,
        choices: &[&str],
    ) -> Self {
        let choices: Vec<Value> = choices
            .iter()
            .map(|choice| Value::String((*choice).to_string()))
            .collect();
        Self::new(id, label, "select", Value::String(default.into()))
            .with_meta("choices", Value::Array(choices))
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Gate this menu on another menu's value.
    pub fn requires(mut self, dependency: Dependency) -> Self {
        self.depends_on = Some(dependency);
        self
    }

    pub fn with_children(mut self, children: Vec<Menu>) -> Self {
        self.children = children;
        self
    }
}

/// A condition on another menu's value controlling a menu's active state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Id of the referenced menu in the same flattened template
    pub menu_id: String,
    #[serde(default)]
    pub condition: DependencyCondition,
}

impl Dependency {
    /// Active when the referenced menu's resolved value equals `value`.
    pub fn on(menu_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            menu_id: menu_id.into(),
            condition: DependencyCondition::Equals(value.into()),
        }
    }

    /// Active when the referenced menu's resolved value is truthy.
    pub fn truthy(menu_id: impl Into<String>) -> Self {
        Self {
            menu_id: menu_id.into(),
            condition: DependencyCondition::Truthy,
        }
    }

    /// Active when the referenced menu's resolved value is any of `values`.
    pub fn one_of(menu_id: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            menu_id: menu_id.into(),
            condition: DependencyCondition::OneOf(values),
        }
    }
}

/// Predicate applied to the referenced menu's resolved value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value")]
pub enum DependencyCondition {
    /// Strict equality with the resolved value
    #[serde(rename = "equals")]
    Equals(Value),
    /// Any of the listed values
    #[serde(rename = "one_of")]
    OneOf(Vec<Value>),
    /// Non-null, non-false, non-empty, non-zero
    #[serde(rename = "truthy")]
    #[default]
    Truthy,
}

impl DependencyCondition {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            DependencyCondition::Equals(expected) => value == expected,
            DependencyCondition::OneOf(values) => values.contains(value),
            DependencyCondition::Truthy => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
                Value::String(s) => !s.is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
            },
        }
    }
}
