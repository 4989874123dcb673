//! Template registry: widget types, their templates, and schema validation.

use crate::error::{SchemaError, SchemaResult};
use embedkit_types::Template;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How dangling `depends_on` references are treated at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DependencyPolicy {
    /// Register the template anyway; the dependent menu evaluates
    /// permanently inactive and a warning is logged.
    #[serde(rename = "lenient")]
    #[default]
    Lenient,
    /// Reject the template at registration.
    #[serde(rename = "strict")]
    Strict,
}

/// Display metadata for a registered widget type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetTypeInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl WidgetTypeInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

struct WidgetTypeEntry {
    info: WidgetTypeInfo,
    templates: Vec<Template>,
}

/// Registry of widget types and their templates.
///
/// Registration is the schema-validation boundary: a malformed template
/// (duplicate menu id, dependency cycle, dangling reference under the strict
/// policy) is rejected here and never surfaces mid-session.
pub struct TemplateRegistry {
    policy: DependencyPolicy,
    widget_types: HashMap<String, WidgetTypeEntry>,
    order: Vec<String>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::with_policy(DependencyPolicy::default())
    }

    pub fn with_policy(policy: DependencyPolicy) -> Self {
        Self {
            policy,
            widget_types: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn policy(&self) -> DependencyPolicy {
        self.policy
    }

    /// Register a widget type; re-registering an existing id is a no-op.
    pub fn register_widget_type(&mut self, info: WidgetTypeInfo) {
        if !self.widget_types.contains_key(&info.id) {
            self.order.push(info.id.clone());
            self.widget_types.insert(
                info.id.clone(),
                WidgetTypeEntry {
                    info,
                    templates: Vec::new(),
                },
            );
        }
    }

    /// Register a template under a widget type, validating its schema.
    pub fn register_template(
        &mut self,
        widget_type_id: &str,
        template: Template,
    ) -> SchemaResult<()> {
        validate_template(&template, self.policy)?;
        let entry = self
            .widget_types
            .get_mut(widget_type_id)
            .ok_or_else(|| SchemaError::UnknownWidgetType(widget_type_id.to_string()))?;
        if entry.templates.iter().any(|t| t.id == template.id) {
            return Err(SchemaError::DuplicateTemplate {
                widget_type: widget_type_id.to_string(),
                template_id: template.id,
            });
        }
        entry.templates.push(template);
        Ok(())
    }

    pub fn widget_type(&self, id: &str) -> Option<&WidgetTypeInfo> {
        self.widget_types.get(id).map(|entry| &entry.info)
    }

    pub fn template(&self, widget_type_id: &str, template_id: &str) -> Option<&Template> {
        self.widget_types
            .get(widget_type_id)?
            .templates
            .iter()
            .find(|t| t.id == template_id)
    }

    /// Templates registered under a widget type, in registration order;
    /// empty for an unknown widget type.
    pub fn templates(&self, widget_type_id: &str) -> &[Template] {
        self.widget_types
            .get(widget_type_id)
            .map(|entry| entry.templates.as_slice())
            .unwrap_or(&[])
    }

    /// Widget types in registration order.
    pub fn list_widget_types(&self) -> Vec<&WidgetTypeInfo> {
        self.order
            .iter()
            .filter_map(|id| self.widget_types.get(id).map(|entry| &entry.info))
            .collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a template's flattened schema against a dependency policy.
///
/// Checks menu id uniqueness, dependency cycles (including self-references)
/// and, under `Strict`, dangling dependency targets.
pub fn validate_template(template: &Template, policy: DependencyPolicy) -> SchemaResult<()> {
    let menus = template.menus();

    let mut ids = HashSet::new();
    for menu in &menus {
        if !ids.insert(menu.id.as_str()) {
            return Err(SchemaError::DuplicateMenuId {
                template_id: template.id.clone(),
                menu_id: menu.id.clone(),
            });
        }
    }

    // Dependency edges form a graph with at most one outgoing edge per
    // menu, so cycle detection reduces to a chain walk from every node.
    let mut targets: HashMap<&str, &str> = HashMap::new();
    for menu in &menus {
        if let Some(dep) = &menu.depends_on {
            if !ids.contains(dep.menu_id.as_str()) {
                match policy {
                    DependencyPolicy::Strict => {
                        return Err(SchemaError::DanglingDependency {
                            template_id: template.id.clone(),
                            menu_id: menu.id.clone(),
                            target: dep.menu_id.clone(),
                        })
                    }
                    DependencyPolicy::Lenient => log::warn!(
                        "template `{}`: menu `{}` depends on undeclared menu `{}` and will never be active",
                        template.id,
                        menu.id,
                        dep.menu_id
                    ),
                }
                continue;
            }
            targets.insert(menu.id.as_str(), dep.menu_id.as_str());
        }
    }

    for menu in &menus {
        let mut trail = vec![menu.id.as_str()];
        let mut seen: HashSet<&str> = trail.iter().copied().collect();
        let mut current = menu.id.as_str();
        while let Some(next) = targets.get(current).copied() {
            trail.push(next);
            if !seen.insert(next) {
                return Err(SchemaError::DependencyCycle {
                    template_id: template.id.clone(),
                    path: trail.join(" -> "),
                });
            }
            current = next;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedkit_types::{Dependency, Menu, OptionGroup};
    use serde_json::Value;

    fn registry_with_type() -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        registry.register_widget_type(WidgetTypeInfo::new("demo", "Demo", ""));
        registry
    }

    fn template_with_menus(menus: Vec<Menu>) -> Template {
        Template::new("t1", "T1").with_option(OptionGroup::new("main", "Main", menus))
    }

    #[test]
    fn test_register_and_look_up_template() {
        let mut registry = registry_with_type();
        registry
            .register_template("demo", template_with_menus(vec![Menu::toggle("a", "A", true)]))
            .unwrap();

        assert!(registry.template("demo", "t1").is_some());
        assert!(registry.template("demo", "nope").is_none());
        assert!(registry.template("ghost", "t1").is_none());
        assert_eq!(registry.templates("demo").len(), 1);
        assert_eq!(registry.list_widget_types().len(), 1);
    }

    #[test]
    fn test_duplicate_menu_id_is_rejected() {
        let mut registry = registry_with_type();
        let template = template_with_menus(vec![
            Menu::toggle("a", "A", true),
            Menu::text("a", "Also a", ""),
        ]);
        assert!(matches!(
            registry.register_template("demo", template),
            Err(SchemaError::DuplicateMenuId { .. })
        ));
    }

    #[test]
    fn test_duplicate_menu_id_in_children_is_rejected() {
        let template = template_with_menus(vec![
            Menu::toggle("a", "A", true),
            Menu::new("g", "Group", "group", Value::Null)
                .with_children(vec![Menu::toggle("a", "Nested a", false)]),
        ]);
        assert!(matches!(
            validate_template(&template, DependencyPolicy::Lenient),
            Err(SchemaError::DuplicateMenuId { .. })
        ));
    }

    #[test]
    fn test_dependency_cycle_is_rejected() {
        let template = template_with_menus(vec![
            Menu::toggle("a", "A", true).requires(Dependency::on("b", true)),
            Menu::toggle("b", "B", true).requires(Dependency::on("a", true)),
        ]);
        match validate_template(&template, DependencyPolicy::Lenient) {
            Err(SchemaError::DependencyCycle { path, .. }) => {
                assert!(path.contains("a") && path.contains("b"));
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let template = template_with_menus(vec![
            Menu::toggle("a", "A", true).requires(Dependency::on("a", true))
        ]);
        assert!(matches!(
            validate_template(&template, DependencyPolicy::Lenient),
            Err(SchemaError::DependencyCycle { .. })
        ));
    }

    #[test]
    fn test_dangling_reference_policy() {
        let template = template_with_menus(vec![
            Menu::text("msg", "Message", "").requires(Dependency::on("ghost", true))
        ]);
        assert!(validate_template(&template, DependencyPolicy::Lenient).is_ok());
        assert!(matches!(
            validate_template(&template, DependencyPolicy::Strict),
            Err(SchemaError::DanglingDependency { .. })
        ));
    }

    #[test]
    fn test_duplicate_template_id_is_rejected() {
        let mut registry = registry_with_type();
        registry
            .register_template("demo", template_with_menus(vec![]))
            .unwrap();
        assert!(matches!(
            registry.register_template("demo", template_with_menus(vec![])),
            Err(SchemaError::DuplicateTemplate { .. })
        ));
    }

    #[test]
    fn test_unknown_widget_type_is_rejected() {
        let mut registry = TemplateRegistry::new();
        assert!(matches!(
            registry.register_template("ghost", template_with_menus(vec![])),
            Err(SchemaError::UnknownWidgetType(_))
        ));
    }
}
