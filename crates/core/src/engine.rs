//! Engine facade tying the registries together.

use crate::deps::is_active;
use crate::dispatch::FieldRegistry;
use crate::preview::PreviewRegistry;
use crate::registry::{DependencyPolicy, TemplateRegistry};
use crate::resolve::resolve_settings;
use embedkit_types::{FormRow, FormSection, Menu, RenderNode, Settings, Template, ViewMode};
use serde_json::Value;

/// The assembled widget engine: template, field and preview registries.
///
/// The engine is a pure function of (template, settings record): it holds
/// no per-instance state and nothing survives across editing sessions.
pub struct WidgetEngine {
    templates: TemplateRegistry,
    fields: FieldRegistry,
    previews: PreviewRegistry,
}

impl WidgetEngine {
    pub fn new() -> Self {
        Self::with_policy(DependencyPolicy::default())
    }

    pub fn with_policy(policy: DependencyPolicy) -> Self {
        Self {
            templates: TemplateRegistry::with_policy(policy),
            fields: FieldRegistry::new(),
            previews: PreviewRegistry::new(),
        }
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.templates
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldRegistry {
        &mut self.fields
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn previews_mut(&mut self) -> &mut PreviewRegistry {
        &mut self.previews
    }

    /// Shared render entry point for the editor preview and the embed
    /// loader; identical inputs yield an identical tree.
    ///
    /// Settings are resolved against the template before projection. An
    /// unknown (widget type, template) pair renders the placeholder rather
    /// than erroring.
    pub fn render(
        &self,
        widget_type_id: &str,
        template_id: &str,
        settings: &Settings,
        mode: ViewMode,
        data: Option<&Value>,
    ) -> RenderNode {
        let renderer = self.previews.select(widget_type_id, template_id);
        match self.templates.template(widget_type_id, template_id) {
            Some(template) => {
                let resolved = resolve_settings(template, settings);
                renderer.render(&resolved, mode, data)
            }
            None => {
                log::debug!(
                    "no template `{template_id}` under widget type `{widget_type_id}`; rendering unresolved"
                );
                renderer.render(settings, mode, data)
            }
        }
    }

    /// Project the editor form model: sections and rows with active flags
    /// and dispatched input descriptions.
    pub fn form_model(
        &self,
        widget_type_id: &str,
        template_id: &str,
        settings: &Settings,
    ) -> Option<Vec<FormSection>> {
        let template = self.templates.template(widget_type_id, template_id)?;
        let resolved = resolve_settings(template, settings);
        Some(
            template
                .options
                .iter()
                .map(|group| FormSection {
                    id: group.id.clone(),
                    name: group.name.clone(),
                    rows: group
                        .menus
                        .iter()
                        .map(|menu| self.form_row(template, &resolved, menu))
                        .collect(),
                })
                .collect(),
        )
    }

    fn form_row(&self, template: &Template, resolved: &Settings, menu: &Menu) -> FormRow {
        let value = resolved.get(&menu.id).cloned().unwrap_or(Value::Null);
        FormRow {
            menu_id: menu.id.clone(),
            label: menu.label.clone(),
            field_type: menu.field_type.clone(),
            active: is_active(template, resolved, &menu.id),
            input: self.fields.renderer(&menu.field_type).render_input(menu, &value),
            children: menu
                .children
                .iter()
                .map(|child| self.form_row(template, resolved, child))
                .collect(),
        }
    }
}

impl Default for WidgetEngine {
    fn default() -> Self {
        Self::new()
    }
}
