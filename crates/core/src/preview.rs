//! Preview projection: (widget type, template) -> preview renderer.

use embedkit_types::{RenderNode, Settings, ViewMode};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

/// Renders a widget from its resolved settings.
///
/// Implementations must be referentially transparent: identical inputs
/// always produce an identical tree. Anything time- or network-dependent
/// arrives through `data`, fetched by an external collaborator.
pub trait PreviewRenderer: Send + Sync {
    fn render(&self, settings: &Settings, mode: ViewMode, data: Option<&Value>) -> RenderNode;
}

/// Type-erased preview renderer for dynamic dispatch
pub type BoxedPreviewRenderer = Box<dyn PreviewRenderer>;

struct PlaceholderPreview;

impl PreviewRenderer for PlaceholderPreview {
    fn render(&self, _settings: &Settings, _mode: ViewMode, _data: Option<&Value>) -> RenderNode {
        RenderNode::element("div")
            .class("embedkit-preview-missing")
            .text_child("No preview available")
    }
}

static PLACEHOLDER: Lazy<PlaceholderPreview> = Lazy::new(|| PlaceholderPreview);

/// Registry of preview renderers keyed by (widget type, template id).
pub struct PreviewRegistry {
    renderers: HashMap<(String, String), BoxedPreviewRenderer>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        widget_type_id: impl Into<String>,
        template_id: impl Into<String>,
        renderer: BoxedPreviewRenderer,
    ) {
        self.renderers
            .insert((widget_type_id.into(), template_id.into()), renderer);
    }

    /// Select the renderer for a pair; unregistered pairs get a
    /// "no preview available" placeholder, never an error.
    pub fn select(&self, widget_type_id: &str, template_id: &str) -> &dyn PreviewRenderer {
        match self
            .renderers
            .get(&(widget_type_id.to_string(), template_id.to_string()))
        {
            Some(renderer) => renderer.as_ref(),
            None => {
                log::debug!(
                    "no preview renderer for ({widget_type_id}, {template_id}); using placeholder"
                );
                &*PLACEHOLDER
            }
        }
    }

    pub fn contains(&self, widget_type_id: &str, template_id: &str) -> bool {
        self.renderers
            .contains_key(&(widget_type_id.to_string(), template_id.to_string()))
    }
}

impl Default for PreviewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoPreview;

    impl PreviewRenderer for EchoPreview {
        fn render(&self, settings: &Settings, mode: ViewMode, _data: Option<&Value>) -> RenderNode {
            let title = embedkit_types::str_value(settings, "title").unwrap_or("");
            RenderNode::element("div")
                .attr("data-mode", if mode.is_mobile() { "mobile" } else { "desktop" })
                .text_child(title)
        }
    }

    #[test]
    fn test_registered_pair_is_selected() {
        let mut registry = PreviewRegistry::new();
        registry.register("countdown", "classic", Box::new(EchoPreview));
        assert!(registry.contains("countdown", "classic"));

        let mut settings = Settings::new();
        settings.insert("title".into(), serde_json::json!("Soon"));
        let node = registry
            .select("countdown", "classic")
            .render(&settings, ViewMode::Desktop, None);
        assert!(node.to_html().contains("Soon"));
    }

    #[test]
    fn test_unregistered_pair_gets_placeholder() {
        let registry = PreviewRegistry::new();
        let node = registry
            .select("ghost", "none")
            .render(&Settings::new(), ViewMode::Desktop, None);
        assert!(node.to_html().contains("No preview available"));
    }
}
