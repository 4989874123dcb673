//! Embed rendering entry point.
//!
//! Third-party pages render a widget instance from its persisted settings
//! through the same engine entry point the editor preview uses, so the two
//! paths cannot drift apart.

use embedkit_core::{DataProvider, WidgetEngine};
use embedkit_types::{RenderNode, ViewMode, WidgetInstance};
use serde_json::Value;

/// The render tree for an instance; shared by embed and preview callers.
pub fn render_node(
    engine: &WidgetEngine,
    instance: &WidgetInstance,
    mode: ViewMode,
    data: Option<&Value>,
) -> RenderNode {
    engine.render(
        &instance.widget_type,
        &instance.template_id,
        &instance.settings,
        mode,
        data,
    )
}

/// Render the production embed markup for an instance.
///
/// Inactive instances render to nothing. A failed data fetch renders the
/// widget without data instead of failing the page.
pub fn render_embed(
    engine: &WidgetEngine,
    instance: &WidgetInstance,
    mode: ViewMode,
    provider: &dyn DataProvider,
) -> String {
    if !instance.active {
        return String::new();
    }
    let data = match provider.fetch(instance) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("data fetch failed for instance {}: {err:#}", instance.id);
            None
        }
    };
    render_node(engine, instance, mode, data.as_ref()).to_html()
}
