//! Social feed widget: templates and preview renderers.
//!
//! The feed items arrive through the external data collaborator as
//! `{"items": [{"image": ..., "caption": ...}, ...]}`. Without data the
//! preview falls back to deterministic placeholder items so the editor
//! stays useful before an account is connected.

use embedkit_core::{
    PreviewRenderer, SchemaResult, WidgetEngine, WidgetTypeInfo,
};
use embedkit_types::{
    bool_value, str_value, u64_value, Dependency, Menu, OptionGroup, RenderNode, Settings,
    Template, ViewMode,
};
use serde_json::Value;

pub const WIDGET_TYPE: &str = "social_feed";

pub fn widget_type_info() -> WidgetTypeInfo {
    WidgetTypeInfo::new(
        WIDGET_TYPE,
        "Social Feed",
        "Shows the latest posts from a connected account",
    )
}

pub fn templates() -> Vec<Template> {
    vec![grid_template(), list_template()]
}

/// Register the social feed widget type, its templates and previews.
pub fn register(engine: &mut WidgetEngine) -> SchemaResult<()> {
    engine.templates_mut().register_widget_type(widget_type_info());
    for template in templates() {
        engine.templates_mut().register_template(WIDGET_TYPE, template)?;
    }
    engine
        .previews_mut()
        .register(WIDGET_TYPE, "grid", Box::new(GridPreview));
    engine
        .previews_mut()
        .register(WIDGET_TYPE, "list", Box::new(ListPreview));
    Ok(())
}

fn source_group() -> OptionGroup {
    OptionGroup::new(
        "source",
        "Source",
        vec![
            Menu::text("handle", "Account handle", "").with_meta("placeholder", "@yourbrand"),
            Menu::number("item_limit", "Number of posts", 9)
                .with_meta("min", 1)
                .with_meta("max", 50),
        ],
    )
}

fn caption_menus() -> Vec<Menu> {
    vec![
        Menu::toggle("show_captions", "Show captions", false),
        Menu::number("caption_length", "Caption length", 80)
            .with_meta("min", 10)
            .with_meta("max", 300)
            .requires(Dependency::on("show_captions", true)),
    ]
}

fn header_group() -> OptionGroup {
    // show_header -> show_follow_button -> follow_label gates transitively
    OptionGroup::new(
        "header",
        "Header",
        vec![
            Menu::toggle("show_header", "Show header", true),
            Menu::text("header_title", "Header title", "Latest posts")
                .requires(Dependency::on("show_header", true)),
            Menu::toggle("show_follow_button", "Show follow button", false)
                .requires(Dependency::on("show_header", true)),
            Menu::text("follow_label", "Follow button label", "Follow us")
                .requires(Dependency::on("show_follow_button", true)),
        ],
    )
}

fn grid_template() -> Template {
    let mut layout_menus = vec![Menu::new("columns", "Columns", "slider", 3)
        .with_meta("min", 1)
        .with_meta("max", 6)];
    layout_menus.extend(caption_menus());
    Template::new("grid", "Grid")
        .with_description("Square tiles in a responsive grid")
        .recommended()
        .with_option(source_group())
        .with_option(header_group())
        .with_option(OptionGroup::new("layout", "Layout", layout_menus))
}

fn list_template() -> Template {
    let mut layout_menus = vec![Menu::toggle("compact", "Compact rows", false)];
    layout_menus.extend(caption_menus());
    Template::new("list", "List")
        .with_description("One post per row with full captions")
        .with_option(source_group())
        .with_option(header_group())
        .with_option(OptionGroup::new("layout", "Layout", layout_menus))
}

/// Items to render: external data when present, deterministic placeholders
/// otherwise.
fn feed_items(settings: &Settings, data: Option<&Value>) -> Vec<(String, String)> {
    let limit = u64_value(settings, "item_limit").unwrap_or(9).min(50) as usize;
    match data.and_then(|d| d.get("items")).and_then(|v| v.as_array()) {
        Some(items) => items
            .iter()
            .take(limit)
            .map(|item| {
                (
                    item.get("image")
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string(),
                    item.get("caption")
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string(),
                )
            })
            .collect(),
        None => {
            log::debug!("no feed data; rendering {limit} placeholder items");
            (0..limit)
                .map(|i| (String::new(), format!("Sample post {}", i + 1)))
                .collect()
        }
    }
}

fn truncated_caption(settings: &Settings, caption: &str) -> String {
    let max = u64_value(settings, "caption_length").unwrap_or(80) as usize;
    if caption.chars().count() <= max {
        return caption.to_string();
    }
    let mut out: String = caption.chars().take(max).collect();
    out.push('…');
    out
}

fn header(settings: &Settings) -> Option<RenderNode> {
    if !bool_value(settings, "show_header") {
        return None;
    }
    let mut node = RenderNode::element("header").class("feed-header").child(
        RenderNode::element("h3")
            .class("feed-title")
            .text_child(str_value(settings, "header_title").unwrap_or("")),
    );
    if bool_value(settings, "show_follow_button") {
        node = node.child(
            RenderNode::element("a")
                .class("feed-follow")
                .attr("data-handle", str_value(settings, "handle").unwrap_or(""))
                .text_child(str_value(settings, "follow_label").unwrap_or("")),
        );
    }
    Some(node)
}

fn item_node(settings: &Settings, image: &str, caption: &str) -> RenderNode {
    let mut figure = RenderNode::element("figure").class("feed-item");
    figure = figure.child(if image.is_empty() {
        RenderNode::element("div").class("feed-item-placeholder")
    } else {
        RenderNode::element("img")
            .attr("src", image)
            .attr("alt", caption)
    });
    if bool_value(settings, "show_captions") && !caption.is_empty() {
        figure = figure.child(
            RenderNode::element("figcaption")
                .text_child(truncated_caption(settings, caption)),
        );
    }
    figure
}

fn container_class(base: &str, mode: ViewMode) -> String {
    if mode.is_mobile() {
        format!("embedkit-feed {base} mobile")
    } else {
        format!("embedkit-feed {base}")
    }
}

struct GridPreview;

impl PreviewRenderer for GridPreview {
    fn render(&self, settings: &Settings, mode: ViewMode, data: Option<&Value>) -> RenderNode {
        let columns = u64_value(settings, "columns").unwrap_or(3);
        let mut root = RenderNode::element("div")
            .class(container_class("feed-grid", mode))
            .attr("style", format!("--feed-columns:{columns}"));
        if let Some(node) = header(settings) {
            root = root.child(node);
        }
        let items = RenderNode::element("div").class("feed-items").children(
            feed_items(settings, data)
                .iter()
                .map(|(image, caption)| item_node(settings, image, caption)),
        );
        root.child(items)
    }
}

struct ListPreview;

impl PreviewRenderer for ListPreview {
    fn render(&self, settings: &Settings, mode: ViewMode, data: Option<&Value>) -> RenderNode {
        let base = if bool_value(settings, "compact") {
            "feed-list compact"
        } else {
            "feed-list"
        };
        let mut root = RenderNode::element("div").class(container_class(base, mode));
        if let Some(node) = header(settings) {
            root = root.child(node);
        }
        let items = RenderNode::element("ul").class("feed-items").children(
            feed_items(settings, data)
                .iter()
                .map(|(image, caption)| {
                    RenderNode::element("li").child(item_node(settings, image, caption))
                }),
        );
        root.child(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedkit_core::resolve_settings;
    use serde_json::json;

    fn resolved_grid() -> Settings {
        resolve_settings(&grid_template(), &Settings::new())
    }

    #[test]
    fn test_placeholder_items_honor_the_limit() {
        let mut settings = resolved_grid();
        settings.insert("item_limit".into(), json!(4));
        let items = feed_items(&settings, None);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].1, "Sample post 1");
    }

    #[test]
    fn test_external_data_replaces_placeholders() {
        let settings = resolved_grid();
        let data = json!({"items": [
            {"image": "https://cdn/a.jpg", "caption": "First"},
            {"image": "https://cdn/b.jpg", "caption": "Second"},
        ]});
        let html = GridPreview
            .render(&settings, ViewMode::Desktop, Some(&data))
            .to_html();
        assert!(html.contains("https://cdn/a.jpg"));
        assert!(!html.contains("Sample post"));
    }

    #[test]
    fn test_captions_truncate() {
        let mut settings = resolved_grid();
        settings.insert("show_captions".into(), json!(true));
        settings.insert("caption_length".into(), json!(10));
        let data = json!({"items": [{"image": "", "caption": "a caption well past ten chars"}]});
        let html = GridPreview
            .render(&settings, ViewMode::Desktop, Some(&data))
            .to_html();
        assert!(html.contains("a caption …"));
        assert!(!html.contains("past ten chars"));
    }

    #[test]
    fn test_header_follows_its_toggles() {
        let mut settings = resolved_grid();
        let html = GridPreview.render(&settings, ViewMode::Desktop, None).to_html();
        assert!(html.contains("Latest posts"));
        assert!(!html.contains("feed-follow"));

        settings.insert("show_follow_button".into(), json!(true));
        let html = GridPreview.render(&settings, ViewMode::Desktop, None).to_html();
        assert!(html.contains("Follow us"));

        settings.insert("show_header".into(), json!(false));
        let html = GridPreview.render(&settings, ViewMode::Desktop, None).to_html();
        assert!(!html.contains("feed-header"));
    }

    #[test]
    fn test_grid_columns_flow_into_style() {
        let mut settings = resolved_grid();
        settings.insert("columns".into(), json!(5));
        let html = GridPreview.render(&settings, ViewMode::Desktop, None).to_html();
        assert!(html.contains("--feed-columns:5"));
    }
}
