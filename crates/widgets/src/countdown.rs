//! Countdown widget: templates and preview renderers.
//!
//! The rendered tree is static markup carrying the target date as a data
//! attribute; the embed script animates the remaining time client-side, so
//! rendering stays a pure function of the settings record.

use embedkit_core::{
    PreviewRenderer, SchemaResult, WidgetEngine, WidgetTypeInfo,
};
use embedkit_types::{
    bool_value, f64_value, str_value, Dependency, Menu, OptionGroup, RenderNode, Settings,
    Template, ViewMode,
};
use serde_json::Value;

pub const WIDGET_TYPE: &str = "countdown";

pub fn widget_type_info() -> WidgetTypeInfo {
    WidgetTypeInfo::new(
        WIDGET_TYPE,
        "Countdown",
        "Counts down to a target date and time",
    )
}

pub fn templates() -> Vec<Template> {
    vec![classic_template(), ring_template()]
}

/// Register the countdown widget type, its templates and previews.
pub fn register(engine: &mut WidgetEngine) -> SchemaResult<()> {
    engine.templates_mut().register_widget_type(widget_type_info());
    for template in templates() {
        engine.templates_mut().register_template(WIDGET_TYPE, template)?;
    }
    engine
        .previews_mut()
        .register(WIDGET_TYPE, "classic", Box::new(ClassicPreview));
    engine
        .previews_mut()
        .register(WIDGET_TYPE, "ring", Box::new(RingPreview));
    Ok(())
}

fn content_group() -> OptionGroup {
    OptionGroup::new(
        "content",
        "Content",
        vec![
            Menu::text("title", "Title", "Coming soon"),
            Menu::text("target_date", "Target date", "")
                .with_meta("placeholder", "2026-12-31T00:00:00Z"),
            Menu::toggle("show_message", "Show message when finished", false),
            Menu::text("finished_message", "Finished message", "We are live!")
                .requires(Dependency::on("show_message", true)),
        ],
    )
}

fn units_group() -> OptionGroup {
    OptionGroup::new(
        "units",
        "Units",
        vec![Menu::new("unit_settings", "Displayed units", "group", Value::Null)
            .with_children(vec![
                Menu::toggle("show_days", "Days", true),
                Menu::toggle("show_hours", "Hours", true),
                Menu::toggle("show_minutes", "Minutes", true),
                Menu::toggle("show_seconds", "Seconds", false),
                Menu::toggle("show_labels", "Unit labels", true),
            ])],
    )
}

fn appearance_group() -> OptionGroup {
    OptionGroup::new(
        "appearance",
        "Appearance",
        vec![Menu::select("theme", "Theme", "light", &["light", "dark"])],
    )
}

fn classic_template() -> Template {
    Template::new("classic", "Classic")
        .with_description("Large digits with optional unit labels")
        .recommended()
        .with_option(content_group())
        .with_option(units_group())
        .with_option(appearance_group())
}

fn ring_template() -> Template {
    Template::new("ring", "Ring")
        .with_description("Units drawn inside progress rings")
        .with_option(content_group())
        .with_option(units_group())
        .with_option(OptionGroup::new(
            "ring",
            "Ring",
            vec![
                Menu::new("ring_thickness", "Ring thickness", "slider", 8)
                    .with_meta("min", 1)
                    .with_meta("max", 24),
                Menu::new("ring_color", "Ring color", "color", "#3478f6"),
            ],
        ))
        .with_option(appearance_group())
}

const UNITS: &[(&str, &str)] = &[
    ("show_days", "days"),
    ("show_hours", "hours"),
    ("show_minutes", "minutes"),
    ("show_seconds", "seconds"),
];

fn container_class(template: &str, settings: &Settings, mode: ViewMode) -> String {
    let theme = str_value(settings, "theme").unwrap_or("light");
    let mut class = format!("embedkit-countdown {template} theme-{theme}");
    if mode.is_mobile() {
        class.push_str(" mobile");
    }
    class
}

fn unit_row(settings: &Settings) -> RenderNode {
    let labels = bool_value(settings, "show_labels");
    let mut row = RenderNode::element("div").class("countdown-units");
    for &(key, unit) in UNITS {
        if !bool_value(settings, key) {
            continue;
        }
        let mut node = RenderNode::element("span")
            .class("countdown-unit")
            .attr("data-unit", unit)
            .child(
                RenderNode::element("span")
                    .class("countdown-value")
                    .text_child("--"),
            );
        if labels {
            node = node.child(
                RenderNode::element("span")
                    .class("countdown-label")
                    .text_child(unit),
            );
        }
        row = row.child(node);
    }
    row
}

fn countdown_frame(template: &str, settings: &Settings, mode: ViewMode) -> RenderNode {
    let mut root = RenderNode::element("div")
        .class(container_class(template, settings, mode))
        .attr("data-target", str_value(settings, "target_date").unwrap_or(""));
    let title = str_value(settings, "title").unwrap_or("");
    if !title.is_empty() {
        root = root.child(
            RenderNode::element("h2")
                .class("countdown-title")
                .text_child(title),
        );
    }
    root
}

fn finished_message(settings: &Settings) -> Option<RenderNode> {
    if !bool_value(settings, "show_message") {
        return None;
    }
    Some(
        RenderNode::element("p")
            .class("countdown-finished")
            .text_child(str_value(settings, "finished_message").unwrap_or("")),
    )
}

struct ClassicPreview;

impl PreviewRenderer for ClassicPreview {
    fn render(&self, settings: &Settings, mode: ViewMode, _data: Option<&Value>) -> RenderNode {
        let mut root = countdown_frame("classic", settings, mode).child(unit_row(settings));
        if let Some(message) = finished_message(settings) {
            root = root.child(message);
        }
        root
    }
}

struct RingPreview;

impl PreviewRenderer for RingPreview {
    fn render(&self, settings: &Settings, mode: ViewMode, _data: Option<&Value>) -> RenderNode {
        let thickness = f64_value(settings, "ring_thickness").unwrap_or(8.0);
        let color = str_value(settings, "ring_color").unwrap_or("#3478f6");
        let ring = RenderNode::element("div")
            .class("countdown-rings")
            .attr(
                "style",
                format!("--ring-thickness:{thickness}px;--ring-color:{color}"),
            )
            .child(unit_row(settings));
        let mut root = countdown_frame("ring", settings, mode).child(ring);
        if let Some(message) = finished_message(settings) {
            root = root.child(message);
        }
        root
    }
}
