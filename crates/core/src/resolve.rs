//! Default resolution: merge a possibly-partial settings record with the
//! defaults declared in a template.

use embedkit_types::{Settings, Template};

/// Produce a complete settings record for `template`.
///
/// Stored values are kept verbatim, with no type coercion — a wrong-typed
/// stored value passes through unchanged, and the rendering side degrades
/// gracefully. Every declared menu id missing from `partial` adopts its
/// `default_value`. The result contains every declared menu id, extra keys
/// pass through untouched, and resolution is idempotent.
pub fn resolve_settings(template: &Template, partial: &Settings) -> Settings {
    let mut resolved = partial.clone();
    for menu in template.menus() {
        if !resolved.contains_key(&menu.id) {
            resolved.insert(menu.id.clone(), menu.default_value.clone());
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedkit_types::{Dependency, Menu, OptionGroup, Template};
    use serde_json::{json, Value};

    fn template() -> Template {
        Template::new("classic", "Classic").with_option(OptionGroup::new(
            "content",
            "Content",
            vec![
                Menu::toggle("show_subtitle", "Show subtitle", false),
                Menu::text("subtitle", "Subtitle", "")
                    .requires(Dependency::on("show_subtitle", true)),
                Menu::new("units", "Units", "group", Value::Null)
                    .with_children(vec![Menu::toggle("show_days", "Days", true)]),
            ],
        ))
    }

    #[test]
    fn test_resolution_is_total() {
        let resolved = resolve_settings(&template(), &Settings::new());
        assert_eq!(resolved.get("show_subtitle"), Some(&json!(false)));
        assert_eq!(resolved.get("subtitle"), Some(&json!("")));
        assert_eq!(resolved.get("units"), Some(&Value::Null));
        // nested menus resolve too
        assert_eq!(resolved.get("show_days"), Some(&json!(true)));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut partial = Settings::new();
        partial.insert("subtitle".into(), json!("hello"));
        let once = resolve_settings(&template(), &partial);
        let twice = resolve_settings(&template(), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stored_values_pass_through_verbatim() {
        let mut partial = Settings::new();
        // wrong type on purpose: no coercion happens
        partial.insert("show_subtitle".into(), json!("not-a-bool"));
        let resolved = resolve_settings(&template(), &partial);
        assert_eq!(resolved.get("show_subtitle"), Some(&json!("not-a-bool")));
    }

    #[test]
    fn test_extra_keys_are_tolerated() {
        let mut partial = Settings::new();
        partial.insert("legacy_key".into(), json!(42));
        let resolved = resolve_settings(&template(), &partial);
        assert_eq!(resolved.get("legacy_key"), Some(&json!(42)));
    }
}
