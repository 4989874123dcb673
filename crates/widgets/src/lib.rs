//! embedkit-widgets: Built-in field renderers and widget types.
//!
//! This crate is the built-in distribution that ships with the engine: the
//! basic field kinds every editor understands, plus a starter set of widget
//! types with their templates and preview renderers. Everything here sits
//! behind the core's dispatch contracts; nothing in the engine knows these
//! implementations exist.

pub mod countdown;
pub mod fields;
pub mod social_feed;

use embedkit_core::{SchemaResult, WidgetEngine};

/// Register the basic field kinds and every built-in widget type.
pub fn register_builtins(engine: &mut WidgetEngine) -> SchemaResult<()> {
    fields::register_basic_fields(engine.fields_mut())?;
    countdown::register(engine)?;
    social_feed::register(engine)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_register_cleanly() {
        let mut engine = WidgetEngine::new();
        register_builtins(&mut engine).unwrap();

        assert_eq!(engine.templates().list_widget_types().len(), 2);
        for info in engine.templates().list_widget_types() {
            for template in engine.templates().templates(&info.id) {
                assert!(engine.previews().contains(&info.id, &template.id));
            }
        }
    }

    #[test]
    fn test_builtin_templates_pass_strict_validation() {
        use embedkit_core::{validate_template, DependencyPolicy};

        for template in countdown::templates()
            .iter()
            .chain(social_feed::templates().iter())
        {
            validate_template(template, DependencyPolicy::Strict).unwrap();
        }
    }
}
