//! Schema error taxonomy.
//!
//! These errors are fatal at registration time: a malformed template is a
//! configuration error, not a runtime one, and must never surface
//! mid-session. Lookup misses are deliberately not errors; they resolve to
//! fallbacks (placeholder preview, fallback input, inactive menu).

use thiserror::Error;

pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate menu id `{menu_id}` in template `{template_id}`")]
    DuplicateMenuId {
        template_id: String,
        menu_id: String,
    },

    #[error("dependency cycle in template `{template_id}`: {path}")]
    DependencyCycle { template_id: String, path: String },

    #[error("menu `{menu_id}` in template `{template_id}` depends on undeclared menu `{target}`")]
    DanglingDependency {
        template_id: String,
        menu_id: String,
        target: String,
    },

    #[error("template `{template_id}` is already registered for widget type `{widget_type}`")]
    DuplicateTemplate {
        widget_type: String,
        template_id: String,
    },

    #[error("unknown widget type `{0}`")]
    UnknownWidgetType(String),

    #[error("unknown template `{template_id}` for widget type `{widget_type}`")]
    UnknownTemplate {
        widget_type: String,
        template_id: String,
    },

    #[error("field type `{0}` is already registered; pass the override flag to replace it")]
    FieldTypeCollision(String),
}
