//! embedkit-core: Traits, registries and the settings engine for embedkit.
//!
//! This crate contains the fundamental traits (FieldRenderer,
//! PreviewRenderer, SettingsStore, DataProvider), the template/field/preview
//! registries, the default resolver, the dependency evaluator, and the
//! editing session with its debounced persistence writer.

mod data;
mod deps;
mod dispatch;
mod engine;
mod error;
mod preview;
mod registry;
mod resolve;
mod session;

pub use data::{DataProvider, NoData, StaticData};
pub use deps::{active_menus, is_active};
pub use dispatch::{BoxedFieldRenderer, FieldRegistry, FieldRenderer, FALLBACK_CONTROL};
pub use engine::WidgetEngine;
pub use error::{SchemaError, SchemaResult};
pub use preview::{BoxedPreviewRenderer, PreviewRegistry, PreviewRenderer};
pub use registry::{validate_template, DependencyPolicy, TemplateRegistry, WidgetTypeInfo};
pub use resolve::resolve_settings;
pub use session::{
    apply_edit, DebouncedWriter, EditorSession, SettingsStore, DEFAULT_QUIET_WINDOW,
};

// Re-export types used in trait signatures for convenience
pub use embedkit_types::{
    Dependency, DependencyCondition, FormRow, FormSection, InputNode, Menu, OptionGroup,
    RenderNode, Settings, Template, ViewMode, WidgetInstance,
};
