//! embedkit-types: Shared data types for the embedkit widget engine.
//!
//! This crate contains pure data types (templates, menus, settings records,
//! render trees, form projections) shared across all embedkit crates. These
//! types carry no engine logic and no I/O dependencies, making them suitable
//! as a foundation layer.

pub mod form;
pub mod instance;
pub mod render;
pub mod settings;
pub mod template;

// Re-export commonly used types at the crate root for convenience
pub use form::{FormRow, FormSection, InputNode};
pub use instance::WidgetInstance;
pub use render::{escape_html, RenderNode, ViewMode};
pub use settings::{bool_value, f64_value, str_value, u64_value, Settings};
pub use template::{Dependency, DependencyCondition, Menu, OptionGroup, Template};
