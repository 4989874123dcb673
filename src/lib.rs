//! embedkit: Compose embeddable web widgets from declarative templates.
//!
//! This library wires the engine to an application surface:
//! - A JSON-file instance store implementing the persistence boundary
//! - Application configuration (dependency policy, debounce window)
//! - The embed rendering entry point shared with the editor preview
//!
//! The CLI in `main.rs` drives the same pieces.

pub mod config;
pub mod embed;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use embedkit_core::{EditorSession, WidgetEngine};
pub use embedkit_types::{Settings, ViewMode, WidgetInstance};
pub use store::JsonFileStore;

use embedkit_core::SchemaResult;

/// Build an engine with the built-in distribution registered.
pub fn default_engine(policy: embedkit_core::DependencyPolicy) -> SchemaResult<WidgetEngine> {
    let mut engine = WidgetEngine::with_policy(policy);
    embedkit_widgets::register_builtins(&mut engine)?;
    Ok(engine)
}
