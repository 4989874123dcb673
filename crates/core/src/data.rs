//! External data collaborators for widget previews.

use anyhow::Result;
use embedkit_types::WidgetInstance;
use serde_json::Value;

/// Widget-type-specific external data fetch (e.g. a social feed pull).
///
/// The engine passes the fetched value to the preview renderer unmodified;
/// it neither interprets nor caches it.
pub trait DataProvider: Send + Sync {
    fn fetch(&self, instance: &WidgetInstance) -> Result<Option<Value>>;
}

/// Provider for widgets with no external data.
pub struct NoData;

impl DataProvider for NoData {
    fn fetch(&self, _instance: &WidgetInstance) -> Result<Option<Value>> {
        Ok(None)
    }
}

/// Fixed payload provider, useful in tests and demos.
pub struct StaticData(pub Value);

impl DataProvider for StaticData {
    fn fetch(&self, _instance: &WidgetInstance) -> Result<Option<Value>> {
        Ok(Some(self.0.clone()))
    }
}
