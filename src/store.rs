//! JSON-file widget instance store.

use anyhow::{Context, Result};
use embedkit_core::SettingsStore;
use embedkit_types::{Settings, WidgetInstance};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// On-disk catalog document holding every widget instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct InstanceCatalog {
    #[serde(default)]
    instances: HashMap<Uuid, WidgetInstance>,
}

/// Widget instance store backed by a single JSON document.
///
/// Each operation reads and rewrites the whole file; the catalog is small
/// and the debounced writer already coalesces save bursts.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_catalog(&self) -> Result<InstanceCatalog> {
        if !self.path.exists() {
            return Ok(InstanceCatalog::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let catalog = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(catalog)
    }

    fn write_catalog(&self, catalog: &InstanceCatalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(catalog)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Insert or replace an instance.
    pub fn put(&self, instance: WidgetInstance) -> Result<()> {
        let mut catalog = self.read_catalog()?;
        catalog.instances.insert(instance.id, instance);
        self.write_catalog(&catalog)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<WidgetInstance>> {
        Ok(self.read_catalog()?.instances.get(&id).cloned())
    }

    /// Remove an instance; returns whether it existed.
    pub fn remove(&self, id: Uuid) -> Result<bool> {
        let mut catalog = self.read_catalog()?;
        let existed = catalog.instances.remove(&id).is_some();
        if existed {
            self.write_catalog(&catalog)?;
        }
        Ok(existed)
    }

    /// All instances, oldest first.
    pub fn list(&self) -> Result<Vec<WidgetInstance>> {
        let mut instances: Vec<WidgetInstance> =
            self.read_catalog()?.instances.into_values().collect();
        instances.sort_by_key(|instance| instance.created_at);
        Ok(instances)
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, instance_id: Uuid) -> Result<Option<Settings>> {
        Ok(self
            .read_catalog()?
            .instances
            .get(&instance_id)
            .map(|instance| instance.settings.clone()))
    }

    fn save(&self, instance_id: Uuid, settings: &Settings) -> Result<()> {
        let mut catalog = self.read_catalog()?;
        let instance = catalog
            .instances
            .get_mut(&instance_id)
            .with_context(|| format!("unknown instance {instance_id}"))?;
        instance.settings = settings.clone();
        self.write_catalog(&catalog)
    }
}
