//! Widget instance metadata and its settings binding.

use crate::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binds a widget type + template to one settings record plus metadata.
///
/// Instances are created when a user picks a template (settings start from
/// the resolved defaults of an empty record), mutated on every edit, and
/// removed only by explicit deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: Uuid,
    pub widget_type: String,
    pub template_id: String,
    pub title: String,
    /// Inactive instances stay stored but are not served to embeds
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: Settings,
}

fn default_active() -> bool {
    true
}

impl WidgetInstance {
    pub fn new(
        widget_type: impl Into<String>,
        template_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            widget_type: widget_type.into(),
            template_id: template_id.into(),
            title: title.into(),
            active: true,
            created_at: Utc::now(),
            settings: Settings::new(),
        }
    }
}
