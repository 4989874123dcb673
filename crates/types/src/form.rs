//! Editor form projection: sections, rows and input descriptions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative description of one input control.
///
/// `control` names the client-side input implementation; `props` carries
/// whatever that control needs (current value, choices, bounds, ...). Field
/// renderers registered for complex kinds are free to emit their own control
/// names, so this stays open-ended rather than enumerating the built-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputNode {
    pub control: String,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl InputNode {
    pub fn new(control: impl Into<String>) -> Self {
        Self {
            control: control.into(),
            props: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// One editable row in the form.
///
/// Inactive rows stay in the model so the editor can gray them out instead
/// of reflowing the section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRow {
    pub menu_id: String,
    pub label: String,
    pub field_type: String,
    pub active: bool,
    pub input: InputNode,
    #[serde(default)]
    pub children: Vec<FormRow>,
}

/// One editor section, projected from an option group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSection {
    pub id: String,
    pub name: String,
    pub rows: Vec<FormRow>,
}
