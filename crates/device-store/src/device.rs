//! Device record

use serde::{Deserialize, Serialize};

/// A managed device
///
/// `id` is empty until the store assigns one. `name` and `kind` are free-form
/// and default to empty when missing from a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Category label, e.g. "Switch"
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Device {
    /// Create an unassigned device
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Same record under another id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
