use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INTERVAL_SECS;

/// Advisory validation pattern emitted onto the input element.
/// Rudimentary - doesn't catch everything; the time codec is authoritative.
pub const TIME_PATTERN: &str =
    r"([0-1]?[0-9]:[0-5][0-9]\s*[aApP][mM]?)|([0-2][0-9]:[0-5][0-9])";

/// Declaration-layer attributes for one picker field, as supplied by the
/// hosting page (or deserialized from a server-emitted declaration).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    pub id: String,
    /// Form name the canonical value is submitted under.
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Initial field text, as declared.
    #[serde(default)]
    pub value: String,
    /// Slot interval in seconds; expected to evenly divide a day.
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub required: bool,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_SECS
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            label: String::new(),
            value: String::new(),
            interval: DEFAULT_INTERVAL_SECS,
            required: false,
        }
    }
}

impl FieldConfig {
    /// Identifier of the field's overlay list container, linking the input
    /// element to its list markup.
    #[must_use]
    pub fn list_id(&self) -> String {
        format!("{}-time-list", self.id)
    }
}
