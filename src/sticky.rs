//! Sticky Settings
//!
//! User choices remembered between print sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::settings::{SettingName, SettingValue, SettingsState};

pub const STICKY_SETTINGS_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickySettings {
    pub version: u32,
    #[serde(default)]
    pub settings: BTreeMap<SettingName, SettingValue>,
}

impl StickySettings {
    /// Keep every value the user chose explicitly.
    pub fn capture(state: &SettingsState) -> Self {
        Self {
            version: STICKY_SETTINGS_VERSION,
            settings: state
                .iter()
                .filter(|s| s.set_from_ui)
                .map(|s| (s.key, s.value.clone()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Older or newer versions load as empty rather than failing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let sticky: Self = serde_json::from_str(json)?;
        if sticky.version != STICKY_SETTINGS_VERSION {
            tracing::warn!(
                found = sticky.version,
                expected = STICKY_SETTINGS_VERSION,
                "ignoring sticky settings from another version"
            );
            return Ok(Self {
                version: STICKY_SETTINGS_VERSION,
                settings: BTreeMap::new(),
            });
        }
        Ok(sticky)
    }
}
