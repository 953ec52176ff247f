//! Print Ticket - the effective request a backend would receive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::destination::Destination;
use crate::document::DocumentProperties;
use crate::settings::{SettingName, SettingValue, SettingsState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintTicket {
    pub destination_id: Option<String>,
    pub page_count: u32,
    pub settings: BTreeMap<SettingName, SettingValue>,
}

impl PrintTicket {
    pub fn from_settings(
        destination: Option<&Destination>,
        document: &DocumentProperties,
        settings: &SettingsState,
    ) -> Self {
        Self {
            destination_id: destination.map(|d| d.id.clone()),
            page_count: document.page_count,
            settings: settings
                .iter()
                .map(|s| (s.key, s.effective_value().clone()))
                .collect(),
        }
    }

    pub fn value(&self, name: SettingName) -> Option<&SettingValue> {
        self.settings.get(&name)
    }
}
