//! Settings Catalog and State Table

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::capabilities::{DpiOption, MediaSizeOption};
use crate::document::Margins;
use crate::engine::EngineError;

/// Every setting the engine knows about, in evaluation order. Settings that
/// read other settings' values come after the settings they read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingName {
    Copies,
    Collate,
    Layout,
    Color,
    MediaSize,
    Margins,
    CustomMargins,
    Dpi,
    Scaling,
    FitToPage,
    HeaderFooter,
    CssBackground,
    Duplex,
    DuplexShortEdge,
    Rasterize,
    SelectionOnly,
    PagesPerSheet,
    Pin,
    PinValue,
    VendorItems,
}

impl SettingName {
    pub const ALL: [SettingName; 20] = [
        Self::Copies,
        Self::Collate,
        Self::Layout,
        Self::Color,
        Self::MediaSize,
        Self::Margins,
        Self::CustomMargins,
        Self::Dpi,
        Self::Scaling,
        Self::FitToPage,
        Self::HeaderFooter,
        Self::CssBackground,
        Self::Duplex,
        Self::DuplexShortEdge,
        Self::Rasterize,
        Self::SelectionOnly,
        Self::PagesPerSheet,
        Self::Pin,
        Self::PinValue,
        Self::VendorItems,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copies => "copies",
            Self::Collate => "collate",
            Self::Layout => "layout",
            Self::Color => "color",
            Self::MediaSize => "mediaSize",
            Self::Margins => "margins",
            Self::CustomMargins => "customMargins",
            Self::Dpi => "dpi",
            Self::Scaling => "scaling",
            Self::FitToPage => "fitToPage",
            Self::HeaderFooter => "headerFooter",
            Self::CssBackground => "cssBackground",
            Self::Duplex => "duplex",
            Self::DuplexShortEdge => "duplexShortEdge",
            Self::Rasterize => "rasterize",
            Self::SelectionOnly => "selectionOnly",
            Self::PagesPerSheet => "pagesPerSheet",
            Self::Pin => "pin",
            Self::PinValue => "pinValue",
            Self::VendorItems => "vendorItems",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Value a setting holds before the first recompute.
    pub fn initial_value(self) -> SettingValue {
        match self {
            Self::Copies | Self::PagesPerSheet => SettingValue::Int(1),
            Self::Scaling => SettingValue::Int(100),
            Self::Collate | Self::HeaderFooter => SettingValue::Bool(true),
            Self::Layout
            | Self::Color
            | Self::FitToPage
            | Self::CssBackground
            | Self::Duplex
            | Self::DuplexShortEdge
            | Self::Rasterize
            | Self::SelectionOnly
            | Self::Pin => SettingValue::Bool(false),
            Self::Margins => SettingValue::MarginsType(MarginsType::Default),
            Self::PinValue => SettingValue::Text(String::new()),
            Self::VendorItems => SettingValue::VendorItems(BTreeMap::new()),
            Self::MediaSize | Self::CustomMargins | Self::Dpi => SettingValue::Null,
        }
    }

    /// Whether `value` has the right kind for this setting. `Null` is
    /// accepted where a setting may legitimately have no value.
    pub fn accepts(self, value: &SettingValue) -> bool {
        match (self, value) {
            (Self::MediaSize, SettingValue::MediaSize(_))
            | (Self::CustomMargins, SettingValue::CustomMargins(_))
            | (Self::Dpi, SettingValue::Dpi(_)) => true,
            (Self::MediaSize | Self::CustomMargins | Self::Dpi, SettingValue::Null) => true,
            (Self::Margins, SettingValue::MarginsType(_)) => true,
            (Self::VendorItems, SettingValue::VendorItems(_)) => true,
            (Self::PinValue, SettingValue::Text(_)) => true,
            (Self::Copies | Self::PagesPerSheet | Self::Scaling, SettingValue::Int(_)) => true,
            (
                Self::Collate
                | Self::HeaderFooter
                | Self::Layout
                | Self::Color
                | Self::FitToPage
                | Self::CssBackground
                | Self::Duplex
                | Self::DuplexShortEdge
                | Self::Rasterize
                | Self::SelectionOnly
                | Self::Pin,
                SettingValue::Bool(_),
            ) => true,
            _ => false,
        }
    }

    pub fn expected_kind(self) -> &'static str {
        self.initial_value().kind()
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EngineError::InvalidSettingName(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarginsType {
    #[default]
    Default,
    NoMargins,
    Minimum,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    Null,
    Bool(bool),
    Int(u32),
    Text(String),
    Dpi(DpiOption),
    MediaSize(MediaSizeOption),
    MarginsType(MarginsType),
    CustomMargins(Margins),
    VendorItems(BTreeMap<String, String>),
}

impl SettingValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Dpi(_) => "dpi",
            Self::MediaSize(_) => "media_size",
            Self::MarginsType(_) => "margins_type",
            Self::CustomMargins(_) => "custom_margins",
            Self::VendorItems(_) => "vendor_items",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_dpi(&self) -> Option<&DpiOption> {
        match self {
            Self::Dpi(dpi) => Some(dpi),
            _ => None,
        }
    }

    pub fn as_media_size(&self) -> Option<&MediaSizeOption> {
        match self {
            Self::MediaSize(media) => Some(media),
            _ => None,
        }
    }

    pub fn as_margins_type(&self) -> Option<MarginsType> {
        match self {
            Self::MarginsType(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_custom_margins(&self) -> Option<&Margins> {
        match self {
            Self::CustomMargins(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// One row of the settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: SettingName,
    pub available: bool,
    pub unavailable_value: SettingValue,
    pub value: SettingValue,
    pub default_value: SettingValue,
    pub set_from_ui: bool,
}

impl Setting {
    fn initial(key: SettingName) -> Self {
        Self {
            key,
            available: false,
            unavailable_value: key.initial_value(),
            value: key.initial_value(),
            default_value: key.initial_value(),
            set_from_ui: false,
        }
    }

    /// The value that applies to the print job.
    pub fn effective_value(&self) -> &SettingValue {
        if self.available {
            &self.value
        } else {
            &self.unavailable_value
        }
    }
}

/// The full settings table, one row per catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    rows: Vec<Setting>,
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            rows: SettingName::ALL.iter().copied().map(Setting::initial).collect(),
        }
    }

    pub fn get(&self, name: SettingName) -> &Setting {
        &self.rows[name.index()]
    }

    pub(crate) fn get_mut(&mut self, name: SettingName) -> &mut Setting {
        &mut self.rows[name.index()]
    }

    pub fn get_by_key(&self, key: &str) -> Result<&Setting, EngineError> {
        let name: SettingName = key.parse()?;
        Ok(self.get(name))
    }

    pub fn effective(&self, name: SettingName) -> &SettingValue {
        self.get(name).effective_value()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.rows.iter()
    }

    /// Names whose rows differ between `self` and `other`.
    pub fn diff(&self, other: &SettingsState) -> Vec<SettingName> {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a.key)
            .collect()
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for SettingsState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(row.key.as_str(), row)?;
        }
        map.end()
    }
}
