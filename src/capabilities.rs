//! Capability System - What a Destination Offers
//!
//! Mirrors the capability description delivered by the print backend
//! (`{"version": "1.0", "printer": {...}}`). Every capability is parsed
//! leniently: a descriptor that does not have the expected shape is dropped
//! and treated as absent.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Full capability document for one destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySet {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_printer")]
    pub printer: PrinterCapabilities,
}

impl CapabilitySet {
    /// Parse a capability document. Only a document that is not a JSON
    /// object at all is an error; malformed sections degrade to absent.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterCapabilities {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub copies: Option<CopiesCapability>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub collate: Option<CollateCapability>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<OptionCapability<ColorOption>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub duplex: Option<OptionCapability<DuplexOption>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dpi: Option<OptionCapability<DpiOption>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub media_size: Option<OptionCapability<MediaSizeOption>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page_orientation: Option<OptionCapability<OrientationOption>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinCapability>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vendor_capability: Option<Vec<VendorCapability>>,
}

impl PrinterCapabilities {
    pub fn color_options(&self) -> Option<&[ColorOption]> {
        non_empty(&self.color)
    }

    pub fn duplex_options(&self) -> Option<&[DuplexOption]> {
        non_empty(&self.duplex)
    }

    pub fn dpi_options(&self) -> Option<&[DpiOption]> {
        non_empty(&self.dpi)
    }

    pub fn media_size_options(&self) -> Option<&[MediaSizeOption]> {
        non_empty(&self.media_size)
    }

    pub fn orientation_options(&self) -> Option<&[OrientationOption]> {
        non_empty(&self.page_orientation)
    }

    pub fn vendor_capabilities(&self) -> Option<&[VendorCapability]> {
        self.vendor_capability
            .as_deref()
            .filter(|caps| !caps.is_empty())
    }
}

fn non_empty<T>(cap: &Option<OptionCapability<T>>) -> Option<&[T]> {
    cap.as_ref()
        .map(|c| c.option.as_slice())
        .filter(|options| !options.is_empty())
}

/// Deserialize a capability, turning any shape mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value::<T>(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(
                    capability = std::any::type_name::<T>(),
                    %err,
                    "dropping malformed capability"
                );
                None
            }
        },
    })
}

/// A `printer` section that is not an object reads as "nothing offered".
fn lenient_printer<'de, D>(deserializer: D) -> Result<PrinterCapabilities, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, PrinterCapabilities>(deserializer)?.unwrap_or_default())
}

/// Options that can be flagged as the destination's default.
pub trait CapabilityOption {
    fn is_default(&self) -> bool;
}

/// The option marked default, or the first option in declaration order
/// when none is marked.
pub fn default_option<T: CapabilityOption>(options: &[T]) -> Option<&T> {
    options
        .iter()
        .find(|o| o.is_default())
        .or_else(|| options.first())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCapability<T> {
    #[serde(default = "Vec::new")]
    pub option: Vec<T>,
}

impl<T> OptionCapability<T> {
    pub fn new(option: Vec<T>) -> Self {
        Self { option }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiesCapability {
    #[serde(default)]
    pub default: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateCapability {
    #[serde(default)]
    pub default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinCapability {
    #[serde(default)]
    pub supported: bool,
}

// --- Color ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorType {
    StandardColor,
    StandardMonochrome,
    CustomColor,
    CustomMonochrome,
    Auto,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    Color,
    Monochrome,
}

impl ColorType {
    pub fn class(self) -> Option<ColorClass> {
        match self {
            Self::StandardColor | Self::CustomColor => Some(ColorClass::Color),
            Self::StandardMonochrome | Self::CustomMonochrome => Some(ColorClass::Monochrome),
            Self::Auto | Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    #[serde(rename = "type", default)]
    pub color_type: ColorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_display_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl ColorOption {
    pub fn new(color_type: ColorType, is_default: bool) -> Self {
        Self {
            color_type,
            is_default,
            ..Self::default()
        }
    }
}

impl CapabilityOption for ColorOption {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

// --- Duplex ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplexType {
    NoDuplex,
    LongEdge,
    ShortEdge,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplexOption {
    #[serde(rename = "type", default)]
    pub duplex_type: DuplexType,
    #[serde(default)]
    pub is_default: bool,
}

impl DuplexOption {
    pub fn new(duplex_type: DuplexType, is_default: bool) -> Self {
        Self { duplex_type, is_default }
    }
}

impl CapabilityOption for DuplexOption {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

// --- DPI ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpiOption {
    pub horizontal_dpi: u32,
    pub vertical_dpi: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl DpiOption {
    pub fn new(horizontal_dpi: u32, vertical_dpi: u32) -> Self {
        Self {
            horizontal_dpi,
            vertical_dpi,
            ..Self::default()
        }
    }
}

impl CapabilityOption for DpiOption {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

// --- Media size ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSizeOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub width_microns: u32,
    #[serde(default)]
    pub height_microns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_display_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl MediaSizeOption {
    pub fn new(name: &str, width_microns: u32, height_microns: u32) -> Self {
        Self {
            name: Some(name.to_string()),
            width_microns,
            height_microns,
            ..Self::default()
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

impl CapabilityOption for MediaSizeOption {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

// --- Orientation ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrientationType {
    Portrait,
    Landscape,
    Auto,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationOption {
    #[serde(rename = "type", default)]
    pub orientation_type: OrientationType,
    #[serde(default)]
    pub is_default: bool,
}

impl OrientationOption {
    pub fn new(orientation_type: OrientationType, is_default: bool) -> Self {
        Self {
            orientation_type,
            is_default,
        }
    }
}

impl CapabilityOption for OrientationOption {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

// --- Vendor capabilities ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorCapabilityType {
    Select,
    Range,
    TypedValue,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorCapability {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type", default)]
    pub capability_type: VendorCapabilityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_cap: Option<OptionCapability<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_cap: Option<DefaultCap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_value_cap: Option<DefaultCap>,
}

impl VendorCapability {
    /// Value the destination proposes for this item, if it proposes one.
    pub fn default_value(&self) -> Option<String> {
        match self.capability_type {
            VendorCapabilityType::Select => self
                .select_cap
                .as_ref()
                .and_then(|cap| default_option(&cap.option))
                .map(|o| o.value.clone()),
            VendorCapabilityType::Range => {
                self.range_cap.as_ref().and_then(|cap| cap.default.clone())
            }
            VendorCapabilityType::TypedValue => self
                .typed_value_cap
                .as_ref()
                .and_then(|cap| cap.default.clone()),
            VendorCapabilityType::Other => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl CapabilityOption for SelectOption {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultCap {
    #[serde(default)]
    pub default: Option<String>,
}
