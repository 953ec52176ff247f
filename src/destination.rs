//! Destination System
//!
//! A destination is the selected print target. Two well-known identities
//! change how rules treat it: the save-as-PDF pseudo destination and the
//! cloud docs destination.

use serde::{Deserialize, Serialize};

use crate::capabilities::{
    CapabilitySet, ColorOption, ColorType, MediaSizeOption, OptionCapability, OrientationOption,
    OrientationType, PrinterCapabilities,
};

pub const SAVE_AS_PDF_ID: &str = "Save as PDF";
pub const CLOUD_DOCS_ID: &str = "__google__docs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationType {
    Local,
    Cloud,
    SaveAsPdf,
    Extension,
}

impl Default for DestinationType {
    fn default() -> Self {
        Self::Local
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    #[serde(rename = "type", default)]
    pub destination_type: DestinationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Absent until the backend has delivered them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilitySet>,
}

impl Destination {
    pub fn new(id: impl Into<String>, destination_type: DestinationType) -> Self {
        Self {
            id: id.into(),
            destination_type,
            display_name: None,
            capabilities: None,
        }
    }

    pub fn local(id: impl Into<String>) -> Self {
        Self::new(id, DestinationType::Local)
    }

    pub fn save_as_pdf() -> Self {
        Self::new(SAVE_AS_PDF_ID, DestinationType::SaveAsPdf)
    }

    pub fn cloud_docs() -> Self {
        Self::new(CLOUD_DOCS_ID, DestinationType::Cloud)
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn is_save_as_pdf(&self) -> bool {
        self.destination_type == DestinationType::SaveAsPdf || self.id == SAVE_AS_PDF_ID
    }

    pub fn is_cloud_docs(&self) -> bool {
        self.id == CLOUD_DOCS_ID
    }

    pub fn printer_capabilities(&self) -> Option<&PrinterCapabilities> {
        self.capabilities.as_ref().map(|c| &c.printer)
    }
}

/// Capabilities of the save-as-PDF destination when there is no real
/// destination to inherit them from.
pub fn save_as_pdf_capabilities() -> CapabilitySet {
    CapabilitySet {
        version: Some("1.0".to_string()),
        printer: PrinterCapabilities {
            color: Some(OptionCapability::new(vec![ColorOption::new(
                ColorType::StandardColor,
                true,
            )])),
            page_orientation: Some(OptionCapability::new(vec![
                OrientationOption::new(OrientationType::Portrait, true),
                OrientationOption::new(OrientationType::Landscape, false),
                OrientationOption::new(OrientationType::Auto, false),
            ])),
            media_size: Some(OptionCapability::new(vec![
                MediaSizeOption::new("NA_LETTER", 215_900, 279_400).as_default(),
                MediaSizeOption::new("NA_LEGAL", 215_900, 355_600),
                MediaSizeOption::new("NA_LEDGER", 279_400, 431_800),
                MediaSizeOption::new("ISO_A4", 210_000, 297_000),
                MediaSizeOption::new("ISO_A3", 297_000, 420_000),
            ])),
            ..PrinterCapabilities::default()
        },
    }
}
