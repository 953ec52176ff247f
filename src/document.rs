//! Document properties of the source being printed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProperties {
    /// True for regular web content, false for PDF and plugin content.
    #[serde(default = "default_true")]
    pub is_modifiable: bool,
    #[serde(default)]
    pub is_pdf: bool,
    #[serde(default)]
    pub has_selection: bool,
    #[serde(default)]
    pub has_css_media_styles: bool,
    #[serde(default)]
    pub is_scaling_disabled: bool,
    #[serde(default = "default_scaling")]
    pub fit_to_page_scaling: u32,
    #[serde(default = "default_page_count")]
    pub page_count: u32,
    #[serde(default)]
    pub title: String,
    /// Default page margins of the rendered document, in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

fn default_true() -> bool { true }
fn default_scaling() -> u32 { 100 }
fn default_page_count() -> u32 { 1 }

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            is_modifiable: true,
            is_pdf: false,
            has_selection: false,
            has_css_media_styles: false,
            is_scaling_disabled: false,
            fit_to_page_scaling: default_scaling(),
            page_count: default_page_count(),
            title: String::new(),
            margins: None,
        }
    }
}

impl DocumentProperties {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::of(self)
    }
}

/// What produced the document. `is_modifiable` wins over `is_pdf` when the
/// two disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Pdf,
    Plugin,
}

impl DocumentKind {
    pub fn of(document: &DocumentProperties) -> Self {
        if document.is_modifiable {
            Self::Html
        } else if document.is_pdf {
            Self::Pdf
        } else {
            Self::Plugin
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
}

impl Margins {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            margin_top: top,
            margin_right: right,
            margin_bottom: bottom,
            margin_left: left,
        }
    }

    pub fn uniform(points: u32) -> Self {
        Self::new(points, points, points, points)
    }

    /// Room for a header or footer band exists when either edge is non-zero.
    pub fn leaves_band(&self) -> bool {
        self.margin_top > 0 || self.margin_bottom > 0
    }
}
