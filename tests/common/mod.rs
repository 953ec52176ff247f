//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use printsettings_core::{
    CapabilitySet, Destination, DocumentProperties, EngineConfig, Environment, Margins,
    PlatformFamily, PrintPreviewModel, SettingsAvailabilityEngine,
};

pub const DEVICE_ID: &str = "FooDevice";

/// A fully featured printer.
pub fn cdd_template() -> CapabilitySet {
    CapabilitySet::from_json(
        r#"{
            "version": "1.0",
            "printer": {
                "collate": {"default": true},
                "copies": {"default": 1, "max": 1000},
                "color": {"option": [
                    {"type": "STANDARD_COLOR", "is_default": true},
                    {"type": "STANDARD_MONOCHROME"}
                ]},
                "dpi": {"option": [
                    {"horizontal_dpi": 200, "vertical_dpi": 200, "is_default": true},
                    {"horizontal_dpi": 100, "vertical_dpi": 100}
                ]},
                "duplex": {"option": [
                    {"type": "NO_DUPLEX", "is_default": true},
                    {"type": "LONG_EDGE"},
                    {"type": "SHORT_EDGE"}
                ]},
                "page_orientation": {"option": [
                    {"type": "PORTRAIT", "is_default": true},
                    {"type": "LANDSCAPE"},
                    {"type": "AUTO"}
                ]},
                "media_size": {"option": [
                    {"name": "NA_LETTER", "width_microns": 215900, "height_microns": 279400,
                     "is_default": true, "custom_display_name": "Letter"},
                    {"name": "CUSTOM_SQUARE", "width_microns": 215900, "height_microns": 215900,
                     "custom_display_name": "CUSTOM_SQUARE"}
                ]},
                "pin": {"supported": true}
            }
        }"#,
    )
    .expect("template parses")
}

pub fn html_document() -> DocumentProperties {
    DocumentProperties {
        has_css_media_styles: false,
        has_selection: false,
        is_modifiable: true,
        is_pdf: false,
        is_scaling_disabled: false,
        fit_to_page_scaling: 100,
        page_count: 3,
        title: "title".to_string(),
        margins: Some(Margins::uniform(72)),
    }
}

pub fn config(platform: PlatformFamily, enterprise_managed: bool) -> EngineConfig {
    EngineConfig {
        environment: Environment {
            enterprise_managed,
            platform,
        },
        ..EngineConfig::default()
    }
}

pub fn model_with(config: EngineConfig) -> PrintPreviewModel {
    let mut model = PrintPreviewModel::new(SettingsAvailabilityEngine::new(config), html_document());
    model.set_destination(Destination::local(DEVICE_ID).with_capabilities(cdd_template()));
    model
}

/// Linux host, unmanaged, template printer, HTML document.
pub fn model() -> PrintPreviewModel {
    model_with(config(PlatformFamily::Linux, false))
}

/// Replace the current destination's capabilities with an edited template.
pub fn set_template_with(model: &mut PrintPreviewModel, edit: impl FnOnce(&mut CapabilitySet)) {
    let mut caps = cdd_template();
    edit(&mut caps);
    model.set_capabilities(caps).expect("destination selected");
}
