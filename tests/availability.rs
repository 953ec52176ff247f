//! Per-setting availability scenarios.
//!
//! Each test starts from an HTML document printed to a fully featured
//! printer and then changes one input at a time.

mod common;

use common::{cdd_template, config, model, model_with, set_template_with, DEVICE_ID};
use printsettings_core::capabilities::{
    ColorOption, ColorType, DpiOption, DuplexOption, DuplexType, MediaSizeOption,
    OptionCapability, OrientationOption, OrientationType,
};
use printsettings_core::{
    CapabilitySet, Destination, Margins, MarginsType, PlatformFamily, PrintPreviewModel,
    SettingName, SettingValue,
};

fn available(model: &PrintPreviewModel, name: SettingName) -> bool {
    model.setting(name).available
}

fn set_from_ui(model: &PrintPreviewModel, name: SettingName) -> bool {
    model.setting(name).set_from_ui
}

fn color_cap(options: &[(ColorType, bool)]) -> Option<OptionCapability<ColorOption>> {
    Some(OptionCapability::new(
        options
            .iter()
            .map(|&(t, is_default)| ColorOption::new(t, is_default))
            .collect(),
    ))
}

fn vendor_color(color_type: ColorType, is_default: bool, vendor_id: &str) -> ColorOption {
    ColorOption {
        vendor_id: Some(vendor_id.to_string()),
        ..ColorOption::new(color_type, is_default)
    }
}

#[test]
fn copies() {
    let mut model = model();
    assert!(available(&model, SettingName::Copies));

    set_template_with(&mut model, |caps| caps.printer.copies = None);
    assert!(!available(&model, SettingName::Copies));

    model.set_capabilities(cdd_template()).unwrap();
    assert!(available(&model, SettingName::Copies));
    assert!(!set_from_ui(&model, SettingName::Copies));
}

#[test]
fn collate() {
    let mut model = model();
    assert!(available(&model, SettingName::Collate));

    set_template_with(&mut model, |caps| caps.printer.collate = None);
    assert!(!available(&model, SettingName::Collate));

    model.set_capabilities(cdd_template()).unwrap();
    assert!(available(&model, SettingName::Collate));
    assert!(!set_from_ui(&model, SettingName::Collate));
}

#[test]
fn layout() {
    let mut model = model();
    assert!(available(&model, SettingName::Layout));

    let single_orientation = [
        None,
        Some(OptionCapability::new(vec![OrientationOption::new(OrientationType::Portrait, true)])),
        Some(OptionCapability::new(vec![OrientationOption::new(OrientationType::Landscape, true)])),
    ];
    for cap in single_orientation {
        set_template_with(&mut model, |caps| caps.printer.page_orientation = cap);
        assert!(!available(&model, SettingName::Layout));
    }

    model.set_capabilities(cdd_template()).unwrap();
    assert!(available(&model, SettingName::Layout));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(!available(&model, SettingName::Layout));

    model.update_document(|doc| doc.is_modifiable = true);
    assert!(available(&model, SettingName::Layout));

    model.update_document(|doc| doc.has_css_media_styles = true);
    assert!(!available(&model, SettingName::Layout));
    assert!(!set_from_ui(&model, SettingName::Layout));
}

#[test]
fn layout_forced_landscape_when_only_option() {
    let mut model = model();
    set_template_with(&mut model, |caps| {
        caps.printer.page_orientation = Some(OptionCapability::new(vec![OrientationOption::new(
            OrientationType::Landscape,
            false,
        )]));
    });
    let layout = model.setting(SettingName::Layout);
    assert!(!layout.available);
    assert_eq!(layout.unavailable_value, SettingValue::Bool(true));
}

#[test]
fn color_unavailable_cases() {
    use ColorType::*;

    let mut model = model();
    assert!(available(&model, SettingName::Color));

    let cases: Vec<(Option<OptionCapability<ColorOption>>, bool)> = vec![
        (None, false),
        (color_cap(&[(StandardColor, true)]), true),
        (color_cap(&[(StandardColor, true), (CustomColor, false)]), true),
        (color_cap(&[(StandardMonochrome, true), (CustomMonochrome, false)]), false),
        (color_cap(&[(StandardMonochrome, false)]), false),
        (
            Some(OptionCapability::new(vec![vendor_color(CustomMonochrome, false, "42")])),
            false,
        ),
        (
            Some(OptionCapability::new(vec![vendor_color(CustomColor, false, "42")])),
            true,
        ),
    ];

    for (cap, expected) in cases {
        set_template_with(&mut model, |caps| caps.printer.color = cap.clone());
        let color = model.setting(SettingName::Color);
        assert!(!color.available, "{cap:?}");
        assert_eq!(color.unavailable_value, SettingValue::Bool(expected), "{cap:?}");
    }
}

#[test]
fn color_available_cases() {
    use ColorType::*;

    let mut model = model();
    let cases: Vec<(Option<OptionCapability<ColorOption>>, bool)> = vec![
        (color_cap(&[(StandardMonochrome, true), (StandardColor, false)]), false),
        (color_cap(&[(StandardMonochrome, false), (StandardColor, true)]), true),
        (
            Some(OptionCapability::new(vec![
                vendor_color(CustomMonochrome, false, "42"),
                vendor_color(CustomColor, true, "43"),
            ])),
            true,
        ),
    ];

    for (cap, expected) in cases {
        set_template_with(&mut model, |caps| caps.printer.color = cap.clone());
        let color = model.setting(SettingName::Color);
        assert!(color.available, "{cap:?}");
        assert_eq!(color.value, SettingValue::Bool(expected), "{cap:?}");
    }
}

#[test]
fn color_cloud_docs_forces_color() {
    let mut model = model();
    let mut caps = cdd_template();
    caps.printer.color = None;
    model.set_destination(Destination::cloud_docs().with_capabilities(caps));

    let color = model.setting(SettingName::Color);
    assert!(!color.available);
    assert_eq!(color.unavailable_value, SettingValue::Bool(true));
    assert!(!color.set_from_ui);
}

#[test]
fn media_size() {
    let mut model = model();
    assert!(available(&model, SettingName::MediaSize));

    set_template_with(&mut model, |caps| caps.printer.media_size = None);
    assert!(!available(&model, SettingName::MediaSize));

    // Save as PDF always carries media sizes.
    model.select_save_as_pdf();
    assert!(available(&model, SettingName::MediaSize));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(!available(&model, SettingName::MediaSize));

    model.update_document(|doc| {
        doc.is_modifiable = true;
        doc.has_css_media_styles = true;
    });
    assert!(!available(&model, SettingName::MediaSize));
    assert!(!set_from_ui(&model, SettingName::MediaSize));
}

#[test]
fn media_size_defaults_to_marked_option() {
    let model = model();
    let media = model.setting(SettingName::MediaSize);
    assert_eq!(
        media.value.as_media_size().and_then(|m| m.name.as_deref()),
        Some("NA_LETTER")
    );
}

#[test]
fn margins() {
    let mut model = model();
    assert!(available(&model, SettingName::Margins));
    assert!(available(&model, SettingName::CustomMargins));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(!available(&model, SettingName::Margins));
    assert!(!available(&model, SettingName::CustomMargins));
    assert!(!set_from_ui(&model, SettingName::Margins));
    assert!(!set_from_ui(&model, SettingName::CustomMargins));
}

#[test]
fn dpi() {
    let mut model = model();
    assert!(available(&model, SettingName::Dpi));

    set_template_with(&mut model, |caps| caps.printer.dpi = None);
    assert!(!available(&model, SettingName::Dpi));
    assert!(model.setting(SettingName::Dpi).unavailable_value.is_null());

    set_template_with(&mut model, |caps| {
        if let Some(dpi) = caps.printer.dpi.as_mut() {
            dpi.option.pop();
        }
    });
    let dpi = model.setting(SettingName::Dpi);
    assert!(!dpi.available);
    let forced = dpi.unavailable_value.as_dpi().unwrap();
    assert_eq!(forced.horizontal_dpi, 200);
    assert_eq!(forced.vertical_dpi, 200);
    assert!(!dpi.set_from_ui);
}

#[test]
fn dpi_without_marked_default_uses_first() {
    let mut model = model();
    set_template_with(&mut model, |caps| {
        caps.printer.dpi = Some(OptionCapability::new(vec![
            DpiOption::new(600, 600),
            DpiOption::new(300, 300),
        ]));
    });
    let dpi = model.setting(SettingName::Dpi);
    assert!(dpi.available);
    assert_eq!(dpi.value.as_dpi().unwrap().horizontal_dpi, 600);
}

#[test]
fn scaling() {
    let mut model = model();
    let printer = model.destination().cloned().unwrap();

    // HTML -> printer
    assert!(available(&model, SettingName::Scaling));

    // HTML -> Save as PDF
    model.select_save_as_pdf();
    assert!(available(&model, SettingName::Scaling));

    // PDF -> Save as PDF
    model.update_document(|doc| {
        doc.is_modifiable = false;
        doc.is_pdf = true;
    });
    assert!(!available(&model, SettingName::Scaling));

    // PDF -> printer
    model.set_destination(printer.clone());
    assert!(available(&model, SettingName::Scaling));
    assert!(!set_from_ui(&model, SettingName::Scaling));

    // Plugin -> Save as PDF
    model.select_save_as_pdf();
    model.update_document(|doc| doc.is_pdf = false);
    assert!(!available(&model, SettingName::Scaling));

    // Plugin -> printer
    model.set_destination(printer);
    assert!(!available(&model, SettingName::Scaling));
}

#[test]
fn fit_to_page() {
    let mut model = model();
    let printer = model.destination().cloned().unwrap();

    // HTML -> printer
    assert!(!available(&model, SettingName::FitToPage));

    // HTML -> Save as PDF
    model.select_save_as_pdf();
    assert!(!available(&model, SettingName::FitToPage));

    // PDF -> Save as PDF
    model.update_document(|doc| {
        doc.is_modifiable = false;
        doc.is_pdf = true;
    });
    assert!(!available(&model, SettingName::FitToPage));

    // PDF -> printer
    model.set_destination(printer.clone());
    assert!(available(&model, SettingName::FitToPage));
    assert!(!set_from_ui(&model, SettingName::FitToPage));

    // Plugin -> Save as PDF
    model.select_save_as_pdf();
    model.update_document(|doc| doc.is_pdf = false);
    assert!(!available(&model, SettingName::FitToPage));

    // Plugin -> printer
    model.set_destination(printer);
    assert!(!available(&model, SettingName::FitToPage));
}

#[test]
fn fit_to_page_default_for_oversized_pdf() {
    let mut model = model();
    model.update_document(|doc| {
        doc.is_modifiable = false;
        doc.is_pdf = true;
        doc.fit_to_page_scaling = 80;
    });
    assert_eq!(model.setting(SettingName::FitToPage).value, SettingValue::Bool(true));

    model.update_document(|doc| doc.is_scaling_disabled = true);
    assert_eq!(model.setting(SettingName::FitToPage).value, SettingValue::Bool(false));
}

#[test]
fn header_footer_margins() {
    let mut model = model();
    assert!(available(&model, SettingName::HeaderFooter));

    model
        .set_setting(SettingName::Margins, SettingValue::MarginsType(MarginsType::NoMargins))
        .unwrap();
    assert!(!available(&model, SettingName::HeaderFooter));

    model
        .set_setting(SettingName::Margins, SettingValue::MarginsType(MarginsType::Custom))
        .unwrap();
    let custom_cases = [
        (Margins::uniform(0), false),
        (Margins::uniform(36), true),
        (Margins::new(0, 36, 0, 36), false),
        (Margins::new(0, 36, 36, 36), true),
    ];
    for (margins, expected) in custom_cases {
        model
            .set_setting(SettingName::CustomMargins, SettingValue::CustomMargins(margins))
            .unwrap();
        assert_eq!(available(&model, SettingName::HeaderFooter), expected, "{margins:?}");
    }

    model
        .set_setting(SettingName::Margins, SettingValue::MarginsType(MarginsType::Minimum))
        .unwrap();
    assert!(available(&model, SettingName::HeaderFooter));
}

#[test]
fn header_footer_zero_document_margins() {
    let mut model = model();
    model.update_document(|doc| doc.margins = Some(Margins::new(0, 72, 0, 72)));
    assert!(!available(&model, SettingName::HeaderFooter));
}

#[test]
fn header_footer_small_paper() {
    let mut model = model();
    let small = MediaSizeOption::new("SmallLabel", 38_100, 12_700);
    let big = MediaSizeOption::new("BigLabel", 50_800, 76_200).as_default();
    set_template_with(&mut model, |caps| {
        caps.printer.media_size = Some(OptionCapability::new(vec![small.clone(), big.clone()]));
    });
    model
        .set_setting(SettingName::Margins, SettingValue::MarginsType(MarginsType::Default))
        .unwrap();

    // Default big label with default margins.
    assert!(available(&model, SettingName::HeaderFooter));

    model
        .set_setting(SettingName::MediaSize, SettingValue::MediaSize(small.clone()))
        .unwrap();
    assert!(!available(&model, SettingName::HeaderFooter));

    // Printed sideways the label is tall enough.
    model.set_setting(SettingName::Layout, SettingValue::Bool(true)).unwrap();
    assert!(available(&model, SettingName::HeaderFooter));
    model.set_setting(SettingName::Layout, SettingValue::Bool(false)).unwrap();

    model
        .set_setting(SettingName::MediaSize, SettingValue::MediaSize(big))
        .unwrap();
    assert!(available(&model, SettingName::HeaderFooter));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(!available(&model, SettingName::HeaderFooter));
    assert!(!set_from_ui(&model, SettingName::HeaderFooter));
}

#[test]
fn css_background() {
    let mut model = model();
    assert!(available(&model, SettingName::CssBackground));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(!available(&model, SettingName::CssBackground));
    assert!(!set_from_ui(&model, SettingName::CssBackground));
}

#[test]
fn duplex() {
    let mut model = model();
    assert!(available(&model, SettingName::Duplex));
    assert!(available(&model, SettingName::DuplexShortEdge));

    set_template_with(&mut model, |caps| caps.printer.duplex = None);
    assert!(!available(&model, SettingName::Duplex));
    assert!(!available(&model, SettingName::DuplexShortEdge));

    set_template_with(&mut model, |caps| {
        caps.printer.duplex = Some(OptionCapability::new(vec![DuplexOption::new(
            DuplexType::NoDuplex,
            true,
        )]));
    });
    assert!(!available(&model, SettingName::Duplex));
    assert!(!available(&model, SettingName::DuplexShortEdge));

    set_template_with(&mut model, |caps| {
        caps.printer.duplex = Some(OptionCapability::new(vec![
            DuplexOption::new(DuplexType::NoDuplex, false),
            DuplexOption::new(DuplexType::LongEdge, true),
        ]));
    });
    assert!(available(&model, SettingName::Duplex));
    assert!(!available(&model, SettingName::DuplexShortEdge));
    assert_eq!(model.setting(SettingName::Duplex).value, SettingValue::Bool(true));
    assert!(!set_from_ui(&model, SettingName::Duplex));
    assert!(!set_from_ui(&model, SettingName::DuplexShortEdge));
}

#[test]
fn rasterize() {
    let mut model = model();
    assert!(!available(&model, SettingName::Rasterize));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(available(&model, SettingName::Rasterize));
    assert!(!set_from_ui(&model, SettingName::Rasterize));

    for platform in [PlatformFamily::Windows, PlatformFamily::Mac] {
        let mut model = model_with(config(platform, false));
        model.update_document(|doc| doc.is_modifiable = false);
        assert!(!available(&model, SettingName::Rasterize), "{platform:?}");
    }
}

#[test]
fn selection_only() {
    let mut model = model();
    assert!(!available(&model, SettingName::SelectionOnly));

    model.update_document(|doc| doc.has_selection = true);
    assert!(available(&model, SettingName::SelectionOnly));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(!available(&model, SettingName::SelectionOnly));
    assert!(!set_from_ui(&model, SettingName::SelectionOnly));
}

#[test]
fn pages_per_sheet() {
    let mut model = model();
    assert!(available(&model, SettingName::PagesPerSheet));

    // Inconsistent flags: modifiable wins, still web content.
    model.update_document(|doc| doc.is_pdf = true);
    assert!(available(&model, SettingName::PagesPerSheet));

    model.update_document(|doc| doc.is_modifiable = false);
    assert!(available(&model, SettingName::PagesPerSheet));

    // Plugin content.
    model.update_document(|doc| doc.is_pdf = false);
    assert!(!available(&model, SettingName::PagesPerSheet));
}

#[test]
fn pin() {
    let model = model();
    assert!(!available(&model, SettingName::Pin));
    assert!(!available(&model, SettingName::PinValue));

    let mut model = model_with(config(PlatformFamily::ChromeOs, true));
    assert!(available(&model, SettingName::Pin));
    assert!(available(&model, SettingName::PinValue));

    set_template_with(&mut model, |caps| caps.printer.pin = None);
    assert!(!available(&model, SettingName::Pin));
    assert!(!available(&model, SettingName::PinValue));

    set_template_with(&mut model, |caps| {
        if let Some(pin) = caps.printer.pin.as_mut() {
            pin.supported = false;
        }
    });
    assert!(!available(&model, SettingName::Pin));
    assert!(!available(&model, SettingName::PinValue));
    assert!(!set_from_ui(&model, SettingName::Pin));
    assert!(!set_from_ui(&model, SettingName::PinValue));
}

#[test]
fn vendor_items() {
    let mut model = model();
    assert!(!available(&model, SettingName::VendorItems));

    let caps = CapabilitySet::from_json(
        r#"{"printer": {"vendor_capability": [
            {"id": "finishings", "type": "SELECT",
             "select_cap": {"option": [{"value": "none"}, {"value": "staple"}]}},
            {"id": "tray", "type": "TYPED_VALUE", "typed_value_cap": {"default": "2"}}
        ]}}"#,
    )
    .unwrap();
    model.set_destination(Destination::local(DEVICE_ID).with_capabilities(caps));

    let items = model.setting(SettingName::VendorItems);
    assert!(items.available);
    let SettingValue::VendorItems(values) = &items.value else {
        panic!("unexpected value {:?}", items.value);
    };
    assert_eq!(values.get("finishings").map(String::as_str), Some("none"));
    assert_eq!(values.get("tray").map(String::as_str), Some("2"));
}

#[test]
fn destination_without_capabilities() {
    let mut model = model();
    model.set_destination(Destination::local("Pending"));
    for name in [
        SettingName::Copies,
        SettingName::Collate,
        SettingName::Color,
        SettingName::Dpi,
        SettingName::Duplex,
        SettingName::Layout,
        SettingName::MediaSize,
    ] {
        assert!(!available(&model, name), "{name}");
    }
    assert!(available(&model, SettingName::Margins));
}
