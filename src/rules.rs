//! Availability Rules - One Rule Per Setting
//!
//! Rules are pure: they read a [`RuleContext`] snapshot and produce an
//! [`Availability`]. The engine decides what to do with it.

use std::collections::{BTreeMap, HashSet};

use crate::capabilities::{
    default_option, ColorClass, DuplexType, OrientationType, PrinterCapabilities,
};
use crate::config::EngineConfig;
use crate::destination::Destination;
use crate::document::{DocumentKind, DocumentProperties};
use crate::settings::{MarginsType, SettingName, SettingValue, SettingsState};

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub destination: Option<&'a Destination>,
    pub document: &'a DocumentProperties,
    pub config: &'a EngineConfig,
    /// Settings resolved so far in the current pass.
    pub settings: &'a SettingsState,
}

impl<'a> RuleContext<'a> {
    pub fn printer(&self) -> Option<&'a PrinterCapabilities> {
        self.destination.and_then(|d| d.printer_capabilities())
    }

    pub fn is_save_as_pdf(&self) -> bool {
        self.destination.map_or(false, |d| d.is_save_as_pdf())
    }

    pub fn kind(&self) -> DocumentKind {
        self.document.kind()
    }
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub unavailable_value: SettingValue,
    pub default_value: SettingValue,
}

impl Availability {
    pub fn new(available: bool, unavailable_value: SettingValue, default_value: SettingValue) -> Self {
        Self {
            available,
            unavailable_value,
            default_value,
        }
    }

    /// Availability with the catalog's initial value as both forced and
    /// default value.
    pub fn plain(name: SettingName, available: bool) -> Self {
        Self::new(available, name.initial_value(), name.initial_value())
    }
}

/// Availability rule trait - one per catalog entry
pub trait AvailabilityRule: Send + Sync {
    fn setting(&self) -> SettingName;
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability;
}

// --- Concrete Rules ---

pub struct CopiesRule;

impl AvailabilityRule for CopiesRule {
    fn setting(&self) -> SettingName { SettingName::Copies }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let copies = ctx.printer().and_then(|p| p.copies.as_ref());
        let default = copies.and_then(|c| c.default).unwrap_or(1);
        Availability::new(copies.is_some(), SettingValue::Int(1), SettingValue::Int(default))
    }
}

pub struct CollateRule;

impl AvailabilityRule for CollateRule {
    fn setting(&self) -> SettingName { SettingName::Collate }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let collate = ctx.printer().and_then(|p| p.collate.as_ref());
        let default = collate.and_then(|c| c.default).unwrap_or(true);
        Availability::new(
            collate.is_some(),
            SettingValue::Bool(false),
            SettingValue::Bool(default),
        )
    }
}

pub struct LayoutRule;

impl AvailabilityRule for LayoutRule {
    fn setting(&self) -> SettingName { SettingName::Layout }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let options = ctx.printer().and_then(|p| p.orientation_options());
        let distinct: HashSet<OrientationType> = options
            .unwrap_or_default()
            .iter()
            .map(|o| o.orientation_type)
            .collect();
        let landscape_by_default = options
            .and_then(default_option)
            .map_or(false, |o| o.orientation_type == OrientationType::Landscape);
        let only_landscape =
            distinct.len() == 1 && distinct.contains(&OrientationType::Landscape);

        let available = ctx.document.is_modifiable
            && !ctx.document.has_css_media_styles
            && distinct.len() >= 2;
        Availability::new(
            available,
            SettingValue::Bool(only_landscape),
            SettingValue::Bool(landscape_by_default),
        )
    }
}

pub struct ColorRule;

impl AvailabilityRule for ColorRule {
    fn setting(&self) -> SettingName { SettingName::Color }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let options = ctx.printer().and_then(|p| p.color_options());
        let classes: HashSet<ColorClass> = options
            .unwrap_or_default()
            .iter()
            .filter_map(|o| o.color_type.class())
            .collect();

        let available = classes.len() >= 2;
        let forced_color = ctx.destination.map_or(false, |d| d.is_cloud_docs())
            || (classes.len() == 1 && classes.contains(&ColorClass::Color));
        let default_is_color = options
            .and_then(default_option)
            .map_or(false, |o| o.color_type.class() == Some(ColorClass::Color));

        Availability::new(
            available,
            SettingValue::Bool(forced_color),
            SettingValue::Bool(default_is_color),
        )
    }
}

pub struct MediaSizeRule;

impl AvailabilityRule for MediaSizeRule {
    fn setting(&self) -> SettingName { SettingName::MediaSize }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let options = ctx.printer().and_then(|p| p.media_size_options());
        let has_media = options.is_some() || ctx.is_save_as_pdf();
        let default = options
            .and_then(default_option)
            .cloned()
            .map_or(SettingValue::Null, SettingValue::MediaSize);

        let available =
            has_media && ctx.document.is_modifiable && !ctx.document.has_css_media_styles;
        Availability::new(available, default.clone(), default)
    }
}

/// Settings that exist only for content the browser lays out itself.
pub struct ModifiableOnlyRule(pub SettingName);

impl AvailabilityRule for ModifiableOnlyRule {
    fn setting(&self) -> SettingName { self.0 }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        Availability::plain(self.0, ctx.document.is_modifiable)
    }
}

pub struct DpiRule;

impl AvailabilityRule for DpiRule {
    fn setting(&self) -> SettingName { SettingName::Dpi }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let options = ctx.printer().and_then(|p| p.dpi_options());
        let default = options
            .and_then(default_option)
            .cloned()
            .map_or(SettingValue::Null, SettingValue::Dpi);

        match options {
            Some(options) if options.len() > 1 => {
                Availability::new(true, SettingValue::Null, default)
            }
            Some([only]) => {
                let only = SettingValue::Dpi(only.clone());
                Availability::new(false, only.clone(), only)
            }
            _ => Availability::plain(SettingName::Dpi, false),
        }
    }
}

pub struct ScalingRule;

impl AvailabilityRule for ScalingRule {
    fn setting(&self) -> SettingName { SettingName::Scaling }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let available = match ctx.kind() {
            DocumentKind::Html => true,
            DocumentKind::Pdf => !ctx.is_save_as_pdf(),
            DocumentKind::Plugin => false,
        };
        Availability::plain(SettingName::Scaling, available)
    }
}

pub struct FitToPageRule;

impl AvailabilityRule for FitToPageRule {
    fn setting(&self) -> SettingName { SettingName::FitToPage }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let is_pdf = ctx.kind() == DocumentKind::Pdf;
        let default = is_pdf
            && !ctx.document.is_scaling_disabled
            && ctx.document.fit_to_page_scaling < 100;
        Availability::new(
            is_pdf && !ctx.is_save_as_pdf(),
            SettingValue::Bool(false),
            SettingValue::Bool(default),
        )
    }
}

/// Depends on layout, mediaSize, margins and customMargins, which are
/// resolved earlier in the same pass.
pub struct HeaderFooterRule;

impl HeaderFooterRule {
    fn page_fits_band(ctx: &RuleContext<'_>) -> bool {
        let Some(media) = ctx.settings.effective(SettingName::MediaSize).as_media_size() else {
            return true;
        };
        let landscape = ctx
            .settings
            .effective(SettingName::Layout)
            .as_bool()
            .unwrap_or(false);
        let extent = if landscape {
            media.width_microns
        } else {
            media.height_microns
        };
        extent >= ctx.config.header_footer.minimum_height_microns
    }

    fn margins_leave_band(ctx: &RuleContext<'_>) -> bool {
        let document_margins = || ctx.document.margins.map_or(true, |m| m.leaves_band());
        let margins_type = ctx
            .settings
            .effective(SettingName::Margins)
            .as_margins_type()
            .unwrap_or_default();
        match margins_type {
            MarginsType::Default => document_margins(),
            MarginsType::NoMargins => false,
            MarginsType::Minimum => true,
            MarginsType::Custom => ctx
                .settings
                .effective(SettingName::CustomMargins)
                .as_custom_margins()
                .map_or_else(document_margins, |m| m.leaves_band()),
        }
    }
}

impl AvailabilityRule for HeaderFooterRule {
    fn setting(&self) -> SettingName { SettingName::HeaderFooter }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let available = ctx.document.is_modifiable
            && Self::page_fits_band(ctx)
            && Self::margins_leave_band(ctx);
        Availability::new(available, SettingValue::Bool(false), SettingValue::Bool(true))
    }
}

fn duplex_types(ctx: &RuleContext<'_>) -> HashSet<DuplexType> {
    ctx.printer()
        .and_then(|p| p.duplex_options())
        .unwrap_or_default()
        .iter()
        .map(|o| o.duplex_type)
        .collect()
}

fn default_duplex(ctx: &RuleContext<'_>) -> Option<DuplexType> {
    ctx.printer()
        .and_then(|p| p.duplex_options())
        .and_then(default_option)
        .map(|o| o.duplex_type)
}

pub struct DuplexRule;

impl AvailabilityRule for DuplexRule {
    fn setting(&self) -> SettingName { SettingName::Duplex }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let default = default_duplex(ctx).map_or(false, |t| t != DuplexType::NoDuplex);
        Availability::new(
            duplex_types(ctx).len() >= 2,
            SettingValue::Bool(false),
            SettingValue::Bool(default),
        )
    }
}

pub struct DuplexShortEdgeRule;

impl AvailabilityRule for DuplexShortEdgeRule {
    fn setting(&self) -> SettingName { SettingName::DuplexShortEdge }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let types = duplex_types(ctx);
        let default = default_duplex(ctx) == Some(DuplexType::ShortEdge);
        Availability::new(
            types.len() >= 2 && types.contains(&DuplexType::ShortEdge),
            SettingValue::Bool(false),
            SettingValue::Bool(default),
        )
    }
}

pub struct RasterizeRule;

impl AvailabilityRule for RasterizeRule {
    fn setting(&self) -> SettingName { SettingName::Rasterize }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let available = !ctx.document.is_modifiable
            && !ctx.config.environment.platform.is_desktop_windows_or_mac();
        Availability::plain(SettingName::Rasterize, available)
    }
}

pub struct SelectionOnlyRule;

impl AvailabilityRule for SelectionOnlyRule {
    fn setting(&self) -> SettingName { SettingName::SelectionOnly }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let available = ctx.document.has_selection && ctx.document.is_modifiable;
        Availability::plain(SettingName::SelectionOnly, available)
    }
}

pub struct PagesPerSheetRule;

impl AvailabilityRule for PagesPerSheetRule {
    fn setting(&self) -> SettingName { SettingName::PagesPerSheet }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        Availability::plain(SettingName::PagesPerSheet, ctx.kind() != DocumentKind::Plugin)
    }
}

/// Shared by `pin` and `pinValue`.
pub struct PinRule(pub SettingName);

impl AvailabilityRule for PinRule {
    fn setting(&self) -> SettingName { self.0 }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let supported = ctx
            .printer()
            .and_then(|p| p.pin.as_ref())
            .map_or(false, |pin| pin.supported);
        Availability::plain(self.0, ctx.config.environment.enterprise_managed && supported)
    }
}

pub struct VendorItemsRule;

impl AvailabilityRule for VendorItemsRule {
    fn setting(&self) -> SettingName { SettingName::VendorItems }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Availability {
        let Some(items) = ctx.printer().and_then(|p| p.vendor_capabilities()) else {
            return Availability::plain(SettingName::VendorItems, false);
        };
        let defaults: BTreeMap<String, String> = items
            .iter()
            .filter_map(|item| item.default_value().map(|v| (item.id.clone(), v)))
            .collect();
        Availability::new(
            true,
            SettingValue::VendorItems(BTreeMap::new()),
            SettingValue::VendorItems(defaults),
        )
    }
}

/// The declarative rule table, in catalog order.
pub struct RuleTable {
    rules: Vec<Box<dyn AvailabilityRule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(CopiesRule),
                Box::new(CollateRule),
                Box::new(LayoutRule),
                Box::new(ColorRule),
                Box::new(MediaSizeRule),
                Box::new(ModifiableOnlyRule(SettingName::Margins)),
                Box::new(ModifiableOnlyRule(SettingName::CustomMargins)),
                Box::new(DpiRule),
                Box::new(ScalingRule),
                Box::new(FitToPageRule),
                Box::new(HeaderFooterRule),
                Box::new(ModifiableOnlyRule(SettingName::CssBackground)),
                Box::new(DuplexRule),
                Box::new(DuplexShortEdgeRule),
                Box::new(RasterizeRule),
                Box::new(SelectionOnlyRule),
                Box::new(PagesPerSheetRule),
                Box::new(PinRule(SettingName::Pin)),
                Box::new(PinRule(SettingName::PinValue)),
                Box::new(VendorItemsRule),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn AvailabilityRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn rule_for(&self, name: SettingName) -> Option<&dyn AvailabilityRule> {
        self.iter().find(|r| r.setting() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}
