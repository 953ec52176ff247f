//! Print Preview Model
//!
//! Owns the inputs and the settings table. Every mutator recomputes and
//! then notifies observers with the names that changed.

use crate::capabilities::CapabilitySet;
use crate::destination::{save_as_pdf_capabilities, Destination};
use crate::document::DocumentProperties;
use crate::engine::{EngineError, Result, SettingsAvailabilityEngine};
use crate::hashing::compute_ticket_fingerprint;
use crate::settings::{Setting, SettingName, SettingValue, SettingsState};
use crate::sticky::StickySettings;
use crate::ticket::PrintTicket;

pub type SettingsObserver = Box<dyn FnMut(&[SettingName], &SettingsState)>;

pub struct PrintPreviewModel {
    engine: SettingsAvailabilityEngine,
    destination: Option<Destination>,
    document: DocumentProperties,
    settings: SettingsState,
    observers: Vec<SettingsObserver>,
}

impl PrintPreviewModel {
    pub fn new(engine: SettingsAvailabilityEngine, document: DocumentProperties) -> Self {
        let mut model = Self {
            engine,
            destination: None,
            document,
            settings: SettingsState::new(),
            observers: Vec::new(),
        };
        model.recompute();
        model
    }

    pub fn engine(&self) -> &SettingsAvailabilityEngine {
        &self.engine
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn document(&self) -> &DocumentProperties {
        &self.document
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn setting(&self, name: SettingName) -> &Setting {
        self.settings.get(name)
    }

    pub fn setting_by_key(&self, key: &str) -> Result<&Setting> {
        self.settings.get_by_key(key)
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[SettingName], &SettingsState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Run one pass over the current inputs. Safe to call at any time.
    pub fn recompute(&mut self) -> Vec<SettingName> {
        let changed =
            self.engine
                .recompute(self.destination.as_ref(), &self.document, &mut self.settings);
        if !changed.is_empty() {
            for observer in &mut self.observers {
                observer(&changed, &self.settings);
            }
        }
        changed
    }

    pub fn set_destination(&mut self, destination: Destination) -> Vec<SettingName> {
        tracing::info!(
            destination = %destination.id,
            has_capabilities = destination.capabilities.is_some(),
            "destination selected"
        );
        self.destination = Some(destination);
        self.recompute()
    }

    /// Attach freshly fetched capabilities to the current destination.
    pub fn set_capabilities(&mut self, capabilities: CapabilitySet) -> Result<Vec<SettingName>> {
        let destination = self
            .destination
            .as_mut()
            .ok_or_else(|| EngineError::Config("no destination selected".to_string()))?;
        destination.capabilities = Some(capabilities);
        Ok(self.recompute())
    }

    /// Switch to save-as-PDF, inheriting the current destination's
    /// capabilities when it has any.
    pub fn select_save_as_pdf(&mut self) -> Vec<SettingName> {
        let capabilities = self
            .destination
            .as_ref()
            .and_then(|d| d.capabilities.clone())
            .unwrap_or_else(save_as_pdf_capabilities);
        self.set_destination(Destination::save_as_pdf().with_capabilities(capabilities))
    }

    pub fn set_document(&mut self, document: DocumentProperties) -> Vec<SettingName> {
        self.document = document;
        self.recompute()
    }

    pub fn update_document(&mut self, update: impl FnOnce(&mut DocumentProperties)) -> Vec<SettingName> {
        update(&mut self.document);
        self.recompute()
    }

    /// Set a value programmatically. Does not mark it as a user choice.
    pub fn set_setting(&mut self, name: SettingName, value: SettingValue) -> Result<Vec<SettingName>> {
        check_kind(name, &value)?;
        self.settings.get_mut(name).value = value;
        Ok(self.recompute())
    }

    /// Set a value on behalf of the user.
    pub fn set_setting_from_ui(
        &mut self,
        name: SettingName,
        value: SettingValue,
    ) -> Result<Vec<SettingName>> {
        check_kind(name, &value)?;
        let row = self.settings.get_mut(name);
        if !row.available {
            return Err(EngineError::SettingUnavailable(name));
        }
        row.value = value;
        row.set_from_ui = true;
        Ok(self.recompute())
    }

    pub fn set_setting_from_ui_by_key(&mut self, key: &str, value: SettingValue) -> Result<Vec<SettingName>> {
        let name: SettingName = key.parse()?;
        self.set_setting_from_ui(name, value)
    }

    /// Drop the user's choice and fall back to the default.
    pub fn reset_setting(&mut self, name: SettingName) -> Vec<SettingName> {
        let row = self.settings.get_mut(name);
        row.set_from_ui = false;
        row.value = row.default_value.clone();
        self.recompute()
    }

    pub fn sticky_settings(&self) -> StickySettings {
        StickySettings::capture(&self.settings)
    }

    /// Re-apply remembered user choices. Entries for settings that are
    /// unavailable here, or that carry the wrong kind of value, are skipped.
    /// Returns only the entries still held as user choices once the
    /// restored values have been recomputed together.
    pub fn apply_sticky_settings(&mut self, sticky: &StickySettings) -> Vec<SettingName> {
        let mut candidates = Vec::new();
        for (name, value) in &sticky.settings {
            let row = self.settings.get_mut(*name);
            if !row.available || !name.accepts(value) {
                tracing::debug!(setting = %name, "skipping sticky value");
                continue;
            }
            row.value = value.clone();
            row.set_from_ui = true;
            candidates.push(*name);
        }
        self.recompute();

        let (applied, dropped): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|name| self.settings.get(*name).set_from_ui);
        for name in &dropped {
            tracing::debug!(setting = %name, "sticky value dropped by recompute");
        }
        applied
    }

    pub fn print_ticket(&self) -> PrintTicket {
        PrintTicket::from_settings(self.destination.as_ref(), &self.document, &self.settings)
    }

    pub fn ticket_fingerprint(&self) -> Result<String> {
        Ok(compute_ticket_fingerprint(&self.print_ticket())?)
    }
}

fn check_kind(name: SettingName, value: &SettingValue) -> Result<()> {
    if name.accepts(value) {
        Ok(())
    } else {
        Err(EngineError::ValueMismatch {
            setting: name,
            expected: name.expected_kind(),
            actual: value.kind(),
        })
    }
}
