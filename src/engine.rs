//! Settings Availability Engine - Single Recompute Entry Point
//!
//! A pass evaluates the whole rule table against a working copy of the
//! settings table and swaps it in at the end. Observers never see a half
//! updated table.

use thiserror::Error;

use crate::config::EngineConfig;
use crate::destination::Destination;
use crate::document::DocumentProperties;
use crate::rules::{Availability, RuleContext, RuleTable};
use crate::settings::{Setting, SettingName, SettingsState};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static RECOMPUTE_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_recompute_call_count() -> u32 {
    RECOMPUTE_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_recompute_call_count() {
    RECOMPUTE_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid setting name: {0}")]
    InvalidSettingName(String),

    #[error("Setting {0} is not available")]
    SettingUnavailable(SettingName),

    #[error("Setting {setting} expects a {expected} value, got {actual}")]
    ValueMismatch {
        setting: SettingName,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

pub struct SettingsAvailabilityEngine {
    rules: RuleTable,
    config: EngineConfig,
}

impl SettingsAvailabilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rules: RuleTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Compute the next settings table from `current` without touching it.
    pub fn evaluate(
        &self,
        destination: Option<&Destination>,
        document: &DocumentProperties,
        current: &SettingsState,
    ) -> SettingsState {
        #[cfg(feature = "test-hooks")]
        RECOMPUTE_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        let mut next = current.clone();
        for rule in self.rules.iter() {
            let name = rule.setting();
            let outcome = {
                let ctx = RuleContext {
                    destination,
                    document,
                    config: &self.config,
                    settings: &next,
                };
                rule.evaluate(&ctx)
            };
            tracing::trace!(setting = %name, ?outcome, "evaluated rule");
            apply(next.get_mut(name), outcome);
        }
        next
    }

    /// Recompute `settings` in place. Returns the settings whose row changed.
    pub fn recompute(
        &self,
        destination: Option<&Destination>,
        document: &DocumentProperties,
        settings: &mut SettingsState,
    ) -> Vec<SettingName> {
        let next = self.evaluate(destination, document, settings);
        let changed = settings.diff(&next);
        for name in &changed {
            let (before, after) = (settings.get(*name), next.get(*name));
            if before.available != after.available {
                tracing::debug!(
                    setting = %name,
                    available = after.available,
                    cleared_user_choice = before.set_from_ui && !after.set_from_ui,
                    "availability changed"
                );
            }
        }
        *settings = next;
        changed
    }
}

impl Default for SettingsAvailabilityEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Fold a rule outcome into a row. A user choice survives only while the
/// setting stays available; otherwise the value follows the default.
fn apply(setting: &mut Setting, outcome: Availability) {
    let flipped = setting.available != outcome.available;
    if !outcome.available {
        setting.set_from_ui = false;
    }
    if !setting.set_from_ui && (flipped || setting.default_value != outcome.default_value) {
        setting.value = outcome.default_value.clone();
    }
    setting.available = outcome.available;
    setting.unavailable_value = outcome.unavailable_value;
    setting.default_value = outcome.default_value;
}
