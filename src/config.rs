//! Engine Configuration
//!
//! Host environment facts and tunable limits, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::EngineError;

pub const DEFAULT_MINIMUM_HEADER_FOOTER_MICRONS: u32 = 25_400;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub environment: Environment,
    pub header_footer: HeaderFooterConfig,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.header_footer.minimum_height_microns == 0 {
            return Err(EngineError::Config(
                "header_footer.minimum_height_microns must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Facts about the host that a couple of rules consult.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub enterprise_managed: bool,
    pub platform: PlatformFamily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    Mac,
    Linux,
    ChromeOs,
    Other,
}

impl PlatformFamily {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub fn is_desktop_windows_or_mac(self) -> bool {
        matches!(self, Self::Windows | Self::Mac)
    }
}

impl Default for PlatformFamily {
    fn default() -> Self {
        Self::current()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderFooterConfig {
    /// Pages shorter than this along the printed height never get a
    /// header or footer.
    pub minimum_height_microns: u32,
}

impl Default for HeaderFooterConfig {
    fn default() -> Self {
        Self {
            minimum_height_microns: DEFAULT_MINIMUM_HEADER_FOOTER_MICRONS,
        }
    }
}
