//! Application settings
//!
//! Settings persist as a single JSON document under a fixed key in the
//! injected key-value store. A missing or unparsable stored value falls
//! back to defaults; parse failures are logged, not surfaced.

use capture::QualityTier;
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, Result};

/// Storage key the settings document lives under.
pub const SETTINGS_KEY: &str = "settings";

/// Main application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    /// Organization identity used in exported documents.
    pub organization: OrganizationSettings,
    /// Defaults applied to new exports.
    pub export: ExportDefaults,
}

/// Organization identity settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizationSettings {
    /// Name used as the PDF author when an export doesn't name one.
    pub name: String,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            name: "Bright Beginnings Academy".to_string(),
        }
    }
}

/// Export defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDefaults {
    /// Quality tier applied when an export doesn't choose one.
    pub quality_tier: QualityTier,
    /// Directory exported files are delivered into, if configured.
    pub output_dir: Option<String>,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            quality_tier: QualityTier::Standard,
            output_dir: None,
        }
    }
}

/// Settings manager over an injected store.
pub struct SettingsManager {
    store: Box<dyn KeyValueStore>,
    current: AppSettings,
}

impl SettingsManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: AppSettings::default(),
        }
    }

    /// Load settings from the store, or defaults if absent or unparsable.
    pub fn load(&mut self) -> Result<&AppSettings> {
        match self.store.get(SETTINGS_KEY)? {
            Some(value) => match serde_json::from_value::<AppSettings>(value) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse stored settings, using defaults: {}", e);
                    self.current = AppSettings::default();
                }
            },
            None => {
                self.current = AppSettings::default();
            }
        }
        Ok(&self.current)
    }

    /// Save the current settings to the store.
    pub fn save(&self) -> Result<()> {
        let value = serde_json::to_value(&self.current)?;
        self.store.set(SETTINGS_KEY, value)
    }

    /// Get the current settings.
    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Replace the settings and save them.
    pub fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }

    /// Reset settings to defaults and save.
    pub fn reset(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save()?;
        Ok(&self.current)
    }
}
