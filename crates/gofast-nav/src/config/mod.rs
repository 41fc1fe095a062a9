//! Navigator configuration.
//!
//! Settings are split into one file per category. [`NavigatorSettings`]
//! aggregates them and accepts either a `gofast-nav.toml` file or a JSON
//! payload pushed by the host.

pub(crate) mod indexing;
pub(crate) mod logging;

use std::{collections::HashMap, path::Path};

use indexing::IndexingSettingsPatch;
pub use indexing::{IndexingSettings, MAX_REFRESH_INTERVAL_SECS, MIN_REFRESH_INTERVAL_SECS};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

pub const SETTINGS_SECTION_KEY: &str = "gofast-nav";
pub const CONFIG_FILE_NAME: &str = "gofast-nav.toml";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigatorSettings {
    pub indexing: IndexingSettings,
    pub logging: LoggingSettings,
}

impl NavigatorSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let patch: NavigatorSettingsPatch = toml::from_str(text)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    /// Merge a host-supplied JSON payload, either bare or nested under
    /// [`SETTINGS_SECTION_KEY`]. Payloads that don't decode are ignored.
    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<NavigatorSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: NavigatorSettingsPatch,
    ) {
        if let Some(p) = patch.indexing {
            self.indexing.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.indexing.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct NavigatorSettingsPatch {
    indexing: Option<IndexingSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
