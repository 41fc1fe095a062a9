use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use serde::Deserialize;
use serde_json::Value;

pub const MIN_REFRESH_INTERVAL_SECS: u64 = 1;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexingSettings {
    pub refresh_interval_secs: u64,
    pub exclude_dirs: Vec<String>,
    pub skip_hidden: bool,
    pub extensions: Vec<String>,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 10,
            exclude_dirs: vec!["node_modules".to_string(), "vendor".to_string()],
            skip_hidden: true,
            extensions: vec!["go".to_string()],
        }
    }
}

impl IndexingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(v) = patch.refresh_interval_secs {
            self.refresh_interval_secs = v;
        }
        if let Some(v) = patch.exclude_dirs {
            self.exclude_dirs = v;
        }
        if let Some(v) = patch.skip_hidden {
            self.skip_hidden = v;
        }
        if let Some(v) = patch.extensions {
            self.extensions = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.refresh_interval_secs =
            self.refresh_interval_secs.clamp(MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS);
        self.exclude_dirs = dedup_trimmed(&self.exclude_dirs);
        self.extensions = dedup_trimmed(
            &self.extensions.iter().map(|ext| ext.trim().trim_start_matches('.').to_string()).collect::<Vec<_>>(),
        );
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

fn dedup_trimmed(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct IndexingSettingsPatch {
    #[serde(alias = "refresh_interval_secs")]
    pub(crate) refresh_interval_secs: Option<u64>,
    #[serde(alias = "exclude_dirs")]
    pub(crate) exclude_dirs: Option<Vec<String>>,
    #[serde(alias = "skip_hidden")]
    pub(crate) skip_hidden: Option<bool>,
    pub(crate) extensions: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
