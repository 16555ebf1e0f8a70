//! Core runtime configuration.
//!
//! # Responsibility
//! - Hold storage key names, sidebar categories and the default log level.
//! - Parse host-provided JSON overrides; missing fields keep their defaults.
//!
//! # Invariants
//! - `CoreConfig::default()` uses the legacy storage keys so existing
//!   payloads keep loading.

use crate::logging::default_log_level;
use crate::store::{QUOTE_DISMISSED_KEY, TASKS_KEY};
use serde::{Deserialize, Serialize};

fn default_categories() -> Vec<String> {
    vec![
        "Personal".into(),
        "Work".into(),
        "Home".into(),
        "Shopping".into(),
    ]
}

/// Store keys used by the repository and the quote selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub tasks: String,
    pub quote_dismissed: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: TASKS_KEY.to_string(),
            quote_dismissed: QUOTE_DISMISSED_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub storage: StorageKeys,
    /// Categories offered by the filter sidebar, after the "All" entry.
    pub categories: Vec<String>,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            categories: default_categories(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
