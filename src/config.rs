/// Browser configuration
///
/// Read from environment variables, falling back to defaults:
///
/// - `CATALOG_DATA_DIR`: directory holding `products.json`,
///   `categories.json` and `users.json` (default `data`)
/// - `CATALOG_LOG`: log filter passed to the logger (default `info`)

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "CATALOG_DATA_DIR";
pub const LOG_VAR: &str = "CATALOG_LOG";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl BrowserConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; blank values count
    /// as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = BrowserConfig::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        BrowserConfig {
            data_dir: get(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_filter: get(LOG_VAR).unwrap_or(defaults.log_filter),
        }
    }
}
