//! Record store and gallery configuration
//!
//! A wasm bundle has no process environment, so values are baked in at
//! compile time with `option_env!`. Native builds also consult the runtime
//! environment, loading `.env` first in dev.

use tracing::warn;
use whisker_common::GalleryConfig;

const URL_VAR: &str = "WHISKER_STORE_URL";
const KEY_VAR: &str = "WHISKER_STORE_KEY";
const TABLE_VAR: &str = "WHISKER_STORE_TABLE";

pub const DEFAULT_TABLE: &str = "cats";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid store URL: {0}")]
    InvalidUrl(String),
}

/// Where the records live and the read-only credential to fetch them.
#[derive(Clone, PartialEq)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

impl StoreConfig {
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded store settings from .env");
        }

        Self::from_lookup(|name| runtime_var(name).or_else(|| compile_time_var(name)))
    }

    /// Build from a variable lookup. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = get(URL_VAR).ok_or(ConfigError::Missing(URL_VAR))?;
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        let api_key = get(KEY_VAR).ok_or(ConfigError::Missing(KEY_VAR))?;
        let table = get(TABLE_VAR).unwrap_or_else(|| DEFAULT_TABLE.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_var(_name: &str) -> Option<String> {
    None
}

fn compile_time_var(name: &str) -> Option<String> {
    let value = match name {
        URL_VAR => option_env!("WHISKER_STORE_URL"),
        KEY_VAR => option_env!("WHISKER_STORE_KEY"),
        TABLE_VAR => option_env!("WHISKER_STORE_TABLE"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Gallery tunables, with an optional JSON override baked in at build time.
pub fn gallery_config() -> GalleryConfig {
    parse_gallery_config(option_env!("WHISKER_GALLERY_CONFIG"))
}

fn parse_gallery_config(raw: Option<&str>) -> GalleryConfig {
    match raw {
        Some(json) => GalleryConfig::from_json(json).unwrap_or_else(|e| {
            warn!("Ignoring invalid WHISKER_GALLERY_CONFIG: {e}");
            GalleryConfig::default()
        }),
        None => GalleryConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> = vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_loads_with_default_table() {
        let config = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "https://store.example.com/"),
            (KEY_VAR, "anon-key"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://store.example.com");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.table, "cats");
    }

    #[test]
    fn test_missing_url() {
        let err = StoreConfig::from_lookup(lookup(&[(KEY_VAR, "anon-key")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("WHISKER_STORE_URL"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "https://store.example.com"),
            (KEY_VAR, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("WHISKER_STORE_KEY"));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "store.example.com"),
            (KEY_VAR, "anon-key"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::InvalidUrl(url) => assert_eq!(url, "store.example.com"),
            other => panic!("Expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = StoreConfig {
            base_url: "https://store.example.com".into(),
            api_key: "secret".into(),
            table: "cats".into(),
        };
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_gallery_config_override() {
        let config = parse_gallery_config(Some(r#"{ "recent_cap": 4 }"#));
        assert_eq!(config.recent_cap, 4);
        assert_eq!(config.search_debounce_ms, 300);

        assert_eq!(parse_gallery_config(Some("not json")), GalleryConfig::default());
        assert_eq!(parse_gallery_config(None), GalleryConfig::default());
    }
}
